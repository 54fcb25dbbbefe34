// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::vec::Vec;

use crate::{FontInstance, GlyphRenderer, PreparedGlyph};

/// Remembers what it was asked to draw.
#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub(crate) glyphs: Vec<(u64, PreparedGlyph)>,
}

impl GlyphRenderer for RecordingRenderer {
    fn fill_glyph(&mut self, font: &dyn FontInstance, glyph: PreparedGlyph) {
        self.glyphs.push((font.id(), glyph));
    }
}

impl RecordingRenderer {
    /// Returns the translation of each drawn glyph.
    pub(crate) fn origins(&self) -> Vec<(f64, f64)> {
        self.glyphs
            .iter()
            .map(|(_, glyph)| {
                let t = glyph.transform.translation();
                (t.x, t.y)
            })
            .collect()
    }
}

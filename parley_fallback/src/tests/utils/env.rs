// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;
use std::vec::Vec;

use hashbrown::HashMap;
use peniko::kurbo::{BezPath, Rect, Shape};

use crate::{FontHandle, FontInstance, GlyphRun, LayoutArgs, ShapedGlyph, NOTDEF};

/// A font with made-up metrics.
///
/// Every glyph outline is a rectangle as wide as the glyph's advance and 8 units tall, sitting
/// on the baseline. Marks attach to the preceding character and ligatures replace a fixed pair
/// of characters.
#[derive(Clone, Debug)]
pub(crate) struct TestFont {
    id: u64,
    glyphs: HashMap<char, (u32, f32)>,
    marks: Vec<char>,
    ligatures: Vec<([char; 2], u32, f32)>,
    kashida: Vec<char>,
    notdef_advance: f32,
}

impl TestFont {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id,
            glyphs: HashMap::new(),
            marks: Vec::new(),
            ligatures: Vec::new(),
            kashida: Vec::new(),
            notdef_advance: 10.,
        }
    }

    pub(crate) fn with_glyph(mut self, ch: char, id: u32, advance: f32) -> Self {
        self.glyphs.insert(ch, (id, advance));
        self
    }

    /// Maps each character of `text` to consecutive glyph ids starting at `first_id`.
    pub(crate) fn with_glyphs(mut self, text: &str, first_id: u32, advance: f32) -> Self {
        for (i, ch) in text.chars().enumerate() {
            self.glyphs.insert(ch, (first_id + i as u32, advance));
        }
        self
    }

    pub(crate) fn with_mark(mut self, ch: char, id: u32) -> Self {
        self.glyphs.insert(ch, (id, 0.));
        self.marks.push(ch);
        self
    }

    pub(crate) fn with_ligature(mut self, pair: [char; 2], id: u32, advance: f32) -> Self {
        self.ligatures.push((pair, id, advance));
        self
    }

    /// Allows kashida before the glyphs starting with any character of `text`.
    pub(crate) fn with_kashida(mut self, text: &str) -> Self {
        self.kashida.extend(text.chars());
        self
    }

    pub(crate) fn with_notdef_advance(mut self, advance: f32) -> Self {
        self.notdef_advance = advance;
        self
    }

    pub(crate) fn handle(self) -> FontHandle {
        Arc::new(self)
    }
}

impl FontInstance for TestFont {
    fn id(&self) -> u64 {
        self.id
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        self.glyphs.get(&ch).map(|&(id, _)| id)
    }

    fn advance(&self, glyph_id: u32) -> f32 {
        if glyph_id == NOTDEF {
            return self.notdef_advance;
        }
        self.glyphs
            .values()
            .find(|&&(id, _)| id == glyph_id)
            .map(|&(_, advance)| advance)
            .or_else(|| {
                self.ligatures
                    .iter()
                    .find(|&&(_, id, _)| id == glyph_id)
                    .map(|&(_, _, advance)| advance)
            })
            .unwrap_or(self.notdef_advance)
    }

    fn shape(
        &self,
        text: &[char],
        range: core::ops::Range<usize>,
        is_rtl: bool,
        out: &mut Vec<ShapedGlyph>,
    ) {
        let mut clusters: Vec<Vec<ShapedGlyph>> = Vec::new();
        let mut i = range.start;
        while i < range.end {
            if i + 1 < range.end {
                let pair = [text[i], text[i + 1]];
                if let Some(&(_, id, advance)) = self.ligatures.iter().find(|(p, ..)| *p == pair) {
                    let mut glyph = ShapedGlyph::new(id, i, advance);
                    glyph.char_count = 2;
                    glyph.allow_kashida = self.kashida.contains(&text[i]);
                    clusters.push(vec![glyph]);
                    i += 2;
                    continue;
                }
            }
            let id = self.glyph_id(text[i]).unwrap_or(NOTDEF);
            let mut cluster = vec![ShapedGlyph::new(id, i, self.advance(id))];
            cluster[0].allow_kashida = id != NOTDEF && self.kashida.contains(&text[i]);
            let base = i;
            i += 1;
            while i < range.end && self.marks.contains(&text[i]) {
                let mut mark = ShapedGlyph::new(self.glyphs[&text[i]].0, base, 0.);
                mark.in_cluster = true;
                cluster[0].char_count += 1;
                cluster.push(mark);
                i += 1;
            }
            clusters.push(cluster);
        }
        if is_rtl {
            // Marks come before their base in visual order.
            for cluster in clusters.iter().rev() {
                out.extend(cluster.iter().rev());
            }
        } else {
            out.extend(clusters.iter().flatten());
        }
    }

    fn glyph_outline(&self, glyph_id: u32) -> Option<BezPath> {
        let width = f64::from(self.advance(glyph_id)).max(1.);
        Some(Rect::new(0., -8., width, 0.).to_path(0.1))
    }
}

pub(crate) fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

/// Lays out `args` with `font` alone, without adjusting.
pub(crate) fn single_run(font: TestFont, args: &LayoutArgs<'_>) -> GlyphRun {
    let mut run = GlyphRun::new(font.handle());
    run.layout_text(args, None);
    run
}

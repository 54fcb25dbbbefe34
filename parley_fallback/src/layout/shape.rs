// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use smallvec::{smallvec, SmallVec};

use super::GlyphRun;
use crate::{FallbackRuns, Glyph, LayoutArgs};

impl GlyphRun {
    /// Lays out `args` with the run's font, replacing any previous glyphs.
    ///
    /// With `runs`, only the characters inside those intervals are laid out; this is how a
    /// fallback level restricts itself to what the previous level could not render. Bidi runs
    /// are taken in the visual order given by `args` and glyphs are placed contiguously from
    /// `x = 0`.
    ///
    /// Returns the characters the font could not render.
    pub fn layout_text(&mut self, args: &LayoutArgs<'_>, runs: Option<&FallbackRuns>) -> FallbackRuns {
        let range = args.range();
        self.glyphs.clear();
        self.min_char = range.start;
        self.end_char = range.end;
        self.orientation = args.orientation();

        let text = args.text();
        let kashida = args.options().kashida_justification;
        let mut unresolved = FallbackRuns::new();
        let mut shaped = Vec::new();
        let mut x = 0.;
        for bidi_run in args.runs() {
            let is_rtl = bidi_run.is_rtl();
            let mut pieces: SmallVec<[Range<usize>; 4]> = match runs {
                Some(runs) => runs.intersect(bidi_run.range()).collect(),
                None => smallvec![bidi_run.range()],
            };
            if is_rtl {
                pieces.reverse();
            }
            for piece in pieces {
                shaped.clear();
                self.font.shape(text, piece.clone(), is_rtl, &mut shaped);
                for glyph in &shaped {
                    if !piece.contains(&glyph.char_index) {
                        continue;
                    }
                    let glyph = Glyph::from_shaped(glyph, x, is_rtl, kashida);
                    if glyph.is_notdef() {
                        let end = glyph.char_range().end.min(piece.end);
                        unresolved.add_run(glyph.char_index..end);
                    }
                    x += glyph.advance;
                    self.glyphs.push(glyph);
                }
            }
        }
        unresolved
    }
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use peniko::kurbo::{Point, Vec2};

use crate::{FontHandle, Glyph, NOTDEF};

/// Glyphs laid out with a single font.
///
/// Glyphs are stored in visual order, so `x` grows along the vector even inside right-to-left
/// runs, where the character indices decrease instead. Glyphs are addressed by their index in
/// this vector; dropping a glyph only marks it until [`simplify`](Self::simplify) compacts the
/// run.
#[derive(Clone, Debug)]
pub struct GlyphRun {
    pub(crate) font: FontHandle,
    pub(crate) glyphs: Vec<Glyph>,
    pub(crate) min_char: usize,
    pub(crate) end_char: usize,
    pub(crate) orientation: f64,
    pub(crate) draw_base: Point,
    pub(crate) draw_offset: Vec2,
}

/// Extent of a visually contiguous group of glyphs found by [`GlyphRun::scan_run`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ScannedRun {
    /// Index one past the last glyph of the group.
    pub(crate) end: usize,
    /// Characters covered by the group.
    pub(crate) chars: Range<usize>,
    /// Sum of the glyph advances.
    pub(crate) advance: f32,
}

impl GlyphRun {
    /// Creates an empty run for `font`.
    pub fn new(font: FontHandle) -> Self {
        Self {
            font,
            glyphs: Vec::new(),
            min_char: 0,
            end_char: 0,
            orientation: 0.,
            draw_base: Point::ZERO,
            draw_offset: Vec2::ZERO,
        }
    }

    /// Returns the font the run was laid out with.
    pub fn font(&self) -> &FontHandle {
        &self.font
    }

    /// Returns the glyphs in visual order, including dropped ones not yet compacted.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Returns the range of characters the run was laid out for.
    pub fn char_range(&self) -> Range<usize> {
        self.min_char..self.end_char
    }

    /// Returns the writing orientation in degrees.
    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    /// Returns the point in output space where the run starts.
    pub fn draw_base(&self) -> Point {
        self.draw_base
    }

    /// Sets the point in output space where the run starts.
    pub fn set_draw_base(&mut self, base: Point) {
        self.draw_base = base;
    }

    /// Returns the offset applied to every glyph before rotation.
    pub fn draw_offset(&self) -> Vec2 {
        self.draw_offset
    }

    /// Sets an offset applied to every glyph before rotation.
    pub fn set_draw_offset(&mut self, offset: Vec2) {
        self.draw_offset = offset;
    }

    /// Returns true if the run holds no glyph that survives simplification.
    pub fn is_empty(&self) -> bool {
        self.glyphs.iter().all(Glyph::is_dropped)
    }

    /// Returns the next live glyph at or after `*cursor` whose character lies in `window`.
    ///
    /// On success `*cursor` is moved past the returned glyph, so repeated calls walk the run in
    /// visual order.
    pub fn next_glyph(&self, cursor: &mut usize, window: Range<usize>) -> Option<(usize, Glyph)> {
        while let Some(glyph) = self.glyphs.get(*cursor) {
            let index = *cursor;
            *cursor += 1;
            if !glyph.is_dropped() && window.contains(&glyph.char_index) {
                return Some((index, *glyph));
            }
        }
        None
    }

    /// Moves the glyph at `index` to `x` and every later glyph by the same distance.
    ///
    /// `x` is the left edge of the glyph's cell. Right-to-left glyphs sit at the right of a
    /// widened cell, so the extra width is added first.
    pub fn move_glyph(&mut self, index: usize, x: f32) {
        let Some(glyph) = self.glyphs.get(index) else {
            return;
        };
        let delta = x - glyph.cell_left();
        if delta != 0. {
            for glyph in &mut self.glyphs[index..] {
                glyph.x += delta;
            }
        }
    }

    /// Marks the glyph at `index` for removal.
    pub fn drop_glyph(&mut self, index: usize) {
        if let Some(glyph) = self.glyphs.get_mut(index) {
            glyph.drop_glyph();
        }
    }

    /// Compacts the run.
    ///
    /// The base level loses its dropped glyphs. Fallback levels lose their [`NOTDEF`] glyphs,
    /// since a deeper level or the base level will cover those characters.
    pub fn simplify(&mut self, is_base: bool) {
        if is_base {
            self.glyphs.retain(|glyph| !glyph.is_dropped());
        } else {
            self.glyphs.retain(|glyph| glyph.id != NOTDEF);
        }
    }

    /// Finds the group of glyphs starting at `first` that the merge places as one piece.
    ///
    /// The group extends over glyphs of the same cluster and over glyphs that visually
    /// continue the previous one and satisfy `accept`. Glyphs outside `window` end the group.
    pub(crate) fn scan_run(
        &self,
        first: usize,
        window: Range<usize>,
        mut accept: impl FnMut(&Glyph) -> bool,
    ) -> ScannedRun {
        let Some(start) = self.glyphs.get(first) else {
            return ScannedRun {
                end: first,
                chars: 0..0,
                advance: 0.,
            };
        };
        let mut prev = *start;
        let mut chars = start.char_range();
        let mut advance = start.advance;
        let mut end = first + 1;
        while let Some(glyph) = self.glyphs.get(end) {
            if glyph.is_dropped() {
                end += 1;
                continue;
            }
            if !window.contains(&glyph.char_index) {
                break;
            }
            let same_cluster = glyph.is_in_cluster() || glyph.char_index == prev.char_index;
            if !same_cluster && !(prev.continues_with(glyph) && accept(glyph)) {
                break;
            }
            chars.start = chars.start.min(glyph.char_index);
            chars.end = chars.end.max(glyph.char_range().end);
            advance += glyph.advance;
            prev = *glyph;
            end += 1;
        }
        ScannedRun {
            end,
            chars,
            advance,
        }
    }
}

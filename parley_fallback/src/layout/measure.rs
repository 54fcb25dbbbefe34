// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;

use super::GlyphRun;
use crate::Glyph;

impl GlyphRun {
    /// Returns the sum of the advances of all live glyphs.
    pub fn text_width(&self) -> f32 {
        self.live_glyphs().map(|glyph| glyph.advance).sum()
    }

    /// Returns the sum of the advances of glyphs for characters in
    /// `skip_start..skip_start + amount`.
    pub fn partial_text_width(&self, skip_start: usize, amount: usize) -> f32 {
        let chars = skip_start..skip_start.saturating_add(amount);
        self.live_glyphs()
            .filter(|glyph| chars.contains(&glyph.char_index))
            .map(|glyph| glyph.advance)
            .sum()
    }

    /// Fills `widths` with one advance per character of the run and returns the total width.
    ///
    /// A glyph's advance is credited to its first character, so the remaining characters of a
    /// ligature get zero. Glyphs sharing a character add up.
    pub fn fill_dx_array(&self, widths: &mut Vec<f32>) -> f32 {
        let len = self.end_char - self.min_char;
        widths.clear();
        widths.resize(len, 0.);
        for glyph in self.live_glyphs() {
            if let Some(width) = glyph
                .char_index
                .checked_sub(self.min_char)
                .and_then(|index| widths.get_mut(index))
            {
                *width += glyph.advance;
            }
        }
        self.text_width()
    }

    /// Returns the left and right caret positions of each character, interleaved.
    ///
    /// Entry `2 * i` is the left caret of character `min_char + i` and entry `2 * i + 1` its
    /// right caret; for right-to-left glyphs the caret sides follow logical order, so the
    /// left caret is on the glyph's right edge. Characters without a glyph stay `None`.
    pub fn caret_positions(&self) -> Vec<Option<f32>> {
        let mut carets = vec![None; 2 * (self.end_char - self.min_char)];
        self.fill_carets(&mut carets);
        carets
    }

    pub(crate) fn fill_carets(&self, carets: &mut [Option<f32>]) {
        for glyph in self.live_glyphs() {
            let Some(index) = glyph.char_index.checked_sub(self.min_char) else {
                continue;
            };
            if 2 * index + 1 >= carets.len() {
                continue;
            }
            // Cluster members must not move the caret of the cluster start.
            if glyph.is_in_cluster() && carets[2 * index].is_some() {
                continue;
            }
            let left = glyph.cell_left();
            let right = left + glyph.advance;
            let (first, second) = if glyph.is_rtl() {
                (right, left)
            } else {
                (left, right)
            };
            carets[2 * index] = Some(first);
            carets[2 * index + 1] = Some(second);
        }
    }

    /// Returns the first character at which the accumulated width exceeds `max_width`.
    ///
    /// Each character contributes its advance scaled by `factor`; `extra` is added after each
    /// character that still fits. Returns `None` if the whole run fits.
    pub fn text_break(&self, max_width: f32, extra: f32, factor: f32) -> Option<usize> {
        let mut widths = Vec::new();
        self.fill_dx_array(&mut widths);
        text_break(&widths, self.min_char, max_width, extra, factor)
    }

    /// Returns true if a kashida may be inserted before the character at `pos`.
    ///
    /// The glyph for `pos` must allow kashida, which requires the run to be laid out with
    /// [`kashida_justification`](crate::LayoutOptions::kashida_justification). It must then
    /// start the run, or its visual predecessor must belong to `pos + 1`; anything else means
    /// `pos` is part of a ligature. A character this font cannot render is never valid, so a
    /// fallback level can be asked instead.
    pub fn is_kashida_pos_valid(&self, pos: usize) -> bool {
        let Some(index) = self
            .glyphs
            .iter()
            .position(|glyph| !glyph.is_dropped() && glyph.char_index == pos)
        else {
            return false;
        };
        let glyph = &self.glyphs[index];
        if !glyph.allow_kashida() || glyph.is_notdef() {
            return false;
        }
        if index == 0 {
            return true;
        }
        self.glyphs[..index]
            .iter()
            .rev()
            .find(|glyph| !glyph.is_dropped() && glyph.char_index != pos)
            .is_some_and(|prev| prev.char_index == pos + 1)
    }

    pub(crate) fn live_glyphs(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.glyphs.iter().filter(|glyph| !glyph.is_dropped())
    }
}

pub(crate) fn text_break(
    widths: &[f32],
    min_char: usize,
    max_width: f32,
    extra: f32,
    factor: f32,
) -> Option<usize> {
    let mut width = 0.;
    for (i, advance) in widths.iter().enumerate() {
        width += advance * factor;
        if width > max_width {
            return Some(min_char + i);
        }
        width += extra;
    }
    None
}

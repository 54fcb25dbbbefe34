// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use text_primitives::{asian_kerning, can_apply_asian_kerning, PairPosition};

use super::GlyphRun;
use crate::util::nearly_eq;
use crate::{LayoutArgs, LayoutOptions};

impl GlyphRun {
    /// Applies the width requested by `args` to the laid out glyphs.
    ///
    /// An advance table takes precedence over a layout width. Without either, full-width
    /// punctuation is compressed if requested for horizontal text.
    pub fn adjust_layout(&mut self, args: &LayoutArgs<'_>) {
        self.adjust(
            args.text(),
            args.dx_array(),
            args.layout_width(),
            args.options(),
        );
    }

    pub(crate) fn adjust(
        &mut self,
        text: &[char],
        dx: Option<&[f32]>,
        layout_width: Option<f32>,
        options: LayoutOptions,
    ) {
        if let Some(dx) = dx {
            self.apply_dx_array(dx);
        } else if let Some(width) = layout_width {
            self.justify(width);
        } else if options.asian_kerning && !options.vertical {
            self.apply_asian_kerning(text);
        }
    }

    /// Resizes glyphs to match a cumulative per-character advance table.
    ///
    /// Entry `i` of `dx` is the distance from the start of the run to the end of character
    /// `min_char + i`. The width difference of each cluster goes to its first glyph; in
    /// right-to-left clusters it is added on the glyph's left so the ink stays right aligned.
    pub fn apply_dx_array(&mut self, dx: &[f32]) {
        let mut old_widths = Vec::new();
        self.fill_dx_array(&mut old_widths);
        let new_width = |i: usize| match i {
            0 => dx.first().copied(),
            _ => Some(dx.get(i)? - dx.get(i - 1)?),
        };

        let mut delta = 0.;
        let mut i = 0;
        while i < self.glyphs.len() {
            let glyph = self.glyphs[i];
            let mut diff = 0.;
            if let Some(start) = glyph.char_index.checked_sub(self.min_char) {
                for index in start..start + glyph.char_count as usize {
                    if let (Some(new), Some(old)) = (new_width(index), old_widths.get(index)) {
                        diff += new - old;
                    }
                }
            }
            if !glyph.is_rtl() {
                self.glyphs[i].advance += diff;
                self.glyphs[i].x += delta;
                i += 1;
                while let Some(glyph) = self.glyphs.get_mut(i) {
                    if !glyph.is_in_cluster() {
                        break;
                    }
                    glyph.x += delta;
                    i += 1;
                }
            } else if glyph.is_in_cluster() {
                // Moved together with the cluster's base glyph below.
                i += 1;
                continue;
            } else {
                self.glyphs[i].advance += diff;
                self.glyphs[i].x += delta + diff;
                for glyph in self.glyphs[..i].iter_mut().rev() {
                    if !glyph.is_in_cluster() {
                        break;
                    }
                    glyph.x += delta + diff;
                }
                i += 1;
            }
            delta += diff;
        }
    }

    /// Stretches or compresses the run so that its width becomes `width`.
    ///
    /// When expanding, the extra space is shared equally by the glyphs that are not part of a
    /// cluster. When compressing, glyph positions are scaled towards the start of the run and
    /// the rightmost glyph keeps its width, ending exactly at `width`.
    pub fn justify(&mut self, width: f32) {
        let old_width = self.text_width();
        if old_width == 0. || nearly_eq(old_width, width) {
            return;
        }
        let live: Vec<usize> = (0..self.glyphs.len())
            .filter(|&i| !self.glyphs[i].is_dropped())
            .collect();
        if live.is_empty() {
            return;
        }

        if width > old_width {
            let mut stretchable = live
                .iter()
                .filter(|&&i| !self.glyphs[i].is_in_cluster())
                .count();
            let mut remaining = width - old_width;
            let mut shift = 0.;
            for (k, &i) in live.iter().enumerate() {
                let left = self.glyphs[i].cell_left() + shift;
                let glyph = &mut self.glyphs[i];
                if !glyph.is_in_cluster() && stretchable > 0 {
                    let share = remaining / stretchable as f32;
                    stretchable -= 1;
                    remaining -= share;
                    glyph.advance += share;
                    shift += share;
                    if glyph.is_rtl() {
                        // Marks drawn before a right-to-left base follow its ink.
                        for &j in live[..k].iter().rev() {
                            if !self.glyphs[j].is_in_cluster() {
                                break;
                            }
                            self.glyphs[j].x += share;
                        }
                    }
                }
                self.glyphs[i].set_cell_left(left);
            }
            return;
        }

        if live.len() < 2 {
            return;
        }
        let lefts: Vec<f32> = live.iter().map(|&i| self.glyphs[i].cell_left()).collect();
        let origin = lefts[0];
        let right_width = self.glyphs[live[live.len() - 1]].advance;
        let old_span = old_width - right_width;
        if old_span <= 0. {
            return;
        }
        let new_span = width.max(right_width) - right_width;
        let squeeze = new_span / old_span;
        let last = lefts.len() - 1;
        let new_lefts: Vec<f32> = lefts
            .iter()
            .enumerate()
            .map(|(k, &left)| match k {
                0 => origin,
                k if k == last => origin + new_span,
                _ => origin + (left - origin) * squeeze,
            })
            .collect();
        for (k, &i) in live.iter().enumerate() {
            let glyph = &mut self.glyphs[i];
            if let Some(next) = new_lefts.get(k + 1) {
                glyph.advance = next - new_lefts[k];
            }
            glyph.set_cell_left(new_lefts[k]);
        }
    }

    /// Compresses adjacent full-width punctuation.
    ///
    /// For each pair of characters that both have a compression class, the leading glyph
    /// loses up to a quarter of its width and everything after it moves left accordingly.
    pub fn apply_asian_kerning(&mut self, text: &[char]) {
        let end = self.end_char.min(text.len());
        let mut shift = 0.;
        for glyph in &mut self.glyphs {
            if glyph.is_dropped() {
                continue;
            }
            glyph.x -= shift;
            if glyph.is_in_cluster() {
                continue;
            }
            let n = glyph.char_index;
            if n + 1 >= end {
                continue;
            }
            let (current, next) = (text[n], text[n + 1]);
            if !can_apply_asian_kerning(current) || !can_apply_asian_kerning(next) {
                continue;
            }
            let kern_current = asian_kerning(current, PairPosition::First);
            let kern_next = -asian_kerning(next, PairPosition::Second);
            if kern_current == 0 || kern_next == 0 {
                continue;
            }
            let kern = kern_current.min(kern_next);
            if kern >= 0 {
                continue;
            }
            let shrink = (-f32::from(kern) * glyph.orig_advance / 4.).min(glyph.advance);
            glyph.advance -= shrink;
            if glyph.is_rtl() {
                glyph.x -= shrink;
            }
            shift += shrink;
        }
    }
}

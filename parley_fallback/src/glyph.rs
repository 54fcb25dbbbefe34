// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::font::ShapedGlyph;

/// Glyph identifier used for characters a font cannot render.
pub const NOTDEF: u32 = 0;

/// A positioned glyph in a [`GlyphRun`](crate::GlyphRun).
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Glyph {
    /// The font-specific identifier for this glyph.
    ///
    /// This ID is specific to the font being used and corresponds to the
    /// glyph index within that font. It is *not* a Unicode code point.
    pub id: u32,
    /// Index of the first source character.
    pub char_index: usize,
    /// Number of source characters covered by the glyph.
    pub char_count: u16,
    /// Logical position along the baseline.
    pub x: f32,
    /// Horizontal rendering offset from `x`.
    pub x_offset: f32,
    /// Vertical rendering offset from the baseline.
    pub y_offset: f32,
    /// Advance width reported by the font.
    pub orig_advance: f32,
    /// Advance width after justification and compression.
    pub advance: f32,
    pub(crate) flags: u8,
}

impl Glyph {
    pub(crate) const IN_CLUSTER: u8 = 1;
    pub(crate) const RTL: u8 = 2;
    pub(crate) const DROPPED: u8 = 4;
    pub(crate) const ALLOW_KASHIDA: u8 = 8;

    pub(crate) fn from_shaped(shaped: &ShapedGlyph, x: f32, is_rtl: bool, kashida: bool) -> Self {
        let mut flags = 0;
        if shaped.in_cluster {
            flags |= Self::IN_CLUSTER;
        }
        if is_rtl {
            flags |= Self::RTL;
        }
        if kashida && shaped.allow_kashida {
            flags |= Self::ALLOW_KASHIDA;
        }
        Self {
            id: shaped.id,
            char_index: shaped.char_index,
            char_count: shaped.char_count.max(1),
            x,
            x_offset: shaped.x_offset,
            y_offset: shaped.y_offset,
            orig_advance: shaped.advance,
            advance: shaped.advance,
            flags,
        }
    }

    /// Returns true if the glyph is attached to a preceding glyph and cannot be stretched on
    /// its own.
    pub fn is_in_cluster(&self) -> bool {
        self.flags & Self::IN_CLUSTER != 0
    }

    /// Returns true if the glyph belongs to a right-to-left run.
    pub fn is_rtl(&self) -> bool {
        self.flags & Self::RTL != 0
    }

    /// Returns true if the glyph was dropped and awaits removal.
    pub fn is_dropped(&self) -> bool {
        self.flags & Self::DROPPED != 0
    }

    /// Returns true if kashida elongation may be inserted at this glyph.
    ///
    /// Only set when the run was laid out with
    /// [`kashida_justification`](crate::LayoutOptions::kashida_justification).
    pub fn allow_kashida(&self) -> bool {
        self.flags & Self::ALLOW_KASHIDA != 0
    }

    /// Returns true if the glyph stands in for a character the font could not render.
    pub fn is_notdef(&self) -> bool {
        self.id == NOTDEF
    }

    /// Returns the range of source characters covered by the glyph.
    pub fn char_range(&self) -> Range<usize> {
        self.char_index..self.char_index + self.char_count as usize
    }

    /// Returns the left edge of the glyph's cell.
    ///
    /// Right-to-left glyphs keep their ink at the right of a widened cell, so their `x` lies
    /// past the cell start by the width they gained.
    pub fn cell_left(&self) -> f32 {
        if self.is_rtl() {
            self.x - (self.advance - self.orig_advance)
        } else {
            self.x
        }
    }

    /// Places the glyph so its cell starts at `left`.
    pub(crate) fn set_cell_left(&mut self, left: f32) {
        self.x = if self.is_rtl() {
            left + (self.advance - self.orig_advance)
        } else {
            left
        };
    }

    pub(crate) fn drop_glyph(&mut self) {
        self.flags |= Self::DROPPED;
    }

    /// Returns true if `next` directly follows `self` in visual order: either part of the same
    /// cluster, or the adjacent character in the direction of the run.
    pub(crate) fn continues_with(&self, next: &Self) -> bool {
        if next.char_index == self.char_index {
            return true;
        }
        if self.is_rtl() != next.is_rtl() {
            return false;
        }
        if next.is_rtl() {
            next.char_range().end == self.char_index
        } else {
            next.char_index == self.char_range().end
        }
    }
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The font collaborator consumed by layout and drawing.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use peniko::kurbo::{BezPath, Rect, Shape};

use crate::glyph::NOTDEF;

/// Shared handle to a font instance.
///
/// The font cache owns the instances; layouts only keep them alive for as long as they need
/// to draw.
pub type FontHandle = Arc<dyn FontInstance>;

/// A font at a fixed size that can map characters to glyphs and describe them.
///
/// Only [`id`](Self::id), [`glyph_id`](Self::glyph_id) and [`advance`](Self::advance) are
/// required. The provided [`shape`](Self::shape) maps one character to one glyph; a font backed
/// by a real shaper overrides it to produce ligatures, clusters and offsets.
pub trait FontInstance: Debug {
    /// Identity of the instance, used to key caches.
    fn id(&self) -> u64;

    /// Returns the glyph for `ch`, or `None` if the font cannot render it.
    fn glyph_id(&self, ch: char) -> Option<u32>;

    /// Returns the advance width of a glyph. [`NOTDEF`] must be supported.
    fn advance(&self, glyph_id: u32) -> f32;

    /// Shapes the characters of `text` in `range` and appends the glyphs to `out` in visual
    /// order.
    ///
    /// Characters the font cannot render must still produce a glyph, with id [`NOTDEF`].
    fn shape(&self, text: &[char], range: Range<usize>, is_rtl: bool, out: &mut Vec<ShapedGlyph>) {
        let range = range.start.min(text.len())..range.end.min(text.len());
        let mut push = |char_index: usize| {
            let id = self.glyph_id(text[char_index]).unwrap_or(NOTDEF);
            out.push(ShapedGlyph::new(id, char_index, self.advance(id)));
        };
        if is_rtl {
            range.rev().for_each(&mut push);
        } else {
            range.for_each(&mut push);
        }
    }

    /// Returns the outline of a glyph in y-down coordinates relative to its origin.
    fn glyph_outline(&self, _glyph_id: u32) -> Option<BezPath> {
        None
    }

    /// Returns the ink bounds of a glyph in y-down coordinates relative to its origin.
    fn glyph_bounds(&self, glyph_id: u32) -> Option<Rect> {
        self.glyph_outline(glyph_id).map(|path| path.bounding_box())
    }
}

/// A glyph as returned by [`FontInstance::shape`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapedGlyph {
    /// The font-specific glyph identifier, [`NOTDEF`] when the character is not covered.
    pub id: u32,
    /// Index of the first character this glyph was produced from.
    pub char_index: usize,
    /// Number of characters the glyph covers, greater than one for ligatures.
    pub char_count: u16,
    /// Advance width.
    pub advance: f32,
    /// Horizontal rendering offset.
    pub x_offset: f32,
    /// Vertical rendering offset.
    pub y_offset: f32,
    /// True for glyphs attached to a preceding base glyph, such as combining marks.
    pub in_cluster: bool,
    /// True if kashida elongation may be inserted before this glyph.
    pub allow_kashida: bool,
}

impl ShapedGlyph {
    /// Creates a stand-alone glyph for a single character.
    pub fn new(id: u32, char_index: usize, advance: f32) -> Self {
        Self {
            id,
            char_index,
            char_count: 1,
            advance,
            x_offset: 0.,
            y_offset: 0.,
            in_cluster: false,
            allow_kashida: false,
        }
    }
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout types.

mod adjust;
mod fallback;
mod measure;
mod run;
mod shape;

use alloc::vec::Vec;

use peniko::kurbo::{BezPath, Rect};

use crate::draw::{GlyphRenderer, OutlineCache};
use crate::{Error, FontHandle, Glyph, LayoutArgs};

pub use fallback::FallbackLayout;
pub use run::GlyphRun;

/// Maximum number of levels in a [`FallbackLayout`], including the base level.
pub const MAX_FALLBACK: usize = 8;

/// Text laid out with one font or with a chain of fallback fonts.
#[derive(Clone, Debug)]
pub enum TextLayout {
    /// Every character was handled by the primary font, or there was no other font to try.
    Single(GlyphRun),
    /// Some characters were handed on to fallback fonts.
    Fallback(FallbackLayout),
}

impl TextLayout {
    /// Lays out `args` with the first font of `fonts`, handing what it cannot render to the
    /// next font, and so on.
    ///
    /// The cascade stops once every character is rendered or the fonts run out. If it hits
    /// [`MAX_FALLBACK`] with characters still unresolved and fonts left, the layout is marked
    /// incomplete. The result is adjusted to `args` before it is returned.
    pub fn layout(args: &LayoutArgs<'_>, fonts: &[FontHandle]) -> Result<Self, Error> {
        let (primary, rest) = fonts.split_first().ok_or_else(Error::no_fonts)?;
        let mut base = GlyphRun::new(primary.clone());
        let unresolved = base.layout_text(args, None);
        if unresolved.is_empty() || rest.is_empty() {
            base.adjust_layout(args);
            return Ok(Self::Single(base));
        }

        let mut layout = FallbackLayout::new(base, unresolved);
        for font in rest {
            if layout.unresolved().is_empty() {
                break;
            }
            if layout.level_count() == MAX_FALLBACK {
                log::debug!(
                    "fallback chain cut short with {} fonts left",
                    fonts.len() - MAX_FALLBACK
                );
                layout.set_incomplete(true);
                break;
            }
            let mut level = GlyphRun::new(font.clone());
            let unresolved = level.layout_text(args, Some(layout.unresolved()));
            layout.add_fallback(level, unresolved)?;
        }
        layout.adjust_layout(args);
        Ok(Self::Fallback(layout))
    }

    /// Returns the number of font levels.
    pub fn level_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Fallback(layout) => layout.level_count(),
        }
    }

    /// Re-applies width adjustments from `args`.
    pub fn adjust_layout(&mut self, args: &LayoutArgs<'_>) {
        match self {
            Self::Single(run) => run.adjust_layout(args),
            Self::Fallback(layout) => layout.adjust_layout(args),
        }
    }

    /// Returns the total advance.
    pub fn text_width(&self) -> f32 {
        match self {
            Self::Single(run) => run.text_width(),
            Self::Fallback(layout) => layout.text_width(),
        }
    }

    /// Returns the advance of the characters in `skip_start..skip_start + amount`.
    pub fn partial_text_width(&self, skip_start: usize, amount: usize) -> f32 {
        match self {
            Self::Single(run) => run.partial_text_width(skip_start, amount),
            Self::Fallback(layout) => layout.partial_text_width(skip_start, amount),
        }
    }

    /// Fills `widths` with one advance per character and returns the total advance.
    pub fn fill_dx_array(&self, widths: &mut Vec<f32>) -> f32 {
        match self {
            Self::Single(run) => run.fill_dx_array(widths),
            Self::Fallback(layout) => layout.fill_dx_array(widths),
        }
    }

    /// Returns the interleaved left and right caret positions of each character.
    pub fn caret_positions(&self) -> Vec<Option<f32>> {
        match self {
            Self::Single(run) => run.caret_positions(),
            Self::Fallback(layout) => layout.caret_positions(),
        }
    }

    /// Returns the first character that does not fit in `max_width`.
    pub fn text_break(&self, max_width: f32, extra: f32, factor: f32) -> Option<usize> {
        match self {
            Self::Single(run) => run.text_break(max_width, extra, factor),
            Self::Fallback(layout) => layout.text_break(max_width, extra, factor),
        }
    }

    /// Justifies the layout to `width`.
    pub fn justify(&mut self, width: f32) {
        match self {
            Self::Single(run) => run.justify(width),
            Self::Fallback(layout) => layout.justify(width),
        }
    }

    /// Returns true if a kashida may be inserted before the character at `pos`.
    pub fn is_kashida_pos_valid(&self, pos: usize) -> bool {
        match self {
            Self::Single(run) => run.is_kashida_pos_valid(pos),
            Self::Fallback(layout) => layout.is_kashida_pos_valid(pos),
        }
    }

    /// Returns every glyph with the level that owns it, ordered by position.
    pub fn merged_glyphs(&self) -> Vec<(usize, Glyph)> {
        match self {
            Self::Single(run) => run.live_glyphs().map(|glyph| (0, *glyph)).collect(),
            Self::Fallback(layout) => layout.merged_glyphs(),
        }
    }

    /// Draws every glyph.
    pub fn draw_text(&self, renderer: &mut impl GlyphRenderer) {
        match self {
            Self::Single(run) => run.draw_text(renderer),
            Self::Fallback(layout) => layout.draw_text(renderer),
        }
    }

    /// Returns the outline of every glyph in output space.
    pub fn outline(&self, cache: &mut OutlineCache) -> Vec<BezPath> {
        match self {
            Self::Single(run) => run.outline(cache),
            Self::Fallback(layout) => layout.outline(cache),
        }
    }

    /// Returns the union of the ink bounds of every glyph.
    pub fn bound_rect(&self) -> Option<Rect> {
        match self {
            Self::Single(run) => run.bound_rect(),
            Self::Fallback(layout) => layout.bound_rect(),
        }
    }
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handing positioned glyphs to a renderer.

use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::kurbo::{Affine, BezPath, Point, Rect, Vec2};

use crate::layout::{FallbackLayout, GlyphRun};
use crate::{FontInstance, Glyph};

/// A glyph ready to be drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PreparedGlyph {
    /// The font-specific glyph identifier.
    pub id: u32,
    /// The global transform of the glyph.
    pub transform: Affine,
}

/// Trait for types that can render glyphs.
pub trait GlyphRenderer {
    /// Fill a glyph of `font` with the current paint.
    fn fill_glyph(&mut self, font: &dyn FontInstance, glyph: PreparedGlyph);
}

/// Glyph outlines keyed by font and glyph identifier.
///
/// Owned by the caller and reused between calls to `outline`.
#[derive(Clone, Debug, Default)]
pub struct OutlineCache {
    outlines: HashMap<(u64, u32), Option<BezPath>>,
}

impl OutlineCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the outline of `glyph_id` in `font`, loading it on first use.
    pub fn get(&mut self, font: &dyn FontInstance, glyph_id: u32) -> Option<&BezPath> {
        self.outlines
            .entry((font.id(), glyph_id))
            .or_insert_with(|| font.glyph_outline(glyph_id))
            .as_ref()
    }

    /// Returns the number of cached glyphs.
    pub fn len(&self) -> usize {
        self.outlines.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }

    /// Removes all cached outlines.
    pub fn clear(&mut self) {
        self.outlines.clear();
    }
}

/// Placement of a whole run in output space.
#[derive(Copy, Clone, Debug)]
struct Placement {
    base: Point,
    offset: Vec2,
    orientation: f64,
}

impl Placement {
    fn transform(&self, glyph: &Glyph) -> Affine {
        let x = f64::from(glyph.x + glyph.x_offset) + self.offset.x;
        let y = f64::from(glyph.y_offset) + self.offset.y;
        let mut transform = Affine::translate(self.base.to_vec2());
        if self.orientation != 0. {
            transform *= Affine::rotate(-self.orientation.to_radians());
        }
        transform * Affine::translate((x, y))
    }
}

impl GlyphRun {
    fn placement(&self, base: Vec2, offset: Vec2) -> Placement {
        Placement {
            base: self.draw_base + base,
            offset: self.draw_offset + offset,
            orientation: self.orientation,
        }
    }

    /// Returns the transform from glyph space to output space for one glyph.
    pub fn glyph_transform(&self, glyph: &Glyph) -> Affine {
        self.placement(Vec2::ZERO, Vec2::ZERO).transform(glyph)
    }

    /// Draws every live glyph.
    pub fn draw_text(&self, renderer: &mut impl GlyphRenderer) {
        self.draw_placed(renderer, Vec2::ZERO, Vec2::ZERO);
    }

    /// Returns the outline of every live glyph in output space.
    pub fn outline(&self, cache: &mut OutlineCache) -> Vec<BezPath> {
        let mut paths = Vec::new();
        self.outline_placed(cache, Vec2::ZERO, Vec2::ZERO, &mut paths);
        paths
    }

    /// Returns the union of the ink bounds of every live glyph in output space.
    pub fn bound_rect(&self) -> Option<Rect> {
        self.bounds_placed(Vec2::ZERO, Vec2::ZERO)
    }

    fn draw_placed(&self, renderer: &mut impl GlyphRenderer, base: Vec2, offset: Vec2) {
        let placement = self.placement(base, offset);
        for glyph in self.live_glyphs() {
            renderer.fill_glyph(
                &*self.font,
                PreparedGlyph {
                    id: glyph.id,
                    transform: placement.transform(glyph),
                },
            );
        }
    }

    fn outline_placed(
        &self,
        cache: &mut OutlineCache,
        base: Vec2,
        offset: Vec2,
        paths: &mut Vec<BezPath>,
    ) {
        let placement = self.placement(base, offset);
        for glyph in self.live_glyphs() {
            if let Some(path) = cache.get(&*self.font, glyph.id) {
                let mut path = path.clone();
                path.apply_affine(placement.transform(glyph));
                paths.push(path);
            }
        }
    }

    fn bounds_placed(&self, base: Vec2, offset: Vec2) -> Option<Rect> {
        let placement = self.placement(base, offset);
        self.live_glyphs()
            .filter_map(|glyph| {
                let bounds = self.font.glyph_bounds(glyph.id)?;
                Some(placement.transform(glyph).transform_rect_bbox(bounds))
            })
            .reduce(|a, b| a.union(b))
    }
}

impl FallbackLayout {
    /// Draws every level, deepest first.
    pub fn draw_text(&self, renderer: &mut impl GlyphRenderer) {
        for level in self.levels().iter().rev() {
            level.draw_placed(renderer, self.draw_base().to_vec2(), self.draw_offset());
        }
    }

    /// Returns the outlines of every level in output space, deepest first.
    pub fn outline(&self, cache: &mut OutlineCache) -> Vec<BezPath> {
        let mut paths = Vec::new();
        for level in self.levels().iter().rev() {
            level.outline_placed(
                cache,
                self.draw_base().to_vec2(),
                self.draw_offset(),
                &mut paths,
            );
        }
        paths
    }

    /// Returns the union of the ink bounds of all levels in output space.
    pub fn bound_rect(&self) -> Option<Rect> {
        self.levels()
            .iter()
            .rev()
            .filter_map(|level| level.bounds_placed(self.draw_base().to_vec2(), self.draw_offset()))
            .reduce(|a, b| a.union(b))
    }
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`FontInstance`] backed by font data read with skrifa.

use alloc::sync::Arc;
use core::fmt::{Debug, Formatter};

use peniko::kurbo::{BezPath, Rect};
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::{FontRef, GlyphId, MetadataProvider};

use crate::{Error, FontInstance, NOTDEF};

/// An unvaried font at a fixed size.
///
/// Glyphs map one to one to characters; no shaping is applied.
///
/// The [`id`](FontInstance::id) is derived from the address of the data, the face index and
/// the size, so it is only unique while the data is alive. Font caches that hand out their own
/// identities, or that keep an [`OutlineCache`](crate::OutlineCache) beyond the lifetime of
/// the data, set one with [`with_id`](Self::with_id).
#[derive(Clone)]
pub struct SkrifaFont {
    data: Arc<[u8]>,
    index: u32,
    size: f32,
    id: u64,
}

impl SkrifaFont {
    /// Creates an instance of the font at `index` in `data`, scaled to `size` pixels per em.
    pub fn new(data: impl Into<Arc<[u8]>>, index: u32, size: f32) -> Result<Self, Error> {
        let data = data.into();
        if FontRef::from_index(&data, index).is_err() {
            return Err(Error::invalid_font(index));
        }
        let addr = Arc::as_ptr(&data).cast::<u8>().addr() as u64;
        let id = addr.rotate_left(24) ^ (u64::from(index) << 32) ^ u64::from(size.to_bits());
        Ok(Self {
            data,
            index,
            size,
            id,
        })
    }

    /// Replaces the identity used to key caches.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// Returns the size in pixels per em.
    pub fn size(&self) -> f32 {
        self.size
    }

    fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.index).ok()
    }
}

impl Debug for SkrifaFont {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SkrifaFont")
            .field("index", &self.index)
            .field("size", &self.size)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl FontInstance for SkrifaFont {
    fn id(&self) -> u64 {
        self.id
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        let id = self.font_ref()?.charmap().map(ch)?.to_u32();
        (id != NOTDEF).then_some(id)
    }

    fn advance(&self, glyph_id: u32) -> f32 {
        self.font_ref()
            .and_then(|font| {
                font.glyph_metrics(Size::new(self.size), LocationRef::default())
                    .advance_width(GlyphId::new(glyph_id))
            })
            .unwrap_or_default()
    }

    fn glyph_outline(&self, glyph_id: u32) -> Option<BezPath> {
        let font = self.font_ref()?;
        let glyph = font.outline_glyphs().get(GlyphId::new(glyph_id))?;
        let mut pen = FlippedPath::default();
        let settings = DrawSettings::unhinted(Size::new(self.size), LocationRef::default());
        glyph.draw(settings, &mut pen).ok()?;
        Some(pen.0)
    }

    fn glyph_bounds(&self, glyph_id: u32) -> Option<Rect> {
        let bounds = self
            .font_ref()?
            .glyph_metrics(Size::new(self.size), LocationRef::default())
            .bounds(GlyphId::new(glyph_id))?;
        Some(Rect::new(
            f64::from(bounds.x_min),
            -f64::from(bounds.y_max),
            f64::from(bounds.x_max),
            -f64::from(bounds.y_min),
        ))
    }
}

// Font units grow upwards, layout coordinates grow downwards.
#[derive(Default)]
struct FlippedPath(BezPath);

impl OutlinePen for FlippedPath {
    #[inline]
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to((x, -y));
    }

    #[inline]
    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to((x, -y));
    }

    #[inline]
    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.0.quad_to((cx0, -cy0), (x, -y));
    }

    #[inline]
    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.0.curve_to((cx0, -cy0), (cx1, -cy1), (x, -y));
    }

    #[inline]
    fn close(&mut self) {
        self.0.close_path();
    }
}

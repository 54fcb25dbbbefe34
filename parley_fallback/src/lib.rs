// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph layout across a primary font and a chain of fallback fonts.
//!
//! Text is first laid out with the primary font. Characters that font cannot map become
//! [`FallbackRuns`] for the next font in the chain, which lays out only those characters, and so
//! on. The resulting levels are then merged into a single glyph stream with one consistent
//! horizontal advance, justification and visual order.
//!
//! The entry point is [`TextLayout::layout`]:
//!
//! ```
//! use std::sync::Arc;
//! use parley_fallback::{FontHandle, FontInstance, LayoutArgs, TextLayout};
//!
//! #[derive(Debug)]
//! struct Monospace(char);
//!
//! impl FontInstance for Monospace {
//!     fn id(&self) -> u64 {
//!         self.0 as u64
//!     }
//!     fn glyph_id(&self, ch: char) -> Option<u32> {
//!         (ch == self.0).then_some(1)
//!     }
//!     fn advance(&self, _glyph_id: u32) -> f32 {
//!         10.0
//!     }
//! }
//!
//! let text: Vec<char> = "ab".chars().collect();
//! let fonts: Vec<FontHandle> = vec![Arc::new(Monospace('a')), Arc::new(Monospace('b'))];
//! let args = LayoutArgs::new(&text, 0..2).unwrap();
//! let layout = TextLayout::layout(&args, &fonts).unwrap();
//! assert_eq!(layout.level_count(), 2);
//! assert_eq!(layout.text_width(), 20.0);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("parley_fallback requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

pub use peniko::kurbo;
pub use skrifa;
pub use text_primitives::{BidiDirection, BidiRun};

mod args;
mod draw;
mod error;
mod font;
mod glyph;
mod runs;
mod skrifa_font;
mod util;

pub mod layout;

#[cfg(test)]
mod tests;

pub use args::{LayoutArgs, LayoutOptions};
pub use draw::{GlyphRenderer, OutlineCache, PreparedGlyph};
pub use error::{Error, ErrorKind};
pub use font::{FontHandle, FontInstance, ShapedGlyph};
pub use glyph::{Glyph, NOTDEF};
pub use layout::{FallbackLayout, GlyphRun, TextLayout, MAX_FALLBACK};
pub use runs::FallbackRuns;
pub use skrifa_font::SkrifaFont;

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fundamental text property types.
//!
//! This crate is intended as a lightweight, `no_std`-friendly vocabulary layer shared between
//! text segmentation and glyph layout. It covers the directional runs handed over by bidi
//! segmentation and the compression classes of East-Asian full-width punctuation.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use text_primitives::{BidiDirection, BidiRun, PairPosition, asian_kerning};
//!
//! let run = BidiRun::new(4..9, BidiDirection::Rtl);
//! assert!(run.is_rtl());
//! assert_eq!(run.len(), 5);
//!
//! // An ideographic comma compresses when it is followed by more punctuation.
//! assert_eq!(asian_kerning('\u{3001}', PairPosition::First), -1);
//! ```
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
#![no_std]

mod asian;
mod bidi;

pub use asian::{asian_kerning, can_apply_asian_kerning, PairPosition};
pub use bidi::{BidiDirection, BidiRun};

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Various helper functions to assert truths during testing.

use std::vec::Vec;

use crate::TextLayout;

/// Assert that two lengths agree up to float noise.
#[track_caller]
pub(crate) fn assert_close(actual: f32, expected: f32, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "{what}: expected {expected}, got {actual}"
    );
}

/// Assert that every character of `chars` is drawn by exactly one glyph start.
#[track_caller]
pub(crate) fn assert_merge_complete(layout: &TextLayout, chars: core::ops::Range<usize>) {
    let glyphs = layout.merged_glyphs();
    for pos in chars {
        let owners: Vec<_> = glyphs
            .iter()
            .filter(|(_, glyph)| !glyph.is_in_cluster() && glyph.char_range().contains(&pos))
            .collect();
        assert_eq!(
            owners.len(),
            1,
            "character {pos} should be drawn by exactly one glyph, found {owners:?}"
        );
    }
}

// Copyright 2021 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers.

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "only needed when std is disabled")]
use core_maths::CoreFloat;

pub(crate) fn nearly_eq(x: f32, y: f32) -> bool {
    (x - y).abs() < f32::EPSILON
}

/// Width of the characters in `chars` according to a cumulative advance table starting at
/// `min_char`.
pub(crate) fn advance_between(dx: &[f32], min_char: usize, chars: core::ops::Range<usize>) -> f32 {
    let start = chars.start.saturating_sub(min_char).min(dx.len());
    let end = chars.end.saturating_sub(min_char).min(dx.len());
    if end <= start {
        return 0.;
    }
    let before = if start == 0 { 0. } else { dx[start - 1] };
    dx[end - 1] - before
}

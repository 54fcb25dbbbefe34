// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compression classes for East-Asian full-width punctuation.
//!
//! Full-width punctuation glyphs carry built-in white space on one side. When two of them meet,
//! part of that space is removed. The classes follow the adjustment rules of JIS X 4051 and are
//! expressed in quarters of the glyph's width.

/// Which member of an adjacent character pair is being classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairPosition {
    /// The leading character of the pair.
    First,
    /// The trailing character of the pair.
    Second,
}

/// Classes for U+3000..U+302F (CJK Symbols and Punctuation).
///
/// Negative values are closing marks with space after the ink, positive values are opening
/// brackets with space before it.
#[rustfmt::skip]
const CJK_SYMBOLS: [i8; 0x30] = [
     0, -1, -1,  0,   0,  0,  0,  0,   1, -1,  1, -1,   1, -1,  1, -1,
     1, -1,  0,  0,   1, -1,  1, -1,   0,  0,  0,  0,   0,  1, -1, -1,
     0,  0,  0,  0,   0,  0,  0,  0,   0,  0,  0,  0,   0,  0,  0,  0,
];

/// Returns the signed compression class of `c`, in quarters of the glyph width.
///
/// A pair `(a, b)` is compressed when both classes are non-zero and the smaller of
/// `asian_kerning(a, First)` and `-asian_kerning(b, Second)` is negative.
pub fn asian_kerning(c: char, position: PairPosition) -> i8 {
    let c = c as u32;
    if (0x3000..0x3030).contains(&c) {
        return CJK_SYMBOLS[(c - 0x3000) as usize];
    }
    match c {
        // Katakana middle dot has space on both sides.
        0x30FB => match position {
            PairPosition::First => -1,
            PairPosition::Second => 1,
        },
        0x2019 | 0x201D | 0xFF01 | 0xFF09 | 0xFF0C | 0xFF1A | 0xFF1B => -1,
        0x2018 | 0x201C | 0xFF08 => 1,
        _ => 0,
    }
}

/// Fast block test for characters that may take part in punctuation compression.
///
/// Covers CJK Symbols and Punctuation with the kana blocks (U+3000..U+30FF), the
/// Halfwidth and Fullwidth Forms (U+FF00..U+FFFF) and general quotation marks (U+2010..U+201F).
pub fn can_apply_asian_kerning(c: char) -> bool {
    let c = c as u32;
    (c & 0xFF00) == 0x3000 || (c & 0xFF00) == 0xFF00 || (c & 0xFFF0) == 0x2010
}

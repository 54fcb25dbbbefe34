// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// Resolved direction of a run of text.
///
/// For background on bidi behavior see UAX #9:
/// <https://www.unicode.org/reports/tr9/>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BidiDirection {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl BidiDirection {
    /// Returns the direction for an embedding level, odd levels being right-to-left.
    pub const fn from_level(level: u8) -> Self {
        if level & 1 != 0 {
            Self::Rtl
        } else {
            Self::Ltr
        }
    }
}

/// A directional run of characters, as produced by bidi segmentation.
///
/// Runs are half-open ranges of character indices. A layout request carries its runs in visual
/// order; the characters of a right-to-left run are laid out from the end of the range towards
/// its start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidiRun {
    /// First character index of the run.
    pub start: usize,
    /// One past the last character index of the run.
    pub end: usize,
    /// Direction of the run.
    pub direction: BidiDirection,
}

impl BidiRun {
    /// Creates a run covering `range` in the given direction.
    pub fn new(range: Range<usize>, direction: BidiDirection) -> Self {
        Self {
            start: range.start,
            end: range.end,
            direction,
        }
    }

    /// Creates a left-to-right run.
    pub fn ltr(range: Range<usize>) -> Self {
        Self::new(range, BidiDirection::Ltr)
    }

    /// Creates a right-to-left run.
    pub fn rtl(range: Range<usize>) -> Self {
        Self::new(range, BidiDirection::Rtl)
    }

    /// Returns the character range of the run.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns true if the run is laid out right-to-left.
    pub fn is_rtl(&self) -> bool {
        self.direction == BidiDirection::Rtl
    }

    /// Returns the number of characters in the run.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the run covers no characters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `index` lies inside the run.
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

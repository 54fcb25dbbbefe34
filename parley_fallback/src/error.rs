// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// Error returned when building a layout request or a fallback chain.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the range or count that was rejected. Layout
/// operations themselves never fail; they degrade to sentinel values instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The offending range, or `count..limit` for count-related errors.
    range: Range<usize>,

    /// The length the range was checked against.
    len: usize,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The range that was rejected.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub(crate) fn invalid_range(range: Range<usize>, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            range,
            len,
        }
    }

    pub(crate) fn invalid_run(run: Range<usize>, layout: Range<usize>) -> Self {
        Self {
            kind: ErrorKind::InvalidRun,
            range: run,
            len: layout.end,
        }
    }

    pub(crate) fn dx_array_length(found: usize, expected: usize) -> Self {
        Self {
            kind: ErrorKind::DxArrayLength,
            range: 0..found,
            len: expected,
        }
    }

    pub(crate) fn too_many_levels(limit: usize) -> Self {
        Self {
            kind: ErrorKind::TooManyLevels,
            range: limit..limit,
            len: limit,
        }
    }

    pub(crate) fn no_fonts() -> Self {
        Self {
            kind: ErrorKind::NoFonts,
            range: 0..0,
            len: 0,
        }
    }

    pub(crate) fn invalid_font(index: u32) -> Self {
        Self {
            kind: ErrorKind::InvalidFont,
            range: index as usize..index as usize,
            len: 0,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidRange => write!(
                f,
                "layout range {}..{} invalid for text of {} characters",
                self.range.start, self.range.end, self.len
            ),
            ErrorKind::InvalidRun => write!(
                f,
                "bidi run {}..{} outside of layout range ending at {}",
                self.range.start, self.range.end, self.len
            ),
            ErrorKind::DxArrayLength => write!(
                f,
                "advance table has {} entries, expected {}",
                self.range.end, self.len
            ),
            ErrorKind::TooManyLevels => {
                write!(f, "fallback chain is limited to {} levels", self.len)
            }
            ErrorKind::NoFonts => write!(f, "no fonts to lay out with"),
            ErrorKind::InvalidFont => {
                write!(f, "font data at index {} could not be read", self.range.start)
            }
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The layout range had `start > end` or extended past the text.
    InvalidRange,

    /// A bidi run was not contained in the layout range.
    InvalidRun,

    /// A per-character advance table did not have one entry per character.
    DxArrayLength,

    /// A fallback level was added beyond [`MAX_FALLBACK`](crate::MAX_FALLBACK).
    TooManyLevels,

    /// Layout was requested without any font.
    NoFonts,

    /// Font data could not be parsed.
    InvalidFont,
}

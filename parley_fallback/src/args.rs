// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout requests.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use text_primitives::BidiRun;

use crate::Error;

/// Script specific adjustments applied after layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Compress adjacent full-width punctuation.
    ///
    /// Ignored for vertical text and when a width or advance table is requested.
    pub asian_kerning: bool,

    /// Keep the kashida marks the font puts on glyphs, for Arabic justification.
    ///
    /// Without it no position is valid for kashida insertion.
    pub kashida_justification: bool,

    /// The text is set vertically.
    pub vertical: bool,
}

/// Everything needed to lay out one run of text.
///
/// The text is addressed by character index; `range` selects the characters to lay out and
/// every bidi run must lie inside it.
#[derive(Clone, Debug)]
pub struct LayoutArgs<'a> {
    text: &'a [char],
    range: Range<usize>,
    runs: Vec<BidiRun>,
    options: LayoutOptions,
    layout_width: Option<f32>,
    dx_array: Option<Vec<f32>>,
    orientation: f64,
}

impl<'a> LayoutArgs<'a> {
    /// Creates a request covering `range` of `text` as a single left-to-right run.
    pub fn new(text: &'a [char], range: Range<usize>) -> Result<Self, Error> {
        if range.start > range.end || range.end > text.len() {
            return Err(Error::invalid_range(range, text.len()));
        }
        Ok(Self {
            text,
            runs: vec![BidiRun::ltr(range.clone())],
            range,
            options: LayoutOptions::default(),
            layout_width: None,
            dx_array: None,
            orientation: 0.,
        })
    }

    /// Replaces the bidi runs.
    ///
    /// Runs are given in visual order, left to right, as produced by bidi reordering.
    pub fn with_runs(mut self, runs: impl IntoIterator<Item = BidiRun>) -> Result<Self, Error> {
        let runs: Vec<BidiRun> = runs.into_iter().collect();
        for run in &runs {
            if run.start > run.end || run.start < self.range.start || run.end > self.range.end {
                return Err(Error::invalid_run(run.range(), self.range.clone()));
            }
        }
        self.runs = runs;
        Ok(self)
    }

    /// Requests a cumulative per-character advance table.
    ///
    /// Entry `i` is the distance from the start of the layout to the end of character
    /// `range.start + i`.
    pub fn with_dx_array(mut self, dx_array: Vec<f32>) -> Result<Self, Error> {
        if dx_array.len() != self.range.len() {
            return Err(Error::dx_array_length(dx_array.len(), self.range.len()));
        }
        self.dx_array = Some(dx_array);
        Ok(self)
    }

    /// Requests that the layout be justified to `width`.
    pub fn with_layout_width(mut self, width: f32) -> Self {
        self.layout_width = (width > 0.).then_some(width);
        self
    }

    /// Sets the script specific options.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the writing orientation in degrees, counterclockwise.
    pub fn with_orientation(mut self, degrees: f64) -> Self {
        self.orientation = degrees;
        self
    }

    /// Returns the full text the range indexes into.
    pub fn text(&self) -> &'a [char] {
        self.text
    }

    /// Returns the range of characters to lay out.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Returns the bidi runs in visual order.
    pub fn runs(&self) -> &[BidiRun] {
        &self.runs
    }

    /// Returns the script specific options.
    pub fn options(&self) -> LayoutOptions {
        self.options
    }

    /// Returns the requested justified width, if any.
    pub fn layout_width(&self) -> Option<f32> {
        self.layout_width
    }

    /// Returns the requested cumulative advance table, if any.
    pub fn dx_array(&self) -> Option<&[f32]> {
        self.dx_array.as_deref()
    }

    /// Returns the orientation in degrees.
    pub fn orientation(&self) -> f64 {
        self.orientation
    }
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use peniko::kurbo::{Point, Vec2};
use smallvec::{smallvec, SmallVec};

use super::{measure, GlyphRun, MAX_FALLBACK};
use crate::runs::RunCursor;
use crate::util::{advance_between, nearly_eq};
use crate::{Error, FallbackRuns, Glyph, LayoutArgs, LayoutOptions};

/// A primary layout together with the fallback layouts for what it could not render.
///
/// Level 0 is the primary font. Level `k` is authoritative over the characters in
/// [`fallback_runs(k)`](Self::fallback_runs), which the level before it could not render.
/// After [`adjust_layout`](Self::adjust_layout) every character is drawn by exactly one level
/// and the glyphs of all levels share one horizontal cursor.
#[derive(Clone, Debug)]
pub struct FallbackLayout {
    /// Working copy, merged.
    levels: Vec<GlyphRun>,
    /// Pristine copy, as laid out.
    laid_out: Vec<GlyphRun>,
    /// `runs[k - 1]` holds the characters level `k` is authoritative over.
    runs: Vec<FallbackRuns>,
    /// Characters the deepest level could not render either.
    unresolved: FallbackRuns,
    incomplete: bool,
    min_char: usize,
    end_char: usize,
    draw_base: Point,
    draw_offset: Vec2,
}

/// Decides which level draws a character.
#[derive(Clone, Copy)]
struct Resolver<'a> {
    runs: &'a [FallbackRuns],
    unresolved: &'a FallbackRuns,
}

impl Resolver<'_> {
    /// The first level that does not hand the character on wins. If every level hands it
    /// on, nothing can render it and the base level shows its placeholder.
    fn winner(&self, pos: usize) -> usize {
        (0..=self.runs.len())
            .find(|&level| !self.runs.get(level).unwrap_or(self.unresolved).contains(pos))
            .unwrap_or(0)
    }
}

impl FallbackLayout {
    /// Creates a layout with `base` as level 0.
    ///
    /// `unresolved` is what laying out `base` returned; it becomes the authority of the first
    /// fallback level.
    pub fn new(base: GlyphRun, unresolved: FallbackRuns) -> Self {
        Self {
            min_char: base.min_char,
            end_char: base.end_char,
            levels: vec![base.clone()],
            laid_out: vec![base],
            runs: Vec::new(),
            unresolved,
            incomplete: false,
            draw_base: Point::ZERO,
            draw_offset: Vec2::ZERO,
        }
    }

    /// Appends a fallback level laid out over [`unresolved`](Self::unresolved).
    ///
    /// `unresolved` is what laying out `layout` returned. Fails once [`MAX_FALLBACK`] levels
    /// exist.
    pub fn add_fallback(&mut self, layout: GlyphRun, unresolved: FallbackRuns) -> Result<(), Error> {
        if self.levels.len() >= MAX_FALLBACK {
            log::warn!(
                "dropping fallback level for characters {:?}: limit of {MAX_FALLBACK} reached",
                self.unresolved.iter().collect::<Vec<_>>()
            );
            return Err(Error::too_many_levels(MAX_FALLBACK));
        }
        self.runs
            .push(core::mem::replace(&mut self.unresolved, unresolved));
        if self.incomplete {
            self.unresolved.clear();
        }
        self.levels.push(layout.clone());
        self.laid_out.push(layout);
        Ok(())
    }

    /// Marks the fallback chain as deliberately cut short.
    ///
    /// Characters the deepest level could not render are then drawn by that level instead of
    /// by the base level.
    pub fn set_incomplete(&mut self, incomplete: bool) {
        self.incomplete = incomplete;
        if incomplete {
            self.unresolved.clear();
        }
    }

    /// Returns true if the fallback chain was cut short.
    pub fn is_incomplete(&self) -> bool {
        self.incomplete
    }

    /// Returns the number of levels, including the base level.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Returns the glyphs of one level.
    pub fn level(&self, level: usize) -> Option<&GlyphRun> {
        self.levels.get(level)
    }

    /// Returns all levels, base level first.
    pub fn levels(&self) -> &[GlyphRun] {
        &self.levels
    }

    /// Returns the characters fallback level `level` is authoritative over.
    ///
    /// The base level has no such set.
    pub fn fallback_runs(&self, level: usize) -> Option<&FallbackRuns> {
        self.runs.get(level.checked_sub(1)?)
    }

    /// Returns the characters the deepest level could not render.
    pub fn unresolved(&self) -> &FallbackRuns {
        &self.unresolved
    }

    /// Returns the range of characters laid out.
    pub fn char_range(&self) -> Range<usize> {
        self.min_char..self.end_char
    }

    /// Returns the point in output space where the layout starts.
    pub fn draw_base(&self) -> Point {
        self.draw_base
    }

    /// Sets the point in output space where the layout starts.
    pub fn set_draw_base(&mut self, base: Point) {
        self.draw_base = base;
    }

    /// Returns the offset applied to all levels before rotation.
    pub fn draw_offset(&self) -> Vec2 {
        self.draw_offset
    }

    /// Sets the offset applied to all levels before rotation.
    pub fn set_draw_offset(&mut self, offset: Vec2) {
        self.draw_offset = offset;
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver {
            runs: &self.runs,
            unresolved: &self.unresolved,
        }
    }

    /// Returns the level that draws the character at `pos`.
    pub fn winning_level(&self, pos: usize) -> usize {
        self.resolver().winner(pos)
    }

    /// Adjusts every level to `args` and merges them into one glyph stream.
    ///
    /// Always starts from the levels as they were laid out, so it can be called repeatedly.
    pub fn adjust_layout(&mut self, args: &LayoutArgs<'_>) {
        self.levels.clone_from(&self.laid_out);
        let dx = match args.dx_array() {
            Some(dx) => Some(dx.to_vec()),
            None => args.layout_width().and_then(|width| self.justified_dx(width)),
        };
        // Widths are only ever applied through the shared table; levels never justify alone.
        let options = LayoutOptions {
            asian_kerning: args.options().asian_kerning && args.layout_width().is_none(),
            ..args.options()
        };
        for level in &mut self.levels {
            level.adjust(args.text(), dx.as_deref(), None, options);
        }
        self.finish(dx.as_deref());
    }

    /// Justifies the merged stream to `width`, starting over from the laid out levels.
    ///
    /// Adjustments from an earlier [`adjust_layout`](Self::adjust_layout) are discarded.
    pub fn justify(&mut self, width: f32) {
        self.levels.clone_from(&self.laid_out);
        let dx = self.justified_dx(width);
        if let Some(dx) = &dx {
            for level in &mut self.levels {
                level.apply_dx_array(dx);
            }
        }
        self.finish(dx.as_deref());
    }

    /// Builds a cumulative advance table that brings the characters to `width`.
    ///
    /// Natural widths come from the level that draws each character. Expanding shares the extra
    /// space equally over the characters with a positive width. Compressing follows
    /// [`GlyphRun::justify`]: the last such character keeps its width and ends at `width`, the
    /// positions before it are scaled towards the start, and each width becomes the gap to the
    /// next character. Returns `None` if there is nothing to justify.
    fn justified_dx(&self, width: f32) -> Option<Vec<f32>> {
        let resolver = self.resolver();
        let tables: Vec<Vec<f32>> = self
            .laid_out
            .iter()
            .map(|level| {
                let mut widths = Vec::new();
                level.fill_dx_array(&mut widths);
                widths
            })
            .collect();
        let mut widths: Vec<f32> = (self.min_char..self.end_char)
            .enumerate()
            .map(|(i, pos)| {
                tables[resolver.winner(pos)]
                    .get(i)
                    .copied()
                    .unwrap_or_default()
            })
            .collect();
        let natural: f32 = widths.iter().sum();
        if natural == 0. || nearly_eq(natural, width) {
            return None;
        }

        if width < natural {
            let last = widths.iter().rposition(|&w| w > 0.)?;
            let last_width = widths[last];
            let old_span = natural - last_width;
            if old_span <= 0. {
                return None;
            }
            let new_span = width.max(last_width) - last_width;
            let squeeze = new_span / old_span;
            let mut end = 0.;
            for (i, w) in widths.iter_mut().enumerate() {
                end += *w;
                *w = if i < last {
                    end * squeeze
                } else {
                    new_span + last_width
                };
            }
            return Some(widths);
        }

        let mut stretchable = widths.iter().filter(|&&w| w > 0.).count();
        let mut remaining = width - natural;
        let mut total = 0.;
        for w in &mut widths {
            if *w > 0. {
                let share = remaining / stretchable as f32;
                stretchable -= 1;
                remaining -= share;
                *w += share;
            }
            total += *w;
            *w = total;
        }
        if let Some(last) = widths.last_mut() {
            *last = width;
        }
        Some(widths)
    }

    /// Simplifies the adjusted levels and merges them.
    fn finish(&mut self, dx: Option<&[f32]>) {
        let deepest = self.levels.len() - 1;
        for (k, level) in self.levels.iter_mut().enumerate().skip(1) {
            level.simplify(k == deepest && self.incomplete);
            if level.is_empty() {
                log::debug!("fallback level {k} has no glyphs left, releasing it");
                level.glyphs = Vec::new();
            }
        }
        self.merge(dx);
    }

    /// Interleaves the levels into one stream along a shared horizontal cursor.
    ///
    /// The base level drives the walk. For each of its glyphs the winning level places a
    /// visually contiguous group of glyphs at the cursor. When a fallback level wins, the base
    /// level's placeholders for the same characters are dropped.
    fn merge(&mut self, dx: Option<&[f32]>) {
        let level_count = self.levels.len();
        let window = self.min_char..self.end_char;
        let resolver = Resolver {
            runs: &self.runs,
            unresolved: &self.unresolved,
        };
        let mut cursors: SmallVec<[usize; MAX_FALLBACK]> = smallvec![0; level_count];
        let mut run_cursors: SmallVec<[RunCursor; MAX_FALLBACK]> =
            smallvec![RunCursor::default(); level_count.saturating_sub(1)];
        let mut x = 0.;

        loop {
            let mut next = cursors[0];
            let Some((base_index, base)) = self.levels[0].next_glyph(&mut next, window.clone())
            else {
                break;
            };
            let pos = base.char_index;
            let mut level = resolver.winner(pos);
            let mut first = base_index;
            let mut serving = window.clone();

            if level > 0 {
                let found = run_cursors[level - 1]
                    .run_at(&self.runs[level - 1], pos)
                    .and_then(|run| {
                        let mut cursor = cursors[level];
                        while let Some((index, glyph)) =
                            self.levels[level].next_glyph(&mut cursor, run.clone())
                        {
                            if glyph.char_range().contains(&pos) {
                                return Some((index, run));
                            }
                        }
                        None
                    });
                match found {
                    Some((index, run)) => {
                        let skipped = cursors[level]..index;
                        for skip in skipped {
                            self.levels[level].drop_glyph(skip);
                        }
                        first = index;
                        serving = run;
                    }
                    None => {
                        log::debug!(
                            "no glyph for character {pos} in fallback level {level}, using base level"
                        );
                        level = 0;
                    }
                }
            }

            let scanned = self.levels[level].scan_run(first, serving, |glyph| {
                resolver.winner(glyph.char_index) == level
            });
            let advance = match dx {
                Some(dx) => advance_between(dx, self.min_char, scanned.chars.clone()),
                None => scanned.advance,
            };
            self.levels[level].move_glyph(first, x);
            log::trace!(
                "placed characters {:?} from level {level} at {x}",
                scanned.chars
            );

            if level == 0 {
                cursors[0] = scanned.end;
            } else {
                self.levels[0].drop_glyph(base_index);
                cursors[0] = next;
                loop {
                    let mut peek = cursors[0];
                    match self.levels[0].next_glyph(&mut peek, window.clone()) {
                        Some((index, glyph)) if scanned.chars.contains(&glyph.char_index) => {
                            self.levels[0].drop_glyph(index);
                            cursors[0] = peek;
                        }
                        _ => break,
                    }
                }
                cursors[level] = scanned.end;
                run_cursors[level - 1].advance_past(&self.runs[level - 1], &scanned.chars);
            }
            x += advance;
        }

        for (k, level) in self.levels.iter_mut().enumerate().skip(1) {
            let mut unplaced = 0;
            for glyph in level.glyphs.iter_mut().skip(cursors[k]) {
                if !glyph.is_dropped() {
                    glyph.drop_glyph();
                    unplaced += 1;
                }
            }
            if unplaced > 0 {
                log::debug!("discarding {unplaced} unplaced glyphs of fallback level {k}");
            }
        }
        for level in &mut self.levels {
            level.simplify(true);
        }
    }

    /// Returns the sum of the advances of all levels.
    pub fn text_width(&self) -> f32 {
        self.levels.iter().map(GlyphRun::text_width).sum()
    }

    /// Returns the width of the characters in `skip_start..skip_start + amount` across levels.
    pub fn partial_text_width(&self, skip_start: usize, amount: usize) -> f32 {
        self.levels
            .iter()
            .map(|level| level.partial_text_width(skip_start, amount))
            .sum()
    }

    /// Fills `widths` with one advance per character and returns the total width.
    ///
    /// Deeper levels are consulted first; a character keeps the first non-zero width found.
    pub fn fill_dx_array(&self, widths: &mut Vec<f32>) -> f32 {
        widths.clear();
        widths.resize(self.end_char - self.min_char, 0.);
        let mut level_widths = Vec::new();
        for level in self.levels.iter().rev() {
            level.fill_dx_array(&mut level_widths);
            for (width, level_width) in widths.iter_mut().zip(&level_widths) {
                if *width == 0. {
                    *width = *level_width;
                }
            }
        }
        self.text_width()
    }

    /// Returns the interleaved left and right caret positions of each character.
    ///
    /// See [`GlyphRun::caret_positions`].
    pub fn caret_positions(&self) -> Vec<Option<f32>> {
        let mut carets = vec![None; 2 * (self.end_char - self.min_char)];
        for level in &self.levels {
            level.fill_carets(&mut carets);
        }
        carets
    }

    /// Returns the first character at which the accumulated width exceeds `max_width`.
    ///
    /// See [`GlyphRun::text_break`].
    pub fn text_break(&self, max_width: f32, extra: f32, factor: f32) -> Option<usize> {
        let mut widths = Vec::new();
        self.fill_dx_array(&mut widths);
        measure::text_break(&widths, self.min_char, max_width, extra, factor)
    }

    /// Returns true if a kashida may be inserted before the character at `pos`.
    ///
    /// The base level is asked first. If it cannot render `pos`, the first fallback level
    /// covering both `pos` and `pos + 1` decides.
    pub fn is_kashida_pos_valid(&self, pos: usize) -> bool {
        if self.levels[0].is_kashida_pos_valid(pos) {
            return true;
        }
        self.runs
            .iter()
            .zip(&self.levels[1..])
            .find(|(runs, _)| runs.contains(pos) && runs.contains(pos + 1))
            .is_some_and(|(_, level)| level.is_kashida_pos_valid(pos))
    }

    /// Returns the glyphs of all levels with their level index, ordered by position.
    pub fn merged_glyphs(&self) -> Vec<(usize, Glyph)> {
        let mut glyphs: Vec<(usize, Glyph)> = self
            .levels
            .iter()
            .enumerate()
            .flat_map(|(k, level)| level.live_glyphs().map(move |glyph| (k, *glyph)))
            .collect();
        glyphs.sort_by(|a, b| a.1.x.total_cmp(&b.1.x));
        glyphs
    }
}

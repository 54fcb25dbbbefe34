// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character intervals delegated to a fallback level.

use core::ops::Range;

use smallvec::SmallVec;

/// An ordered set of disjoint, half-open character intervals.
///
/// A layout pass records here the characters its font could not render. The next fallback
/// level is then authoritative over exactly these intervals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FallbackRuns {
    runs: SmallVec<[Range<usize>; 4]>,
}

impl FallbackRuns {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single character position.
    pub fn add_pos(&mut self, pos: usize) {
        self.add_run(pos..pos + 1);
    }

    /// Adds an interval, merging it with any interval it overlaps or touches.
    pub fn add_run(&mut self, run: Range<usize>) {
        if run.is_empty() {
            return;
        }
        // First interval that ends at or after the new start can absorb it.
        let first = self.runs.partition_point(|r| r.end < run.start);
        let mut merged = run;
        let mut last = first;
        while last < self.runs.len() && self.runs[last].start <= merged.end {
            merged.start = merged.start.min(self.runs[last].start);
            merged.end = merged.end.max(self.runs[last].end);
            last += 1;
        }
        if first == last {
            self.runs.insert(first, merged);
        } else {
            self.runs[first] = merged;
            self.runs.drain(first + 1..last);
        }
    }

    /// Returns true if `pos` lies in any interval.
    pub fn contains(&self, pos: usize) -> bool {
        self.index_of(pos).is_some()
    }

    /// Returns the interval containing `pos`.
    pub fn run_at(&self, pos: usize) -> Option<Range<usize>> {
        self.index_of(pos).map(|index| self.runs[index].clone())
    }

    /// Returns true if there are no intervals.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Returns the number of intervals.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Returns an iterator over the intervals in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.runs.iter().cloned()
    }

    /// Returns the parts of the intervals that lie inside `range`, in ascending order.
    pub fn intersect(&self, range: Range<usize>) -> impl Iterator<Item = Range<usize>> + '_ {
        let Range { start, end } = range;
        let first = self.runs.partition_point(|r| r.end <= start);
        self.runs[first..]
            .iter()
            .take_while(move |r| r.start < end)
            .map(move |r| r.start.max(start)..r.end.min(end))
            .filter(|r| !r.is_empty())
    }

    /// Removes all intervals.
    pub fn clear(&mut self) {
        self.runs.clear();
    }

    fn index_of(&self, pos: usize) -> Option<usize> {
        let index = self.runs.partition_point(|r| r.end <= pos);
        self.runs
            .get(index)
            .filter(|r| r.start <= pos)
            .map(|_| index)
    }
}

impl FromIterator<Range<usize>> for FallbackRuns {
    fn from_iter<I: IntoIterator<Item = Range<usize>>>(iter: I) -> Self {
        let mut runs = Self::new();
        for run in iter {
            runs.add_run(run);
        }
        runs
    }
}

/// Walking position of the merge inside one [`FallbackRuns`].
///
/// Lookups start at the interval served last, which is the common case while a run is being
/// consumed, and fall back to a binary search when the text jumps (for example across a
/// right-to-left run).
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct RunCursor {
    index: usize,
}

impl RunCursor {
    pub(crate) fn run_at(&mut self, runs: &FallbackRuns, pos: usize) -> Option<Range<usize>> {
        if let Some(run) = runs.runs.get(self.index) {
            if run.contains(&pos) {
                return Some(run.clone());
            }
        }
        let index = runs.index_of(pos)?;
        self.index = index;
        Some(runs.runs[index].clone())
    }

    /// Moves past the interval containing the last consumed character.
    pub(crate) fn advance_past(&mut self, runs: &FallbackRuns, consumed: &Range<usize>) {
        while let Some(run) = runs.runs.get(self.index) {
            if run.end > consumed.end {
                break;
            }
            self.index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FallbackRuns, RunCursor};
    use alloc::vec::Vec;

    #[test]
    fn adjacent_positions_merge() {
        let mut runs = FallbackRuns::new();
        runs.add_pos(3);
        runs.add_pos(4);
        runs.add_pos(1);
        runs.add_pos(2);
        assert_eq!(runs.iter().collect::<Vec<_>>(), [1..5]);
    }

    #[test]
    fn bridging_run_collapses_neighbors() {
        let mut runs: FallbackRuns = [0..2, 4..6, 8..9].into_iter().collect();
        assert_eq!(runs.len(), 3);
        runs.add_run(1..5);
        assert_eq!(runs.iter().collect::<Vec<_>>(), [0..6, 8..9]);
    }

    #[test]
    fn lookup_is_half_open() {
        let runs: FallbackRuns = [2..4, 7..8].into_iter().collect();
        assert!(!runs.contains(1));
        assert!(runs.contains(2));
        assert!(runs.contains(3));
        assert!(!runs.contains(4));
        assert_eq!(runs.run_at(7), Some(7..8));
        assert_eq!(runs.run_at(8), None);
    }

    #[test]
    fn intersect_clips_to_range() {
        let runs: FallbackRuns = [0..3, 5..9, 12..14].into_iter().collect();
        let parts: Vec<_> = runs.intersect(2..13).collect();
        assert_eq!(parts, [2..3, 5..9, 12..13]);
        assert_eq!(runs.intersect(3..5).count(), 0);
    }

    #[test]
    fn cursor_follows_consumption() {
        let runs: FallbackRuns = [1..3, 5..6].into_iter().collect();
        let mut cursor = RunCursor::default();
        assert_eq!(cursor.run_at(&runs, 2), Some(1..3));
        cursor.advance_past(&runs, &(1..3));
        assert_eq!(cursor.index, 1);
        assert_eq!(cursor.run_at(&runs, 5), Some(5..6));
        // Jumping backwards still resolves.
        assert_eq!(cursor.run_at(&runs, 1), Some(1..3));
        assert_eq!(cursor.run_at(&runs, 4), None);
    }
}

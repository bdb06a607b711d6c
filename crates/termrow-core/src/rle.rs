//! Run-length-encoded sequences.
//!
//! Both per-column stores in this crate are RLE: the width-run table maps
//! code units to column counts (`Rle<u8>`), and the attribute row maps
//! columns to text attributes (`Rle<TextAttribute>`). Terminal rows are
//! dominated by long homogeneous stretches, so `(value, length)` pairs are
//! far more compact than a per-unit array.
//!
//! The distinguishing operation is [`Rle::splice`]: replace an arbitrary
//! expanded-index range with a new run sequence, possibly changing the
//! total length. The glyph writer leans on it for both the exact-fit and
//! spillover paths.

use smallvec::SmallVec;

/// A run of consecutive identical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run<T> {
    /// The value repeated across this run.
    pub value: T,
    /// Number of consecutive elements with this value. Never zero in a
    /// stored run.
    pub length: usize,
}

impl<T> Run<T> {
    /// Create a run of `length` copies of `value`.
    pub const fn new(value: T, length: usize) -> Self {
        Self { value, length }
    }
}

/// Run-length-encoded sequence.
///
/// Stored runs are always non-empty and adjacent runs always hold distinct
/// values; every mutator re-coalesces at the boundaries it touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rle<T> {
    runs: Vec<Run<T>>,
    total: usize,
}

impl<T: Copy + PartialEq> Default for Rle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + PartialEq> Rle<T> {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self {
            runs: Vec::new(),
            total: 0,
        }
    }

    /// Create a sequence of `length` copies of `value`.
    pub fn with_run(value: T, length: usize) -> Self {
        if length == 0 {
            return Self::new();
        }
        Self {
            runs: vec![Run::new(value, length)],
            total: length,
        }
    }

    /// Total expanded length (sum of all run lengths).
    #[inline]
    pub fn len(&self) -> usize {
        self.total
    }

    /// Whether the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// The runs, in order.
    #[inline]
    pub fn runs(&self) -> &[Run<T>] {
        &self.runs
    }

    /// Number of distinct runs.
    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Value at an expanded index, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<T> {
        let (run_idx, _) = self.find_run(index)?;
        Some(self.runs[run_idx].value)
    }

    /// Append `count` copies of `value`, merging into the last run when the
    /// values match.
    pub fn extend_with(&mut self, value: T, count: usize) {
        if count == 0 {
            return;
        }
        if let Some(last) = self.runs.last_mut()
            && last.value == value
        {
            last.length += count;
        } else {
            self.runs.push(Run::new(value, count));
        }
        self.total += count;
    }

    /// Shorten the sequence to `new_len` elements. No-op if already shorter.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.total {
            return;
        }
        if new_len == 0 {
            self.runs.clear();
            self.total = 0;
            return;
        }
        let mut accumulated = 0;
        for (i, run) in self.runs.iter_mut().enumerate() {
            if accumulated + run.length >= new_len {
                run.length = new_len - accumulated;
                let keep = if run.length == 0 { i } else { i + 1 };
                self.runs.truncate(keep);
                self.total = new_len;
                return;
            }
            accumulated += run.length;
        }
    }

    /// Resize to `new_len`, padding with `value` or truncating.
    pub fn resize_with(&mut self, new_len: usize, value: T) {
        if new_len > self.total {
            self.extend_with(value, new_len - self.total);
        } else {
            self.truncate(new_len);
        }
    }

    /// Overwrite the expanded range `[start, end)` with `value`.
    ///
    /// The range is clamped to the current length; the total length never
    /// changes.
    pub fn set_range(&mut self, start: usize, end: usize, value: T) {
        let start = start.min(self.total);
        let end = end.clamp(start, self.total);
        if start == end {
            return;
        }
        self.splice(start, end, &[Run::new(value, end - start)]);
    }

    /// Replace the expanded range `[start, end)` with `replacement`.
    ///
    /// The replacement may cover more or fewer elements than the range it
    /// displaces; the total length changes accordingly. Runs are
    /// re-coalesced across both seams. Zero-length replacement runs are
    /// skipped.
    pub fn splice(&mut self, start: usize, end: usize, replacement: &[Run<T>]) {
        debug_assert!(start <= end && end <= self.total);
        let start = start.min(self.total);
        let end = end.clamp(start, self.total);

        let mut out: Vec<Run<T>> = Vec::with_capacity(self.runs.len() + replacement.len());
        let mut tail: SmallVec<[Run<T>; 4]> = SmallVec::new();
        let mut pos = 0;
        for run in &self.runs {
            let run_start = pos;
            let run_end = pos + run.length;
            pos = run_end;
            if run_end <= start {
                push_run(&mut out, run.value, run.length);
            } else if run_start < start {
                push_run(&mut out, run.value, start - run_start);
            }
            if run_start >= end {
                tail.push(*run);
            } else if run_end > end {
                tail.push(Run::new(run.value, run_end - end));
            }
        }

        let mut inserted = 0;
        for run in replacement {
            inserted += run.length;
            push_run(&mut out, run.value, run.length);
        }
        for run in tail {
            push_run(&mut out, run.value, run.length);
        }

        self.total = self.total - (end - start) + inserted;
        self.runs = out;
    }

    /// Iterate the expanded values.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.runs
            .iter()
            .flat_map(|run| std::iter::repeat_n(run.value, run.length))
    }

    /// Find the run covering an expanded index.
    ///
    /// Returns `(run_index, offset_within_run)`, or `None` past the end.
    fn find_run(&self, index: usize) -> Option<(usize, usize)> {
        let mut accumulated = 0;
        for (i, run) in self.runs.iter().enumerate() {
            if accumulated + run.length > index {
                return Some((i, index - accumulated));
            }
            accumulated += run.length;
        }
        None
    }
}

/// Append a run, merging with the previous one when the values match.
fn push_run<T: Copy + PartialEq>(out: &mut Vec<Run<T>>, value: T, length: usize) {
    if length == 0 {
        return;
    }
    if let Some(last) = out.last_mut()
        && last.value == value
    {
        last.length += length;
    } else {
        out.push(Run::new(value, length));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expanded(rle: &Rle<u8>) -> Vec<u8> {
        rle.iter().collect()
    }

    #[test]
    fn new_is_empty() {
        let rle: Rle<u8> = Rle::new();
        assert!(rle.is_empty());
        assert_eq!(rle.len(), 0);
        assert_eq!(rle.run_count(), 0);
    }

    #[test]
    fn with_run_single() {
        let rle = Rle::with_run(7u8, 5);
        assert_eq!(rle.len(), 5);
        assert_eq!(rle.run_count(), 1);
        assert_eq!(rle.get(0), Some(7));
        assert_eq!(rle.get(4), Some(7));
        assert_eq!(rle.get(5), None);
    }

    #[test]
    fn extend_with_merges_matching_tail() {
        let mut rle = Rle::with_run(1u8, 3);
        rle.extend_with(1, 2);
        assert_eq!(rle.run_count(), 1);
        rle.extend_with(2, 1);
        assert_eq!(rle.run_count(), 2);
        assert_eq!(rle.len(), 6);
    }

    #[test]
    fn truncate_inside_run() {
        let mut rle = Rle::with_run(1u8, 4);
        rle.extend_with(2, 4);
        rle.truncate(6);
        assert_eq!(rle.len(), 6);
        assert_eq!(expanded(&rle), vec![1, 1, 1, 1, 2, 2]);
    }

    #[test]
    fn truncate_on_run_boundary_drops_empty_run() {
        let mut rle = Rle::with_run(1u8, 4);
        rle.extend_with(2, 4);
        rle.truncate(4);
        assert_eq!(rle.run_count(), 1);
        assert_eq!(rle.len(), 4);
    }

    #[test]
    fn resize_pads_and_truncates() {
        let mut rle = Rle::with_run(1u8, 2);
        rle.resize_with(5, 9);
        assert_eq!(expanded(&rle), vec![1, 1, 9, 9, 9]);
        rle.resize_with(1, 0);
        assert_eq!(expanded(&rle), vec![1]);
    }

    #[test]
    fn set_range_splits_run() {
        let mut rle = Rle::with_run(1u8, 6);
        rle.set_range(2, 4, 9);
        assert_eq!(expanded(&rle), vec![1, 1, 9, 9, 1, 1]);
        assert_eq!(rle.run_count(), 3);
    }

    #[test]
    fn set_range_clamps_to_length() {
        let mut rle = Rle::with_run(1u8, 4);
        rle.set_range(2, 100, 9);
        assert_eq!(rle.len(), 4);
        assert_eq!(expanded(&rle), vec![1, 1, 9, 9]);
    }

    #[test]
    fn splice_equal_length() {
        let mut rle = Rle::with_run(1u8, 5);
        rle.splice(1, 4, &[Run::new(2, 1), Run::new(0, 2)]);
        assert_eq!(expanded(&rle), vec![1, 2, 0, 0, 1]);
        assert_eq!(rle.len(), 5);
    }

    #[test]
    fn splice_grows_total() {
        let mut rle = Rle::with_run(1u8, 3);
        rle.splice(1, 2, &[Run::new(2, 1), Run::new(0, 3)]);
        assert_eq!(expanded(&rle), vec![1, 2, 0, 0, 0, 1]);
        assert_eq!(rle.len(), 6);
    }

    #[test]
    fn splice_shrinks_total() {
        let mut rle = Rle::with_run(1u8, 6);
        rle.splice(1, 5, &[Run::new(3, 1)]);
        assert_eq!(expanded(&rle), vec![1, 3, 1]);
        assert_eq!(rle.len(), 3);
    }

    #[test]
    fn splice_coalesces_across_seams() {
        let mut rle = Rle::with_run(1u8, 4);
        rle.splice(1, 3, &[Run::new(1, 2)]);
        assert_eq!(rle.run_count(), 1);
        assert_eq!(rle.len(), 4);
    }

    #[test]
    fn splice_skips_empty_replacement_runs() {
        let mut rle = Rle::with_run(1u8, 3);
        rle.splice(1, 2, &[Run::new(2, 1), Run::new(0, 0)]);
        assert_eq!(expanded(&rle), vec![1, 2, 1]);
        assert_eq!(rle.run_count(), 3);
    }

    #[test]
    fn splice_whole_sequence() {
        let mut rle = Rle::with_run(1u8, 4);
        rle.splice(0, 4, &[Run::new(5, 2)]);
        assert_eq!(expanded(&rle), vec![5, 5]);
    }

    #[test]
    fn splice_at_tail_is_append() {
        let mut rle = Rle::with_run(1u8, 2);
        rle.splice(2, 2, &[Run::new(2, 3)]);
        assert_eq!(expanded(&rle), vec![1, 1, 2, 2, 2]);
    }

    #[test]
    fn get_walks_runs() {
        let mut rle = Rle::with_run(1u8, 2);
        rle.extend_with(2, 3);
        rle.extend_with(3, 1);
        assert_eq!(rle.get(0), Some(1));
        assert_eq!(rle.get(2), Some(2));
        assert_eq!(rle.get(4), Some(2));
        assert_eq!(rle.get(5), Some(3));
        assert_eq!(rle.get(6), None);
    }
}

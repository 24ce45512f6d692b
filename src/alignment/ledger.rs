use std::ops::Range;

// @module: Word timestamp consumption tracking

/// Record of which word timestamp indices are already assigned to a segment.
///
/// Sized once to the word timestamp count. An index is consumed at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumptionLedger {
    consumed: Vec<bool>,
    consumed_count: usize,
}

impl ConsumptionLedger {
    /// Create an empty ledger for `word_count` word timestamps
    pub fn new(word_count: usize) -> Self {
        Self {
            consumed: vec![false; word_count],
            consumed_count: 0,
        }
    }

    /// Number of word timestamps tracked
    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }

    /// Number of consumed indices
    pub fn consumed_count(&self) -> usize {
        self.consumed_count
    }

    /// Out-of-range indices report as consumed so they are never offered.
    pub fn is_consumed(&self, index: usize) -> bool {
        self.consumed.get(index).copied().unwrap_or(true)
    }

    /// First consumed index inside `range`, if any
    pub fn first_consumed_in(&self, range: Range<usize>) -> Option<usize> {
        range.into_iter().find(|&index| self.is_consumed(index))
    }

    /// Whether every index in `range` is still available
    pub fn is_range_free(&self, range: Range<usize>) -> bool {
        self.first_consumed_in(range).is_none()
    }

    /// Mark every index in `range` as consumed.
    ///
    /// All or nothing: returns `false` and leaves the ledger untouched when the
    /// range is empty, out of bounds, or overlaps an already consumed index.
    pub fn consume(&mut self, range: Range<usize>) -> bool {
        if range.is_empty() || !self.is_range_free(range.clone()) {
            return false;
        }

        let width = range.len();
        for flag in &mut self.consumed[range] {
            *flag = true;
        }
        self.consumed_count += width;
        true
    }

    /// Consumed indices in ascending order
    pub fn consumed_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.consumed
            .iter()
            .enumerate()
            .filter_map(|(index, &consumed)| consumed.then_some(index))
    }
}

//! Interval index for overlap queries
//!
//! Uses rust-lapper for O(log n + k) interval queries. Lapper wants
//! unsigned half-open intervals, so signed inclusive bounds are shifted into
//! u128 keys; the shift preserves order and leaves room for `end + 1`.

use crate::core::range::Range;
use rust_lapper::{Interval, Lapper};

/// Type alias for indexed spans; the value is the span's position in the input
pub type SpanInterval = Interval<u128, usize>;

/// Index over a fixed list of ranges
///
/// Queries return the positions (into the list given to [`SpanIndex::new`])
/// of every range that overlaps the query.
pub struct SpanIndex {
    lapper: Lapper<u128, usize>,
}

#[inline]
fn key(value: i64) -> u128 {
    (value as i128 - i64::MIN as i128) as u128
}

impl SpanIndex {
    /// Build the index; position `i` refers to the `i`-th range yielded
    pub fn new<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = Range>,
    {
        let intervals: Vec<SpanInterval> = ranges
            .into_iter()
            .enumerate()
            .map(|(position, range)| Interval {
                start: key(range.start()),
                stop: key(range.end()) + 1,
                val: position,
            })
            .collect();
        Self {
            lapper: Lapper::new(intervals),
        }
    }

    /// Positions of every indexed range overlapping `range`
    pub fn overlapping(&self, range: &Range) -> impl Iterator<Item = usize> + '_ {
        self.lapper
            .find(key(range.start()), key(range.end()) + 1)
            .map(|iv| iv.val)
    }

    /// Position of the range containing `value`, if any
    ///
    /// With disjoint inputs there is at most one.
    pub fn containing(&self, value: i64) -> Option<usize> {
        self.overlapping(&Range::point(value)).next()
    }

    pub fn len(&self) -> usize {
        self.lapper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lapper.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: i64, end: i64) -> Range {
        Range::new(start, end).unwrap()
    }

    fn create_test_index() -> SpanIndex {
        SpanIndex::new(vec![r(100, 199), r(250, 349), r(-50, -1), r(400, 400)])
    }

    #[test]
    fn test_index_creation() {
        let index = create_test_index();
        assert_eq!(index.len(), 4);
        assert!(!index.is_empty());
        assert!(SpanIndex::new(Vec::new()).is_empty());
    }

    #[test]
    fn test_query_basic() {
        let index = create_test_index();
        let hits: Vec<usize> = index.overlapping(&r(150, 160)).collect();
        assert_eq!(hits, vec![0]);
    }

    #[test]
    fn test_query_inclusive_bounds() {
        let index = create_test_index();
        assert_eq!(index.overlapping(&r(199, 199)).collect::<Vec<_>>(), vec![0]);
        assert_eq!(index.overlapping(&r(200, 249)).count(), 0);
        assert_eq!(index.overlapping(&r(400, 400)).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_query_multiple_overlaps() {
        let index = create_test_index();
        let mut hits: Vec<usize> = index.overlapping(&r(-10, 1000)).collect();
        hits.sort_unstable();
        assert_eq!(hits, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_containing() {
        let index = create_test_index();
        assert_eq!(index.containing(-1), Some(2));
        assert_eq!(index.containing(0), None);
        assert_eq!(index.containing(300), Some(1));
    }

    #[test]
    fn test_extreme_bounds() {
        let index = SpanIndex::new(vec![r(i64::MIN, i64::MIN), r(i64::MAX, i64::MAX)]);
        assert_eq!(index.containing(i64::MIN), Some(0));
        assert_eq!(index.containing(i64::MAX), Some(1));
        assert_eq!(index.containing(0), None);
    }
}

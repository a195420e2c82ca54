//! Inclusive integer intervals
//!
//! `Range` is the value type every other module builds on. All operations
//! are pure and total: they never panic, and arithmetic that could leave the
//! i64 domain is checked.

use crate::core::error::{RangeError, RangeResult};
use std::fmt;

/// Inclusive closed interval `[start, end]` with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Range {
    start: i64,
    end: i64,
}

impl Range {
    /// Create a range, rejecting `start > end`
    ///
    /// # Examples
    /// ```
    /// use fast_rangemap::Range;
    /// assert!(Range::new(3, 7).is_ok());
    /// assert!(Range::new(7, 3).is_err());
    /// ```
    pub fn new(start: i64, end: i64) -> RangeResult<Self> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Single-point range `[value, value]`
    pub fn point(value: i64) -> Self {
        Self { start: value, end: value }
    }

    /// Build `[start, start + length - 1]` from a `(start, length)` pair
    ///
    /// # Examples
    /// ```
    /// use fast_rangemap::Range;
    /// let r = Range::from_start_len(79, 14).unwrap();
    /// assert_eq!((r.start(), r.end()), (79, 92));
    /// ```
    pub fn from_start_len(start: i64, length: i64) -> RangeResult<Self> {
        if length < 1 {
            return Err(RangeError::EmptyLength { start, length });
        }
        let end = start
            .checked_add(length - 1)
            .ok_or(RangeError::Overflow { value: start, delta: length - 1 })?;
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Number of integers covered (saturates at `u64::MAX` for the full i64 span)
    pub fn len(&self) -> u64 {
        self.end.abs_diff(self.start).saturating_add(1)
    }

    /// A valid range always holds at least one integer
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        self.start <= value && value <= self.end
    }

    /// True when the two ranges share at least one integer
    #[inline]
    pub fn overlaps(&self, other: &Range) -> bool {
        self.end >= other.start && other.end >= self.start
    }

    /// Common sub-range, or `None` when the ranges are disjoint
    ///
    /// # Examples
    /// ```
    /// use fast_rangemap::Range;
    /// let a = Range::new(0, 10).unwrap();
    /// let b = Range::new(5, 20).unwrap();
    /// assert_eq!(a.intersect(&b), Some(Range::new(5, 10).unwrap()));
    /// assert_eq!(a.intersect(&Range::point(11)), None);
    /// ```
    #[inline]
    pub fn intersect(&self, other: &Range) -> Option<Range> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start > end {
            return None;
        }
        Some(Range { start, end })
    }

    /// The parts of `self` that `cutter` does not touch
    ///
    /// Yields zero, one or two ranges: the piece left of `cutter` and the
    /// piece right of it. A disjoint cutter leaves `self` whole.
    ///
    /// # Examples
    /// ```
    /// use fast_rangemap::Range;
    /// let target = Range::new(0, 10).unwrap();
    /// let pieces: Vec<_> = target.trim(&Range::new(3, 4).unwrap()).collect();
    /// assert_eq!(pieces, vec![Range::new(0, 2).unwrap(), Range::new(5, 10).unwrap()]);
    /// ```
    pub fn trim(&self, cutter: &Range) -> impl Iterator<Item = Range> {
        let pieces = if !self.overlaps(cutter) {
            [Some(*self), None]
        } else {
            // Bounds are strict, so the +-1 stays inside [self.start, self.end].
            let left = (self.start < cutter.start).then(|| Range {
                start: self.start,
                end: cutter.start - 1,
            });
            let right = (cutter.end < self.end).then(|| Range {
                start: cutter.end + 1,
                end: self.end,
            });
            [left, right]
        };
        pieces.into_iter().flatten()
    }

    /// Shift both bounds by `delta`
    pub fn offset(&self, delta: i64) -> RangeResult<Range> {
        let start = self
            .start
            .checked_add(delta)
            .ok_or(RangeError::Overflow { value: self.start, delta })?;
        let end = self
            .end
            .checked_add(delta)
            .ok_or(RangeError::Overflow { value: self.end, delta })?;
        Ok(Range { start, end })
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Remove every cutter from `target`, keeping whatever survives all of them
pub fn trim_all<'a, I>(target: Range, cutters: I) -> Vec<Range>
where
    I: IntoIterator<Item = &'a Range>,
{
    cutters.into_iter().fold(vec![target], |pieces, cutter| {
        pieces
            .iter()
            .flat_map(|piece| piece.trim(cutter))
            .collect()
    })
}

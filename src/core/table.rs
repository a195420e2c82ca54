//! Conversion rows and tables
//!
//! A `ConversionTable` maps one named type onto another through a set of
//! rows with pairwise-disjoint source ranges. Integers outside every row map
//! to themselves.

use crate::core::error::{RangeError, RangeResult};
use crate::core::range::Range;

/// One explicit mapping: `source` shifted by `increment` lands on `destination`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversionRow {
    source: Range,
    destination: Range,
    increment: i64,
}

impl ConversionRow {
    /// Build a row from a source and destination range of equal size
    pub fn new(source: Range, destination: Range) -> RangeResult<Self> {
        if source.len() != destination.len() {
            return Err(RangeError::LengthMismatch {
                source_len: source.len(),
                destination_len: destination.len(),
            });
        }
        let increment = destination
            .start()
            .checked_sub(source.start())
            .ok_or(RangeError::Overflow {
                value: destination.start(),
                delta: source.start(),
            })?;
        Ok(Self { source, destination, increment })
    }

    /// Build a row by shifting `source` by `increment`
    pub fn shifted(source: Range, increment: i64) -> RangeResult<Self> {
        let destination = source.offset(increment)?;
        Ok(Self { source, destination, increment })
    }

    /// Build a row from the `(destination_start, source_start, length)` triple
    ///
    /// # Examples
    /// ```
    /// use fast_rangemap::ConversionRow;
    /// let row = ConversionRow::from_triple(52, 50, 48).unwrap();
    /// assert_eq!(row.increment(), 2);
    /// assert_eq!(row.source().end(), 97);
    /// assert_eq!(row.destination().end(), 99);
    /// ```
    pub fn from_triple(destination_start: i64, source_start: i64, length: i64) -> RangeResult<Self> {
        let source = Range::from_start_len(source_start, length)?;
        let destination = Range::from_start_len(destination_start, length)?;
        Self::new(source, destination)
    }

    #[inline]
    pub fn source(&self) -> Range {
        self.source
    }

    #[inline]
    pub fn destination(&self) -> Range {
        self.destination
    }

    #[inline]
    pub fn increment(&self) -> i64 {
        self.increment
    }

    /// Mapped value if `value` lies in this row's source range
    #[inline]
    pub fn apply(&self, value: i64) -> Option<i64> {
        // In-range values land inside `destination`, which is a valid range.
        self.source
            .contains(value)
            .then(|| value + self.increment)
    }
}

/// Named partial mapping from `source_type` to `destination_type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTable {
    source_type: String,
    destination_type: String,
    rows: Vec<ConversionRow>,
}

impl ConversionTable {
    /// Build a table, rejecting rows whose source ranges overlap
    pub fn new(
        source_type: impl Into<String>,
        destination_type: impl Into<String>,
        rows: Vec<ConversionRow>,
    ) -> RangeResult<Self> {
        check_disjoint(&rows)?;
        Ok(Self::from_disjoint_rows(source_type, destination_type, rows))
    }

    /// Table with no rows: every integer maps to itself
    pub fn identity(source_type: impl Into<String>, destination_type: impl Into<String>) -> Self {
        Self::from_disjoint_rows(source_type, destination_type, Vec::new())
    }

    /// Build from rows already known to be disjoint
    pub(crate) fn from_disjoint_rows(
        source_type: impl Into<String>,
        destination_type: impl Into<String>,
        rows: Vec<ConversionRow>,
    ) -> Self {
        debug_assert!(check_disjoint(&rows).is_ok(), "rows must be disjoint");
        Self {
            source_type: source_type.into(),
            destination_type: destination_type.into(),
            rows,
        }
    }

    pub fn source_type(&self) -> &str {
        &self.source_type
    }

    pub fn destination_type(&self) -> &str {
        &self.destination_type
    }

    pub fn rows(&self) -> &[ConversionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Map a single value: the owning row's increment, or identity
    ///
    /// Linear in the row count; `RangeQuery` offers indexed lookups.
    ///
    /// # Examples
    /// ```
    /// use fast_rangemap::{ConversionRow, ConversionTable};
    /// let table = ConversionTable::new("seed", "soil", vec![
    ///     ConversionRow::from_triple(50, 98, 2).unwrap(),
    ///     ConversionRow::from_triple(52, 50, 48).unwrap(),
    /// ]).unwrap();
    /// assert_eq!(table.evaluate(79), 81);
    /// assert_eq!(table.evaluate(14), 14);
    /// ```
    pub fn evaluate(&self, value: i64) -> i64 {
        self.rows
            .iter()
            .find_map(|row| row.apply(value))
            .unwrap_or(value)
    }

    /// Copy of the rows ordered by source start
    pub fn sorted_rows(&self) -> Vec<ConversionRow> {
        let mut rows = self.rows.clone();
        rows.sort_unstable_by_key(|row| row.source().start());
        rows
    }

    /// Equivalent table with adjacent equal-increment rows merged
    ///
    /// Rows come back ordered by source start.
    pub fn coalesced(&self) -> Self {
        let mut merged: Vec<ConversionRow> = Vec::with_capacity(self.rows.len());
        for row in self.sorted_rows() {
            if let Some(last) = merged.last_mut() {
                let adjacent = last.source.end().checked_add(1) == Some(row.source.start());
                if adjacent && last.increment == row.increment {
                    // Both bounds already exist, so the merged ranges are valid.
                    last.source = Range::new(last.source.start(), row.source.end())
                        .unwrap_or(last.source);
                    last.destination = Range::new(last.destination.start(), row.destination.end())
                        .unwrap_or(last.destination);
                    continue;
                }
            }
            merged.push(row);
        }
        Self::from_disjoint_rows(self.source_type.clone(), self.destination_type.clone(), merged)
    }
}

fn check_disjoint(rows: &[ConversionRow]) -> RangeResult<()> {
    let mut sources: Vec<Range> = rows.iter().map(|row| row.source()).collect();
    sources.sort_unstable();
    for pair in sources.windows(2) {
        if pair[0].overlaps(&pair[1]) {
            return Err(RangeError::OverlappingRows {
                first: pair[0],
                second: pair[1],
            });
        }
    }
    Ok(())
}

//! Minimum-image queries over a flattened table
//!
//! Point mode maps individual integers. Range mode finds the smallest image
//! of a set of ranges without visiting every integer in them:
//! 1. Each query range contributes its smallest integer no row covers
//!    (identity maps it to itself).
//! 2. Rows are walked in ascending destination start; an intersecting row
//!    contributes `max(query.start, source.start) + increment`.
//! 3. The walk stops once a row's destination start cannot beat the best
//!    value found so far.

use crate::core::index::SpanIndex;
use crate::core::range::Range;
use crate::core::table::{ConversionRow, ConversionTable};
use log::{debug, trace};
use rayon::prelude::*;
use std::str::FromStr;

/// Behaviour of range-mode queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompatMode {
    /// Exact search: identity gaps are candidates and the row walk only stops
    /// once no later row can do better
    #[default]
    Improved,
    /// Published algorithm: the first row (by destination start) whose source
    /// intersects any query range gives the answer; `None` if no row does
    Strict,
}

impl CompatMode {
    /// Check if strict mode is enabled
    pub fn is_strict(&self) -> bool {
        matches!(self, CompatMode::Strict)
    }
}

impl FromStr for CompatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "improved" | "default" => Ok(CompatMode::Improved),
            "strict" | "published" => Ok(CompatMode::Strict),
            other => Err(format!("unknown compatibility mode '{}'", other)),
        }
    }
}

/// Query session over one flattened table
///
/// Holds private sorted copies of the rows, so the table itself is never
/// reordered and the session can be shared across threads.
pub struct RangeQuery {
    table: ConversionTable,
    by_source: Vec<ConversionRow>,
    by_destination: Vec<ConversionRow>,
    index: SpanIndex,
    compat_mode: CompatMode,
}

impl RangeQuery {
    pub fn new(table: ConversionTable) -> Self {
        Self::with_compat_mode(table, CompatMode::default())
    }

    /// Create a session with the given compatibility mode
    pub fn with_compat_mode(table: ConversionTable, compat_mode: CompatMode) -> Self {
        let by_source = table.sorted_rows();
        let mut by_destination = table.rows().to_vec();
        by_destination.sort_by_key(|row| row.destination().start());
        let index = SpanIndex::new(by_source.iter().map(|row| row.source()));
        Self {
            table,
            by_source,
            by_destination,
            index,
            compat_mode,
        }
    }

    pub fn set_compat_mode(&mut self, mode: CompatMode) {
        self.compat_mode = mode;
    }

    pub fn compat_mode(&self) -> CompatMode {
        self.compat_mode
    }

    /// The table being queried
    pub fn table(&self) -> &ConversionTable {
        &self.table
    }

    /// Image of one value: the owning row's increment, or identity
    pub fn evaluate_point(&self, value: i64) -> i64 {
        self.index
            .containing(value)
            .and_then(|position| self.by_source[position].apply(value))
            .unwrap_or(value)
    }

    /// Smallest image over `values`; `None` when `values` is empty
    pub fn min_over_points(&self, values: &[i64]) -> Option<i64> {
        values
            .par_iter()
            .map(|&value| self.evaluate_point(value))
            .min()
    }

    /// Smallest image over every integer in `ranges`; `None` when `ranges` is empty
    ///
    /// In [`CompatMode::Strict`] this also returns `None` when no row
    /// intersects any range.
    pub fn min_over_ranges(&self, ranges: &[Range]) -> Option<i64> {
        let found = match self.compat_mode {
            CompatMode::Improved => self.min_over_ranges_exact(ranges),
            CompatMode::Strict => self.min_over_ranges_published(ranges),
        };
        debug!(
            "range query over {} ranges and {} rows ({:?}): {:?}",
            ranges.len(),
            self.by_destination.len(),
            self.compat_mode,
            found
        );
        found
    }

    /// Smallest integer of `range` that no row covers
    pub fn first_unmapped(&self, range: &Range) -> Option<i64> {
        let mut overlapping: Vec<Range> = self
            .index
            .overlapping(range)
            .map(|position| self.by_source[position].source())
            .collect();
        overlapping.sort_unstable();

        let mut cursor = range.start();
        for source in overlapping {
            if source.start() > cursor {
                return Some(cursor);
            }
            // Rows are disjoint and sorted, so coverage is contiguous up to here.
            cursor = match source.end().checked_add(1) {
                Some(next) if next <= range.end() => next,
                _ => return None,
            };
        }
        Some(cursor)
    }

    fn min_over_ranges_exact(&self, ranges: &[Range]) -> Option<i64> {
        let mut best = ranges
            .iter()
            .filter_map(|range| self.first_unmapped(range))
            .min();
        trace!("identity floor: {:?}", best);

        for row in &self.by_destination {
            if best.is_some_and(|b| row.destination().start() >= b) {
                break;
            }
            if let Some(candidate) = row_minimum(row, ranges) {
                best = Some(best.map_or(candidate, |b| b.min(candidate)));
            }
        }
        best
    }

    fn min_over_ranges_published(&self, ranges: &[Range]) -> Option<i64> {
        self.by_destination
            .iter()
            .find_map(|row| row_minimum(row, ranges))
    }
}

/// Smallest image `row` gives to any query range it intersects
fn row_minimum(row: &ConversionRow, ranges: &[Range]) -> Option<i64> {
    ranges
        .iter()
        .filter_map(|range| range.intersect(&row.source()))
        .map(|shared| shared.start() + row.increment())
        .min()
}

/// Image of `value` under `table`
pub fn evaluate_point(table: &ConversionTable, value: i64) -> i64 {
    table.evaluate(value)
}

/// Smallest image of `values` under `table`
pub fn min_over_points(table: &ConversionTable, values: &[i64]) -> Option<i64> {
    values.iter().map(|&value| table.evaluate(value)).min()
}

/// Smallest image of every integer in `ranges` under `table`
pub fn min_over_ranges(table: &ConversionTable, ranges: &[Range]) -> Option<i64> {
    RangeQuery::new(table.clone()).min_over_ranges(ranges)
}

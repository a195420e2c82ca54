//! FastRangeMap - Piecewise range-mapping composition
//!
//! Composes chains of partial integer mapping tables into one flattened
//! table and answers minimum-image queries over points or huge ranges.
//!
//! # Features
//!
//! - Interval algebra that keeps the implicit identity through every step
//! - O(1) chain lookups by type name while flattening
//! - Range minimums without enumerating the integers in a range
//! - Parallel composition with rayon
//!
//! # Example
//!
//! ```
//! use fast_rangemap::{ConversionRow, ConversionTable, Range, RangeQuery, TableChain};
//!
//! let chain = TableChain::new(vec![
//!     ConversionTable::new("seed", "soil", vec![
//!         ConversionRow::from_triple(50, 98, 2)?,
//!         ConversionRow::from_triple(52, 50, 48)?,
//!     ])?,
//!     ConversionTable::new("soil", "location", vec![
//!         ConversionRow::from_triple(0, 60, 10)?,
//!     ])?,
//! ])?;
//!
//! let query = RangeQuery::new(chain.flatten("seed", "location")?);
//! assert_eq!(query.evaluate_point(79), 81);
//! assert_eq!(query.min_over_ranges(&[Range::from_start_len(55, 13)?]), Some(0));
//! # Ok::<(), fast_rangemap::RangeMapError>(())
//! ```

pub mod almanac;
pub mod core;

// Re-export commonly used types
pub use crate::core::{
    compose, flatten, AlmanacError, ChainError, CompatMode, ConversionRow, ConversionTable,
    FlattenOptions, Range, RangeError, RangeMapError, RangeQuery, Result, TableChain,
};
pub use crate::almanac::Almanac;

//! Core range-mapping functionality
//!
//! This module contains the range primitives, conversion tables, the
//! interval index, and the composition and query algorithms.

mod compose;
mod error;
mod flatten;
mod index;
mod query;
mod range;
mod table;

pub use compose::compose;
pub use error::{
    AlmanacError, ChainError, ChainResult, RangeError, RangeMapError, RangeResult, Result,
};
pub use flatten::{flatten, FlattenOptions, TableChain};
pub use index::{SpanIndex, SpanInterval};
pub use query::{evaluate_point, min_over_points, min_over_ranges, CompatMode, RangeQuery};
pub use range::{trim_all, Range};
pub use table::{ConversionRow, ConversionTable};

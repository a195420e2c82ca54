//! Error types for FastRangeMap
//!
//! Defines all error types used throughout the library.

use crate::core::range::Range;
use thiserror::Error;

/// Main error type for FastRangeMap operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeMapError {
    /// Range or row construction errors
    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    /// Table chaining errors
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    /// Almanac input errors
    #[error("Almanac error: {0}")]
    Almanac(#[from] AlmanacError),
}

/// Errors raised while building ranges, rows and tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Inverted range
    #[error("Invalid range: start ({start}) > end ({end})")]
    InvalidRange { start: i64, end: i64 },

    /// Source and destination of a row differ in size
    #[error("Row is not length-preserving: source spans {source_len}, destination spans {destination_len}")]
    LengthMismatch { source_len: u64, destination_len: u64 },

    /// A (start, length) pair with a non-positive length
    #[error("Range starting at {start} has non-positive length {length}")]
    EmptyLength { start: i64, length: i64 },

    /// Shifting a value left the i64 domain
    #[error("Offsetting {value} by {delta} overflows a 64-bit integer")]
    Overflow { value: i64, delta: i64 },

    /// Two rows of one table claim the same source integer
    #[error("Rows overlap in source space: {first} and {second}")]
    OverlappingRows { first: Range, second: Range },
}

/// Errors raised while composing or flattening tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// `first.destination_type != second.source_type`
    #[error("Cannot compose: first table ends at '{first_destination}' but second starts at '{second_source}'")]
    ChainMismatch {
        first_destination: String,
        second_source: String,
    },

    /// No table starts at the requested type
    #[error("No table with source type '{0}'")]
    MissingTable(String),

    /// The chain stops before reaching the end type
    #[error("Chain broken at '{at}': no table continues towards '{end_type}'")]
    BrokenChain { at: String, end_type: String },

    /// Two tables share a source type, so the chain would branch
    #[error("More than one table has source type '{0}'")]
    DuplicateSource(String),

    /// The walk came back to a type it already visited
    #[error("Chain revisits type '{at}'")]
    Cycle { at: String },
}

/// Errors raised by the almanac facade
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlmanacError {
    /// Seed ranges come in (start, length) pairs
    #[error("Seed list has {0} values, expected (start, length) pairs")]
    OddSeedCount(usize),
}

/// Result type alias for FastRangeMap operations
pub type Result<T> = std::result::Result<T, RangeMapError>;

/// Result type alias for range and row construction
pub type RangeResult<T> = std::result::Result<T, RangeError>;

/// Result type alias for chaining operations
pub type ChainResult<T> = std::result::Result<T, ChainError>;

//! Composition of two chained tables
//!
//! `compose(first: X→Y, second: Y→Z)` produces one `X→Z` table. Both inputs
//! are partial maps extended with the identity, so every integer falls in
//! one of four cases:
//!
//! 1. Covered by `first`, then by `second`: the *claimed* rows, with the two
//!    increments added.
//! 2. Covered by `first`, then by `second`'s identity: the *leftover* parts of
//!    `first`'s source ranges once claimed rows are cut out.
//! 3. Reaches Y through `first`'s identity, then covered by `second`: the
//!    *passthrough* parts of `second`'s source ranges once `first`'s source
//!    ranges are cut out.
//! 4. Identity on both sides: no row.
//!
//! The three row sets are pairwise disjoint in X, so the result is a valid
//! table.

use crate::core::error::{ChainError, RangeError, Result};
use crate::core::index::SpanIndex;
use crate::core::range::{trim_all, Range};
use crate::core::table::{ConversionRow, ConversionTable};
use log::{debug, trace};
use rayon::prelude::*;

/// Compose two tables whose types chain (`first.destination == second.source`)
///
/// # Examples
/// ```
/// use fast_rangemap::{compose, ConversionRow, ConversionTable};
/// let first = ConversionTable::new("a", "b", vec![
///     ConversionRow::from_triple(10, 0, 5).unwrap(),   // [0,4] -> [10,14]
/// ]).unwrap();
/// let second = ConversionTable::new("b", "c", vec![
///     ConversionRow::from_triple(100, 12, 10).unwrap(), // [12,21] -> [100,109]
/// ]).unwrap();
/// let merged = compose(&first, &second).unwrap();
/// assert_eq!(merged.source_type(), "a");
/// assert_eq!(merged.destination_type(), "c");
/// assert_eq!(merged.evaluate(0), 10);   // first, then second's identity
/// assert_eq!(merged.evaluate(3), 101);  // both rows
/// assert_eq!(merged.evaluate(15), 103); // first's identity, then second
/// assert_eq!(merged.evaluate(40), 40);  // identity on both sides
/// ```
pub fn compose(first: &ConversionTable, second: &ConversionTable) -> Result<ConversionTable> {
    if first.destination_type() != second.source_type() {
        return Err(ChainError::ChainMismatch {
            first_destination: first.destination_type().to_string(),
            second_source: second.source_type().to_string(),
        }
        .into());
    }

    let first_rows = first.rows();
    let images = SpanIndex::new(first_rows.iter().map(|row| row.destination()));
    let domain = SpanIndex::new(first_rows.iter().map(|row| row.source()));

    // Y-space pass over `second`: passthrough pieces and claimed rows per row.
    let per_row: Vec<(Vec<ConversionRow>, Vec<ConversionRow>)> = second
        .rows()
        .par_iter()
        .map(|row| -> Result<_> {
            let target = row.source();

            let cutters: Vec<Range> = domain
                .overlapping(&target)
                .map(|position| first_rows[position].source())
                .collect();
            let passthrough = trim_all(target, cutters.iter())
                .into_iter()
                .map(|piece| ConversionRow::shifted(piece, row.increment()))
                .collect::<std::result::Result<Vec<_>, _>>()?;

            let mut claimed = Vec::new();
            for position in images.overlapping(&target) {
                let upstream = &first_rows[position];
                let Some(shared) = upstream.destination().intersect(&target) else {
                    continue;
                };
                // Back to X: this slice of Y was produced by `upstream`.
                let back = upstream.increment().checked_neg().ok_or(RangeError::Overflow {
                    value: shared.start(),
                    delta: upstream.increment(),
                })?;
                let source = shared.offset(back)?;
                let increment = upstream
                    .increment()
                    .checked_add(row.increment())
                    .ok_or(RangeError::Overflow {
                        value: upstream.increment(),
                        delta: row.increment(),
                    })?;
                claimed.push(ConversionRow::shifted(source, increment)?);
            }

            Ok((passthrough, claimed))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::new();
    let mut claimed = Vec::new();
    for (passthrough, claimed_here) in per_row {
        rows.extend(passthrough);
        claimed.extend(claimed_here);
    }

    // X-space pass over `first`: whatever no claimed row took keeps `first`'s shift.
    let claimed_index = SpanIndex::new(claimed.iter().map(|row| row.source()));
    let leftover: Vec<Vec<ConversionRow>> = first_rows
        .par_iter()
        .map(|row| -> Result<_> {
            let cutters: Vec<Range> = claimed_index
                .overlapping(&row.source())
                .map(|position| claimed[position].source())
                .collect();
            trim_all(row.source(), cutters.iter())
                .into_iter()
                .map(|piece| ConversionRow::shifted(piece, row.increment()).map_err(Into::into))
                .collect()
        })
        .collect::<Result<Vec<_>>>()?;

    let passthrough_count = rows.len();
    let claimed_count = claimed.len();
    rows.extend(claimed);
    rows.extend(leftover.into_iter().flatten());

    debug!(
        "composed {}->{} ({} rows) with {}->{} ({} rows): {} passthrough, {} claimed, {} leftover",
        first.source_type(),
        first.destination_type(),
        first.len(),
        second.source_type(),
        second.destination_type(),
        second.len(),
        passthrough_count,
        claimed_count,
        rows.len() - passthrough_count - claimed_count,
    );
    trace!("composed rows: {:?}", rows);

    Ok(ConversionTable::from_disjoint_rows(
        first.source_type(),
        second.destination_type(),
        rows,
    ))
}

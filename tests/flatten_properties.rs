//! Property-based tests for chain flattening
//!
//! **Feature: fast-rangemap, Properties: point/flatten equivalence, chain failures**

use fast_rangemap::core::{ChainError, FlattenOptions};
use fast_rangemap::{ConversionRow, ConversionTable, Range, RangeMapError, TableChain};
use proptest::prelude::*;

const TYPES: &[&str] = &["seed", "soil", "fertilizer", "water", "light", "location"];

fn arb_rows() -> impl Strategy<Value = Vec<ConversionRow>> {
    (
        prop::collection::btree_set(0i64..200, 0..12),
        prop::collection::vec(-80i64..80, 6),
    )
        .prop_map(|(bounds, increments)| {
            let bounds: Vec<i64> = bounds.into_iter().collect();
            bounds
                .chunks_exact(2)
                .zip(increments)
                .map(|(pair, inc)| {
                    ConversionRow::shifted(Range::new(pair[0], pair[1]).unwrap(), inc).unwrap()
                })
                .collect()
        })
}

/// A full seed-to-location chain, delivered in shuffled order
fn arb_chain() -> impl Strategy<Value = Vec<ConversionTable>> {
    prop::collection::vec(arb_rows(), TYPES.len() - 1)
        .prop_map(|all_rows| {
            all_rows
                .into_iter()
                .enumerate()
                .map(|(i, rows)| ConversionTable::new(TYPES[i], TYPES[i + 1], rows).unwrap())
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The flattened table agrees with evaluating every table in sequence
    #[test]
    fn prop_flatten_matches_stepwise(tables in arb_chain()) {
        let chain = TableChain::new(tables).unwrap();
        let flat = chain.flatten("seed", "location").unwrap();
        prop_assert_eq!(flat.source_type(), "seed");
        prop_assert_eq!(flat.destination_type(), "location");
        for v in -100i64..300 {
            prop_assert_eq!(
                flat.evaluate(v),
                chain.convert(v, "seed", "location").unwrap(),
                "value {}",
                v
            );
        }
    }

    /// Coalescing between steps never changes the mapping
    #[test]
    fn prop_coalesce_preserves_mapping(tables in arb_chain()) {
        let chain = TableChain::new(tables).unwrap();
        let plain = chain.flatten("seed", "location").unwrap();
        let merged = chain
            .flatten_with("seed", "location", FlattenOptions::coalesced())
            .unwrap();
        prop_assert!(merged.len() <= plain.len());
        for v in -100i64..300 {
            prop_assert_eq!(merged.evaluate(v), plain.evaluate(v));
        }
    }

    /// Removing any intermediate table breaks the chain at that type
    #[test]
    fn prop_missing_link_is_broken_chain(tables in arb_chain(), gap in 1usize..5) {
        let missing = TYPES[gap];
        let remaining: Vec<ConversionTable> = tables
            .into_iter()
            .filter(|t| t.source_type() != missing)
            .collect();
        let chain = TableChain::new(remaining).unwrap();
        prop_assert_eq!(
            chain.flatten("seed", "location").unwrap_err(),
            RangeMapError::Chain(ChainError::BrokenChain {
                at: missing.to_string(),
                end_type: "location".to_string(),
            })
        );
    }
}

#[test]
fn test_missing_start_table() {
    let chain = TableChain::new(vec![ConversionTable::identity("soil", "location")]).unwrap();
    assert_eq!(
        chain.flatten("seed", "location").unwrap_err(),
        RangeMapError::Chain(ChainError::MissingTable("seed".to_string()))
    );
}

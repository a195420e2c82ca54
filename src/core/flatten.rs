//! Flattening a chain of tables
//!
//! A `TableChain` keys every table by its source type once, then walks the
//! chain from a start type to an end type in O(1) per step. Flattening folds
//! each step into the running table with [`compose`].

use crate::core::compose::compose;
use crate::core::error::{ChainError, ChainResult, Result};
use crate::core::table::ConversionTable;
use log::debug;
use std::collections::{HashMap, HashSet};

/// Options for [`TableChain::flatten_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlattenOptions {
    /// Merge adjacent equal-increment rows after every composition step
    pub coalesce: bool,
}

impl FlattenOptions {
    pub fn coalesced() -> Self {
        Self { coalesce: true }
    }
}

/// Tables indexed by source type
#[derive(Debug, Clone, Default)]
pub struct TableChain {
    tables: HashMap<String, ConversionTable>,
}

impl TableChain {
    /// Index the tables by source type
    ///
    /// Fails with `DuplicateSource` when two tables share a source type,
    /// since the chain would branch there.
    pub fn new<I>(tables: I) -> ChainResult<Self>
    where
        I: IntoIterator<Item = ConversionTable>,
    {
        let mut indexed = HashMap::new();
        for table in tables {
            let key = table.source_type().to_string();
            if indexed.contains_key(&key) {
                return Err(ChainError::DuplicateSource(key));
            }
            indexed.insert(key, table);
        }
        Ok(Self { tables: indexed })
    }

    /// Table whose source type is `source_type`
    pub fn get(&self, source_type: &str) -> Option<&ConversionTable> {
        self.tables.get(source_type)
    }

    /// All source types present in the chain
    pub fn source_types(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|s| s.as_str())
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Tables visited going from `start_type` to `end_type`, in order
    ///
    /// Empty when `start_type == end_type`.
    pub fn path(&self, start_type: &str, end_type: &str) -> ChainResult<Vec<&ConversionTable>> {
        let mut steps = Vec::new();
        if start_type == end_type {
            return Ok(steps);
        }

        let mut current = self
            .get(start_type)
            .ok_or_else(|| ChainError::MissingTable(start_type.to_string()))?;
        let mut visited = HashSet::from([start_type]);
        steps.push(current);

        while current.destination_type() != end_type {
            let at = current.destination_type();
            if !visited.insert(at) {
                return Err(ChainError::Cycle { at: at.to_string() });
            }
            current = self.get(at).ok_or_else(|| ChainError::BrokenChain {
                at: at.to_string(),
                end_type: end_type.to_string(),
            })?;
            steps.push(current);
        }
        Ok(steps)
    }

    /// Single table mapping `start_type` directly to `end_type`
    ///
    /// # Examples
    /// ```
    /// use fast_rangemap::{ConversionRow, ConversionTable, TableChain};
    /// let chain = TableChain::new(vec![
    ///     ConversionTable::new("b", "c", vec![ConversionRow::from_triple(0, 10, 5).unwrap()]).unwrap(),
    ///     ConversionTable::new("a", "b", vec![ConversionRow::from_triple(10, 0, 5).unwrap()]).unwrap(),
    /// ]).unwrap();
    /// let flat = chain.flatten("a", "c").unwrap();
    /// assert_eq!(flat.evaluate(3), 3);
    /// assert_eq!(flat.evaluate(12), 2);
    /// ```
    pub fn flatten(&self, start_type: &str, end_type: &str) -> Result<ConversionTable> {
        self.flatten_with(start_type, end_type, FlattenOptions::default())
    }

    /// [`TableChain::flatten`] with explicit options
    pub fn flatten_with(
        &self,
        start_type: &str,
        end_type: &str,
        options: FlattenOptions,
    ) -> Result<ConversionTable> {
        let steps = self.path(start_type, end_type)?;
        debug!(
            "flattening {} -> {} over {} tables",
            start_type,
            end_type,
            steps.len()
        );

        let Some((first, rest)) = steps.split_first() else {
            return Ok(ConversionTable::identity(start_type, end_type));
        };

        let mut flat = (*first).clone();
        for next in rest {
            flat = compose(&flat, next)?;
            if options.coalesce {
                flat = flat.coalesced();
            }
            debug!(
                "step {} -> {}: {} rows",
                flat.source_type(),
                flat.destination_type(),
                flat.len()
            );
        }
        Ok(flat)
    }

    /// Map one value step by step through every table, without flattening
    pub fn convert(&self, value: i64, start_type: &str, end_type: &str) -> ChainResult<i64> {
        Ok(self
            .path(start_type, end_type)?
            .into_iter()
            .fold(value, |current, table| table.evaluate(current)))
    }
}

/// Flatten `tables` into one table from `start_type` to `end_type`
pub fn flatten<I>(tables: I, start_type: &str, end_type: &str) -> Result<ConversionTable>
where
    I: IntoIterator<Item = ConversionTable>,
{
    TableChain::new(tables)?.flatten(start_type, end_type)
}

//! Seed almanac: already-structured puzzle input plus its two answers
//!
//! The almanac holds a seed list and a chain of conversion tables. Seeds are
//! read either as individual values (point mode) or as `(start, length)`
//! pairs (range mode). Both answers are the lowest `location` reachable
//! from `seed`.

use crate::core::{
    AlmanacError, CompatMode, ConversionTable, Range, RangeQuery, Result, TableChain,
};
use log::debug;

/// Type every chain starts from
pub const SEED_TYPE: &str = "seed";

/// Type every answer is expressed in
pub const LOCATION_TYPE: &str = "location";

/// Seeds plus the conversion tables that lead from them
#[derive(Debug, Clone)]
pub struct Almanac {
    seeds: Vec<i64>,
    chain: TableChain,
}

impl Almanac {
    pub fn new<I>(seeds: Vec<i64>, tables: I) -> Result<Self>
    where
        I: IntoIterator<Item = ConversionTable>,
    {
        Ok(Self {
            seeds,
            chain: TableChain::new(tables)?,
        })
    }

    pub fn seeds(&self) -> &[i64] {
        &self.seeds
    }

    pub fn chain(&self) -> &TableChain {
        &self.chain
    }

    /// Seeds read as `(start, length)` pairs
    ///
    /// # Examples
    /// ```
    /// use fast_rangemap::almanac::Almanac;
    /// use fast_rangemap::ConversionTable;
    /// let almanac = Almanac::new(vec![79, 14, 55, 13], Vec::<ConversionTable>::new()).unwrap();
    /// let ranges = almanac.seed_ranges().unwrap();
    /// assert_eq!((ranges[0].start(), ranges[0].end()), (79, 92));
    /// assert_eq!((ranges[1].start(), ranges[1].end()), (55, 67));
    /// ```
    pub fn seed_ranges(&self) -> Result<Vec<Range>> {
        if self.seeds.len() % 2 != 0 {
            return Err(AlmanacError::OddSeedCount(self.seeds.len()).into());
        }
        let ranges = self
            .seeds
            .chunks_exact(2)
            .map(|pair| Range::from_start_len(pair[0], pair[1]))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ranges)
    }

    /// Lowest location over the individual seeds
    pub fn lowest_location(&self) -> Result<Option<i64>> {
        let query = RangeQuery::new(self.chain.flatten(SEED_TYPE, LOCATION_TYPE)?);
        Ok(query.min_over_points(&self.seeds))
    }

    /// Lowest location over every seed in the seed ranges
    pub fn lowest_location_in_ranges(&self, mode: CompatMode) -> Result<Option<i64>> {
        let ranges = self.seed_ranges()?;
        self.lowest_between(SEED_TYPE, LOCATION_TYPE, &ranges, mode)
    }

    /// Lowest `end_type` value reachable from `ranges` of `start_type` values
    pub fn lowest_between(
        &self,
        start_type: &str,
        end_type: &str,
        ranges: &[Range],
        mode: CompatMode,
    ) -> Result<Option<i64>> {
        let flat = self.chain.flatten(start_type, end_type)?;
        debug!(
            "{} -> {} flattened to {} rows",
            start_type,
            end_type,
            flat.len()
        );
        Ok(RangeQuery::with_compat_mode(flat, mode).min_over_ranges(ranges))
    }

    /// Lowest location over the individual seeds, one table at a time
    pub fn lowest_location_stepwise(&self) -> Result<Option<i64>> {
        let mut lowest = None;
        for &seed in &self.seeds {
            let location = self.chain.convert(seed, SEED_TYPE, LOCATION_TYPE)?;
            lowest = Some(lowest.map_or(location, |l: i64| l.min(location)));
        }
        Ok(lowest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChainError, ConversionRow, RangeError, RangeMapError};

    fn table(source: &str, destination: &str, triples: &[(i64, i64, i64)]) -> ConversionTable {
        let rows = triples
            .iter()
            .map(|&(d, s, l)| ConversionRow::from_triple(d, s, l).unwrap())
            .collect();
        ConversionTable::new(source, destination, rows).unwrap()
    }

    fn small_almanac(seeds: Vec<i64>) -> Almanac {
        Almanac::new(
            seeds,
            vec![
                table("seed", "soil", &[(100, 0, 10)]),
                table("soil", "location", &[(0, 100, 5)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_seed_ranges_odd_count() {
        let almanac = small_almanac(vec![1, 2, 3]);
        assert_eq!(
            almanac.seed_ranges().unwrap_err(),
            RangeMapError::Almanac(AlmanacError::OddSeedCount(3))
        );
    }

    #[test]
    fn test_seed_ranges_zero_length() {
        let almanac = small_almanac(vec![1, 0]);
        assert_eq!(
            almanac.seed_ranges().unwrap_err(),
            RangeMapError::Range(RangeError::EmptyLength { start: 1, length: 0 })
        );
    }

    #[test]
    fn test_lowest_location_point_and_stepwise() {
        // 3 -> 103 -> 3; 102 -> 102 -> 2; 7 -> 107 -> 107
        let almanac = small_almanac(vec![3, 102, 7]);
        assert_eq!(almanac.lowest_location().unwrap(), Some(2));
        assert_eq!(almanac.lowest_location_stepwise().unwrap(), Some(2));
    }

    #[test]
    fn test_lowest_location_in_ranges() {
        // seeds 0..=9 go to 100..=109, of which 100..=104 go to 0..=4
        let almanac = small_almanac(vec![0, 10]);
        assert_eq!(
            almanac.lowest_location_in_ranges(CompatMode::Improved).unwrap(),
            Some(0)
        );
    }

    #[test]
    fn test_missing_seed_table() {
        let almanac = Almanac::new(vec![1], vec![table("soil", "location", &[])]).unwrap();
        assert_eq!(
            almanac.lowest_location().unwrap_err(),
            RangeMapError::Chain(ChainError::MissingTable("seed".to_string()))
        );
    }

    #[test]
    fn test_empty_seeds() {
        let almanac = small_almanac(Vec::new());
        assert_eq!(almanac.lowest_location().unwrap(), None);
        assert_eq!(almanac.lowest_location_stepwise().unwrap(), None);
        assert_eq!(
            almanac.lowest_location_in_ranges(CompatMode::Improved).unwrap(),
            None
        );
    }
}

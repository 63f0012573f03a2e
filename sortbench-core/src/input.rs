//! Input Generation
//!
//! Produces the random integer samples every algorithm is measured on.
//! Randomness comes from an explicitly owned generator, optionally seeded,
//! so runs can be reproduced without touching any global RNG state.

use crate::error::{BenchError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Default benchmark sizes
pub const DEFAULT_SIZES: [usize; 6] = [10, 50, 100, 200, 500, 1000];

/// Inclusive range of generated values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueRange {
    lo: i64,
    hi: i64,
}

impl ValueRange {
    /// Default range `[-1000, 1000]`
    pub const DEFAULT: ValueRange = ValueRange { lo: -1000, hi: 1000 };

    /// Create a range, rejecting `lo > hi`
    pub fn new(lo: i64, hi: i64) -> Result<Self> {
        if lo > hi {
            return Err(BenchError::InvalidInput(format!(
                "range lower bound {} exceeds upper bound {}",
                lo, hi
            )));
        }
        Ok(Self { lo, hi })
    }

    /// Lower bound (inclusive)
    pub fn lo(&self) -> i64 {
        self.lo
    }

    /// Upper bound (inclusive)
    pub fn hi(&self) -> i64 {
        self.hi
    }

    /// Whether `value` lies inside the range
    pub fn contains(&self, value: i64) -> bool {
        (self.lo..=self.hi).contains(&value)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lo, self.hi)
    }
}

impl FromStr for ValueRange {
    type Err = BenchError;

    /// Parse `"lo,hi"`, e.g. `"-1000,1000"`
    fn from_str(s: &str) -> Result<Self> {
        let (lo, hi) = s
            .split_once(',')
            .ok_or_else(|| BenchError::InvalidInput(format!("range '{}' is not 'lo,hi'", s)))?;
        let parse = |part: &str| {
            part.trim().parse::<i64>().map_err(|_| {
                BenchError::InvalidInput(format!("range bound '{}' is not an integer", part.trim()))
            })
        };
        Self::new(parse(lo)?, parse(hi)?)
    }
}

/// One generated input, shared by every algorithm at a given size
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSample {
    /// Number of values
    pub size: usize,
    /// The values, in generation order
    pub values: Vec<i64>,
}

impl InputSample {
    /// Wrap existing values
    pub fn new(values: Vec<i64>) -> Self {
        Self {
            size: values.len(),
            values,
        }
    }
}

/// Random input generator
pub struct InputGenerator {
    rng: StdRng,
    seed: Option<u64>,
}

impl InputGenerator {
    /// Seeded generators are reproducible; unseeded ones draw from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, seed }
    }

    /// Seed this generator was created with, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Draw `size` independent uniform values from `range`. Duplicates are expected.
    pub fn generate(&mut self, size: usize, range: ValueRange) -> InputSample {
        let values = (0..size)
            .map(|_| self.rng.gen_range(range.lo..=range.hi))
            .collect();
        InputSample { size, values }
    }
}

/// Parse a comma-separated size list such as `"10,50,100"`.
///
/// Negative or non-numeric entries are rejected.
pub fn parse_sizes(s: &str) -> Result<Vec<usize>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let value: i64 = part
                .parse()
                .map_err(|_| BenchError::InvalidInput(format!("size '{}' is not an integer", part)))?;
            usize::try_from(value)
                .map_err(|_| BenchError::InvalidInput(format!("size {} is negative", value)))
        })
        .collect()
}

/// Sizes must be non-empty and strictly ascending. They are never reordered.
pub fn validate_sizes(sizes: &[usize]) -> Result<()> {
    if sizes.is_empty() {
        return Err(BenchError::InvalidInput("no sizes configured".to_string()));
    }
    if let Some(pair) = sizes.windows(2).find(|w| w[0] >= w[1]) {
        return Err(BenchError::InvalidInput(format!(
            "sizes must be strictly ascending, found {} followed by {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_respects_size_and_range() {
        let mut generator = InputGenerator::new(Some(7));
        let range = ValueRange::new(-5, 5).unwrap();
        let sample = generator.generate(500, range);
        assert_eq!(sample.size, 500);
        assert_eq!(sample.values.len(), 500);
        assert!(sample.values.iter().all(|&v| range.contains(v)));
    }

    #[test]
    fn test_seed_reproducible() {
        let range = ValueRange::DEFAULT;
        let a = InputGenerator::new(Some(42)).generate(100, range);
        let b = InputGenerator::new(Some(42)).generate(100, range);
        let c = InputGenerator::new(Some(43)).generate(100, range);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_degenerate_range() {
        let mut generator = InputGenerator::new(None);
        let sample = generator.generate(5, ValueRange::new(0, 0).unwrap());
        assert_eq!(sample.values, vec![0; 5]);
        assert!(generator.generate(0, ValueRange::DEFAULT).values.is_empty());
    }

    #[test]
    fn test_range_parsing() {
        assert_eq!("-1000,1000".parse::<ValueRange>().unwrap(), ValueRange::DEFAULT);
        assert_eq!(" 3 , 4 ".parse::<ValueRange>().unwrap(), ValueRange::new(3, 4).unwrap());
        assert!("5,1".parse::<ValueRange>().is_err());
        assert!("5".parse::<ValueRange>().is_err());
        assert!("a,1".parse::<ValueRange>().is_err());
    }

    #[test]
    fn test_range_display_round_trips() {
        let range = ValueRange::new(-3, 9).unwrap();
        assert_eq!(range.to_string().parse::<ValueRange>().unwrap(), range);
    }

    #[test]
    fn test_parse_sizes() {
        assert_eq!(parse_sizes("10,50, 100").unwrap(), vec![10, 50, 100]);
        assert_eq!(parse_sizes("0,1,5").unwrap(), vec![0, 1, 5]);
        assert!(matches!(parse_sizes("10,-5"), Err(BenchError::InvalidInput(_))));
        assert!(parse_sizes("ten").is_err());
    }

    #[test]
    fn test_validate_sizes() {
        assert!(validate_sizes(&DEFAULT_SIZES).is_ok());
        assert!(validate_sizes(&[]).is_err());
        assert!(validate_sizes(&[10, 10]).is_err());
        assert!(validate_sizes(&[50, 10]).is_err());
    }
}

use anyhow::{bail, Result};

use super::config::BucketConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum RangeOp {
    LessThan(u64),
    LessEqual(u64),
    GreaterThan(u64),
    GreaterEqual(u64),
    Equal(u64),
    Between(u64, u64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(RangeOp::GreaterThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(RangeOp::LessThan(val.trim().parse()?))
        } else if s.contains('-') && !s.starts_with('-') {
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() == 2 {
                let low: u64 = parts[0].trim().parse()?;
                let high: u64 = parts[1].trim().parse()?;
                if low > high {
                    bail!("Range start {} is greater than end {}", low, high)
                }
                Ok(RangeOp::Between(low, high))
            } else {
                bail!("Invalid range format: {}", s)
            }
        } else {
            Ok(RangeOp::Equal(s.parse()?))
        }
    }

    pub fn matches(&self, value: u64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

/// One step of a count -> score table.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub range: RangeOp,
    pub score: f64,
}

impl Bucket {
    pub fn new(range: RangeOp, score: f64) -> Self {
        Self { range, score }
    }
}

/// Ordered step function from an indicator count to a score.
///
/// Buckets are tried in order and the first matching one wins. A count no
/// bucket covers scores 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketTable {
    buckets: Vec<Bucket>,
}

impl BucketTable {
    pub fn new(buckets: Vec<Bucket>) -> Self {
        Self { buckets }
    }

    /// Severity steps shared by every bias dimension:
    /// 0 -> 0, 1-2 -> 20, 3-5 -> 40, 6-10 -> 60, 11-15 -> 80, >15 -> 100.
    pub fn bias_severity() -> Self {
        Self::new(vec![
            Bucket::new(RangeOp::Equal(0), 0.0),
            Bucket::new(RangeOp::Between(1, 2), 20.0),
            Bucket::new(RangeOp::Between(3, 5), 40.0),
            Bucket::new(RangeOp::Between(6, 10), 60.0),
            Bucket::new(RangeOp::Between(11, 15), 80.0),
            Bucket::new(RangeOp::GreaterThan(15), 100.0),
        ])
    }

    /// Inclusive-language bonus steps:
    /// 0 -> 0, 1-3 -> 5, 4-6 -> 10, 7-10 -> 15, >10 -> 20.
    pub fn inclusion_bonus() -> Self {
        Self::new(vec![
            Bucket::new(RangeOp::Equal(0), 0.0),
            Bucket::new(RangeOp::Between(1, 3), 5.0),
            Bucket::new(RangeOp::Between(4, 6), 10.0),
            Bucket::new(RangeOp::Between(7, 10), 15.0),
            Bucket::new(RangeOp::GreaterThan(10), 20.0),
        ])
    }

    /// Build a table from its configuration form (`range` expressions).
    pub fn from_config(buckets: &[BucketConfig]) -> Result<Self> {
        if buckets.is_empty() {
            bail!("bucket table must not be empty");
        }
        let buckets = buckets
            .iter()
            .map(|b| -> Result<Bucket> { Ok(Bucket::new(RangeOp::parse(&b.range)?, b.score)) })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(buckets))
    }

    pub fn matched(&self, count: u64) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.range.matches(count))
    }

    pub fn score(&self, count: usize) -> f64 {
        self.matched(count as u64).map(|b| b.score).unwrap_or(0.0)
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_less_than() {
        let range = RangeOp::parse("<100").unwrap();
        assert!(range.matches(50));
        assert!(!range.matches(100));
        assert!(!range.matches(150));
    }

    #[test]
    fn test_parse_range_less_equal() {
        let range = RangeOp::parse("<=100").unwrap();
        assert!(range.matches(100));
        assert!(!range.matches(101));
    }

    #[test]
    fn test_parse_range_greater_than() {
        let range = RangeOp::parse(">15").unwrap();
        assert!(!range.matches(15));
        assert!(range.matches(16));
    }

    #[test]
    fn test_parse_range_greater_equal() {
        let range = RangeOp::parse(">=100").unwrap();
        assert!(!range.matches(99));
        assert!(range.matches(100));
    }

    #[test]
    fn test_parse_range_equal() {
        let range = RangeOp::parse("0").unwrap();
        assert!(range.matches(0));
        assert!(!range.matches(1));
    }

    #[test]
    fn test_parse_range_between() {
        let range = RangeOp::parse("3-5").unwrap();
        assert!(!range.matches(2));
        assert!(range.matches(3));
        assert!(range.matches(5));
        assert!(!range.matches(6));
    }

    #[test]
    fn test_parse_range_rejects_garbage() {
        assert!(RangeOp::parse("lots").is_err());
        assert!(RangeOp::parse("5-3").is_err());
        assert!(RangeOp::parse("1-2-3").is_err());
    }

    #[test]
    fn test_bias_severity_steps() {
        let table = BucketTable::bias_severity();
        let expected = [
            (0, 0.0),
            (1, 20.0),
            (2, 20.0),
            (3, 40.0),
            (5, 40.0),
            (6, 60.0),
            (10, 60.0),
            (11, 80.0),
            (15, 80.0),
            (16, 100.0),
            (500, 100.0),
        ];
        for (count, score) in expected {
            assert_eq!(table.score(count), score, "count {}", count);
        }
    }

    #[test]
    fn test_inclusion_bonus_steps() {
        let table = BucketTable::inclusion_bonus();
        let expected = [
            (0, 0.0),
            (1, 5.0),
            (3, 5.0),
            (4, 10.0),
            (6, 10.0),
            (7, 15.0),
            (10, 15.0),
            (11, 20.0),
        ];
        for (count, score) in expected {
            assert_eq!(table.score(count), score, "count {}", count);
        }
    }

    #[test]
    fn test_first_match_wins() {
        let table = BucketTable::new(vec![
            Bucket::new(RangeOp::LessThan(10), 1.0),
            Bucket::new(RangeOp::LessThan(20), 2.0),
        ]);
        assert_eq!(table.score(5), 1.0);
        assert_eq!(table.score(15), 2.0);
        // Uncovered counts score nothing
        assert_eq!(table.score(25), 0.0);
    }

    #[test]
    fn test_from_config() {
        let table = BucketTable::from_config(&[
            BucketConfig::new("0", 0.0),
            BucketConfig::new(">0", 50.0),
        ])
        .unwrap();
        assert_eq!(table.score(0), 0.0);
        assert_eq!(table.score(3), 50.0);

        assert!(BucketTable::from_config(&[]).is_err());
        assert!(BucketTable::from_config(&[BucketConfig::new("x", 1.0)]).is_err());
    }
}

use serde::{Deserialize, Serialize};

use crate::curriculum::TopicMatchStrategy;

/// Tunable numeric contracts of the scoring engines.
///
/// Every field is optional; a missing field falls back to the built-in
/// default, which reproduces the reference scoring exactly.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   bias:
///     weights: { gender: 0.25, racial: 0.25, age: 0.2, cultural: 0.3 }
///     indicator_buckets:
///       - { range: "0", score: 0 }
///       - { range: "1-2", score: 20 }
///       - { range: ">2", score: 60 }
///   pedagogy:
///     weights: { objectives: 0.25, examples: 0.2, assessment: 0.2, structure: 0.2, engagement: 0.15 }
///   curriculum:
///     match_strategy: strict
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub bias: Option<BiasScoringConfig>,

    #[serde(default)]
    pub pedagogy: Option<PedagogyScoringConfig>,

    #[serde(default)]
    pub curriculum: Option<CurriculumScoringConfig>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bias: Some(BiasScoringConfig::default()),
            pedagogy: Some(PedagogyScoringConfig::default()),
            curriculum: Some(CurriculumScoringConfig::default()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BiasScoringConfig {
    #[serde(default)]
    pub weights: Option<BiasWeights>,

    /// Indicator count -> bias score (0-100) for each bias dimension
    #[serde(default)]
    pub indicator_buckets: Option<Vec<BucketConfig>>,

    /// Inclusive-language indicator count -> bonus points
    #[serde(default)]
    pub inclusion_buckets: Option<Vec<BucketConfig>>,
}

impl Default for BiasScoringConfig {
    fn default() -> Self {
        Self {
            weights: Some(BiasWeights::default()),
            indicator_buckets: Some(vec![
                BucketConfig::new("0", 0.0),
                BucketConfig::new("1-2", 20.0),
                BucketConfig::new("3-5", 40.0),
                BucketConfig::new("6-10", 60.0),
                BucketConfig::new("11-15", 80.0),
                BucketConfig::new(">15", 100.0),
            ]),
            inclusion_buckets: Some(vec![
                BucketConfig::new("0", 0.0),
                BucketConfig::new("1-3", 5.0),
                BucketConfig::new("4-6", 10.0),
                BucketConfig::new("7-10", 15.0),
                BucketConfig::new(">10", 20.0),
            ]),
        }
    }
}

/// Share of each bias dimension in the overall bias penalty.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BiasWeights {
    pub gender: f64,
    pub racial: f64,
    pub age: f64,
    pub cultural: f64,
}

impl Default for BiasWeights {
    fn default() -> Self {
        Self {
            gender: 0.25,
            racial: 0.25,
            age: 0.20,
            cultural: 0.30,
        }
    }
}

impl BiasWeights {
    pub fn sum(&self) -> f64 {
        self.gender + self.racial + self.age + self.cultural
    }

    /// Field name and value pairs, in declaration order
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("gender", self.gender),
            ("racial", self.racial),
            ("age", self.age),
            ("cultural", self.cultural),
        ]
    }
}

/// One count bucket. Range format: "<N", "<=N", ">N", ">=N", "N", "N-M" (inclusive).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BucketConfig {
    pub range: String,
    pub score: f64,
}

impl BucketConfig {
    pub fn new(range: &str, score: f64) -> Self {
        Self {
            range: range.to_string(),
            score,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PedagogyScoringConfig {
    #[serde(default)]
    pub weights: Option<PedagogyWeights>,
}

impl Default for PedagogyScoringConfig {
    fn default() -> Self {
        Self {
            weights: Some(PedagogyWeights::default()),
        }
    }
}

/// Share of each 0-10 pedagogy sub-score in the composite.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PedagogyWeights {
    pub objectives: f64,
    pub examples: f64,
    pub assessment: f64,
    pub structure: f64,
    pub engagement: f64,
}

impl Default for PedagogyWeights {
    fn default() -> Self {
        Self {
            objectives: 0.25,
            examples: 0.20,
            assessment: 0.20,
            structure: 0.20,
            engagement: 0.15,
        }
    }
}

impl PedagogyWeights {
    pub fn sum(&self) -> f64 {
        self.objectives + self.examples + self.assessment + self.structure + self.engagement
    }

    pub fn named(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("objectives", self.objectives),
            ("examples", self.examples),
            ("assessment", self.assessment),
            ("structure", self.structure),
            ("engagement", self.engagement),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CurriculumScoringConfig {
    #[serde(default)]
    pub match_strategy: Option<TopicMatchStrategy>,
}

impl Default for CurriculumScoringConfig {
    fn default() -> Self {
        Self {
            match_strategy: Some(TopicMatchStrategy::Permissive),
        }
    }
}

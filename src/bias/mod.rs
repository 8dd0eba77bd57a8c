pub mod patterns;

use log::debug;
use serde::Serialize;

use crate::error::{EvalError, Result};
use crate::scoring::{
    BiasWeights, BucketConfig, BucketTable, Rating, RatingScale, Recommendations, ScoringConfig,
};
use crate::text::{round_to, MatchResult, PatternSet};

const BIAS_SCALE: RatingScale = RatingScale::new(90.0, 80.0, 70.0, 60.0);

/// Dimension score above which its remediation is recommended.
const DIMENSION_ALERT: f64 = 40.0;

/// Final score below which a full review is recommended.
const REVIEW_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasDimension {
    Gender,
    Racial,
    Age,
    Cultural,
}

impl BiasDimension {
    pub const ALL: [BiasDimension; 4] = [
        BiasDimension::Gender,
        BiasDimension::Racial,
        BiasDimension::Age,
        BiasDimension::Cultural,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BiasDimension::Gender => "Gender Bias",
            BiasDimension::Racial => "Racial Bias",
            BiasDimension::Age => "Age Bias",
            BiasDimension::Cultural => "Cultural Sensitivity",
        }
    }

    pub fn patterns(&self) -> &'static PatternSet {
        match self {
            BiasDimension::Gender => &patterns::GENDER_BIAS,
            BiasDimension::Racial => &patterns::RACIAL_BIAS,
            BiasDimension::Age => &patterns::AGE_BIAS,
            BiasDimension::Cultural => &patterns::CULTURAL_SENSITIVITY,
        }
    }

    fn weight(&self, weights: &BiasWeights) -> f64 {
        match self {
            BiasDimension::Gender => weights.gender,
            BiasDimension::Racial => weights.racial,
            BiasDimension::Age => weights.age,
            BiasDimension::Cultural => weights.cultural,
        }
    }

    fn remediation(&self) -> &'static str {
        match self {
            BiasDimension::Gender => "Review and revise gender-specific language and stereotypes",
            BiasDimension::Racial => "Address racial stereotypes and cultural assumptions",
            BiasDimension::Age => "Remove age-based assumptions and stereotypes",
            BiasDimension::Cultural => "Improve cultural sensitivity and avoid insensitive terms",
        }
    }
}

/// One bias dimension's matches and bucketed score (0-100, higher = more biased).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionResult {
    pub dimension: BiasDimension,
    pub score: f64,
    pub matches: MatchResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiasResult {
    /// `clamp(100 - penalty + inclusive_bonus, 0, 100)`, higher is better
    pub score: f64,
    pub gender_bias: f64,
    pub racial_bias: f64,
    pub age_bias: f64,
    pub cultural_sensitivity: f64,
    /// Weighted sum of the four dimension scores
    pub penalty: f64,
    pub inclusive_bonus: f64,
    pub rating: Rating,
    pub assessment: &'static str,
    /// Gender, racial, age then cultural fragments; duplicates kept
    pub flagged_phrases: Vec<String>,
    pub dimensions: Vec<DimensionResult>,
    pub inclusive_language: MatchResult,
    pub recommendations: Vec<String>,
}

impl BiasResult {
    pub fn dimension(&self, dimension: BiasDimension) -> Option<&DimensionResult> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }
}

/// Scores bias and cultural sensitivity from pattern matches.
#[derive(Debug, Clone)]
pub struct BiasEngine {
    weights: BiasWeights,
    severity: BucketTable,
    inclusion: BucketTable,
}

impl Default for BiasEngine {
    fn default() -> Self {
        Self {
            weights: BiasWeights::default(),
            severity: BucketTable::bias_severity(),
            inclusion: BucketTable::inclusion_bonus(),
        }
    }
}

impl BiasEngine {
    pub fn new(weights: BiasWeights, severity: BucketTable, inclusion: BucketTable) -> Self {
        Self {
            weights,
            severity,
            inclusion,
        }
    }

    /// Build from the `scoring.bias` section, falling back to defaults for
    /// anything left unset.
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        let Some(bias) = config.bias.as_ref() else {
            return Ok(Self::default());
        };
        let defaults = Self::default();

        let severity = match &bias.indicator_buckets {
            Some(buckets) => bucket_table("scoring.bias.indicator_buckets", buckets)?,
            None => defaults.severity,
        };
        let inclusion = match &bias.inclusion_buckets {
            Some(buckets) => bucket_table("scoring.bias.inclusion_buckets", buckets)?,
            None => defaults.inclusion,
        };

        Ok(Self::new(
            bias.weights.unwrap_or(defaults.weights),
            severity,
            inclusion,
        ))
    }

    pub fn analyze(&self, text: &str) -> BiasResult {
        let dimensions: Vec<DimensionResult> = BiasDimension::ALL
            .iter()
            .map(|&dimension| {
                let matches = dimension.patterns().match_text(text);
                let score = self.severity.score(matches.total_indicators);
                debug!(
                    "bias: {} indicators={} score={}",
                    dimension.label(),
                    matches.total_indicators,
                    score
                );
                DimensionResult {
                    dimension,
                    score,
                    matches,
                }
            })
            .collect();

        let penalty: f64 = dimensions
            .iter()
            .map(|d| d.score * d.dimension.weight(&self.weights))
            .sum();

        let inclusive_language = patterns::INCLUSIVE_LANGUAGE.match_text(text);
        let inclusive_bonus = self.inclusion.score(inclusive_language.total_indicators);

        let score = round_to((100.0 - penalty + inclusive_bonus).clamp(0.0, 100.0), 2);
        let rating = BIAS_SCALE.rate(score);
        debug!(
            "bias: penalty={:.2} bonus={} score={:.2}",
            penalty, inclusive_bonus, score
        );

        let flagged_phrases = dimensions
            .iter()
            .flat_map(|d| d.matches.flagged_fragments.iter().cloned())
            .collect();
        let recommendations = recommendations(&dimensions, score);

        BiasResult {
            score,
            gender_bias: dimensions[0].score,
            racial_bias: dimensions[1].score,
            age_bias: dimensions[2].score,
            cultural_sensitivity: dimensions[3].score,
            penalty,
            inclusive_bonus,
            rating,
            assessment: assessment_label(rating),
            flagged_phrases,
            dimensions,
            inclusive_language,
            recommendations,
        }
    }
}

fn bucket_table(path: &str, buckets: &[BucketConfig]) -> Result<BucketTable> {
    BucketTable::from_config(buckets)
        .map_err(|e| EvalError::invalid_config(format!("{}: {}", path, e)))
}

fn assessment_label(rating: Rating) -> &'static str {
    match rating {
        Rating::Excellent => "Excellent - Very inclusive and culturally sensitive",
        Rating::Good => "Good - Generally inclusive with minor issues",
        Rating::Fair => "Fair - Some bias issues that should be addressed",
        Rating::Poor => "Poor - Significant bias issues need attention",
        Rating::VeryPoor => "Very poor - Major bias issues require immediate attention",
    }
}

fn recommendations(dimensions: &[DimensionResult], score: f64) -> Vec<String> {
    let mut recs = Recommendations::new();
    for d in dimensions {
        recs.push_if(d.score > DIMENSION_ALERT, d.dimension.remediation());
    }
    recs.push_if(
        score < REVIEW_THRESHOLD,
        "Conduct comprehensive bias review with diverse perspectives",
    );
    recs.finish_or("Content demonstrates good cultural sensitivity and inclusivity")
}

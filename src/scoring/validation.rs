use super::buckets::RangeOp;
use super::config::{BucketConfig, ScoringConfig};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref bias) = config.bias {
        if let Some(ref weights) = bias.weights {
            validate_weights("scoring.bias.weights", &weights.named(), &mut errors);
        }
        if let Some(ref buckets) = bias.indicator_buckets {
            validate_buckets("scoring.bias.indicator_buckets", buckets, &mut errors);
        }
        if let Some(ref buckets) = bias.inclusion_buckets {
            validate_buckets("scoring.bias.inclusion_buckets", buckets, &mut errors);
        }
    }

    if let Some(ref pedagogy) = config.pedagogy {
        if let Some(ref weights) = pedagogy.weights {
            validate_weights("scoring.pedagogy.weights", &weights.named(), &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_weights(path: &str, weights: &[(&str, f64)], errors: &mut Vec<String>) {
    for (name, value) in weights {
        if !value.is_finite() || *value < 0.0 {
            errors.push(format!("{}.{}: must be a non-negative number", path, name));
        }
    }
    let sum: f64 = weights.iter().map(|(_, v)| v).sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        errors.push(format!("{}: weights must sum to 1 (got {})", path, sum));
    }
}

fn validate_buckets(path: &str, buckets: &[BucketConfig], errors: &mut Vec<String>) {
    if buckets.is_empty() {
        errors.push(format!("{}: must contain at least one bucket", path));
        return;
    }
    for (i, bucket) in buckets.iter().enumerate() {
        if let Err(e) = RangeOp::parse(&bucket.range) {
            errors.push(format!(
                "{}[{}].range: invalid '{}' - {}",
                path, i, bucket.range, e
            ));
        }
        if !bucket.score.is_finite() || bucket.score < 0.0 {
            errors.push(format!(
                "{}[{}].score: must be a non-negative number",
                path, i
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{BiasScoringConfig, BiasWeights, PedagogyScoringConfig, PedagogyWeights};

    fn bias_only(bias: BiasScoringConfig) -> ScoringConfig {
        ScoringConfig {
            bias: Some(bias),
            pedagogy: None,
            curriculum: None,
        }
    }

    #[test]
    fn test_valid_default_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_config() {
        let config = ScoringConfig {
            bias: None,
            pedagogy: None,
            curriculum: None,
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let config = bias_only(BiasScoringConfig {
            weights: Some(BiasWeights {
                gender: 0.5,
                racial: 0.5,
                age: 0.5,
                cultural: 0.5,
            }),
            indicator_buckets: None,
            inclusion_buckets: None,
        });
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.bias.weights"));
        assert!(errors[0].contains("sum to 1"));
    }

    #[test]
    fn test_negative_weight() {
        let config = ScoringConfig {
            bias: None,
            pedagogy: Some(PedagogyScoringConfig {
                weights: Some(PedagogyWeights {
                    objectives: -0.25,
                    examples: 0.45,
                    assessment: 0.2,
                    structure: 0.4,
                    engagement: 0.2,
                }),
            }),
            curriculum: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.pedagogy.weights.objectives"));
    }

    #[test]
    fn test_invalid_bucket_range() {
        let config = bias_only(BiasScoringConfig {
            weights: None,
            indicator_buckets: Some(vec![BucketConfig::new("many", 10.0)]),
            inclusion_buckets: None,
        });
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.bias.indicator_buckets[0].range"));
    }

    #[test]
    fn test_empty_bucket_table() {
        let config = bias_only(BiasScoringConfig {
            weights: None,
            indicator_buckets: None,
            inclusion_buckets: Some(vec![]),
        });
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.bias.inclusion_buckets"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = bias_only(BiasScoringConfig {
            weights: Some(BiasWeights {
                gender: 1.0,
                racial: 1.0,
                age: 0.0,
                cultural: 0.0,
            }),
            indicator_buckets: Some(vec![BucketConfig::new("bad", -1.0)]),
            inclusion_buckets: None,
        });
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}

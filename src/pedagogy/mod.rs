pub mod engagement;
pub mod patterns;

pub use engagement::{sentence_variance_score, EngagementAnalysis};

use log::debug;
use serde::Serialize;

use crate::scoring::{PedagogyWeights, Rating, RatingScale, Recommendations, ScoringConfig};
use crate::text::{ratio, round_to, split_paragraphs, split_sentences, PatternSet};

/// Bands on the 0-100 composite.
const PEDAGOGY_SCALE: RatingScale = RatingScale::new(85.0, 70.0, 55.0, 40.0);

const MAX_SUB_SCORE: f64 = 10.0;
const MAX_INDICATOR_BONUS: f64 = 2.0;

/// Sub-score below which its targeted recommendation fires.
const SUB_SCORE_ALERT: f64 = 6.0;

/// Composite below which restructuring is recommended.
const COMPOSITE_ALERT: f64 = 60.0;

/// How often a pattern group shows up, by match count and by share of units
/// (sentences or paragraphs) containing at least one match.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CoverageAnalysis {
    pub fragments: Vec<String>,
    pub indicators: usize,
    pub matching_units: usize,
    pub total_units: usize,
    pub percentage: f64,
    pub score: f64,
}

impl CoverageAnalysis {
    fn measure(patterns: &PatternSet, text: &str, units: &[&str]) -> Self {
        let matches = patterns.match_text(text);
        let matching_units = units.iter().filter(|u| patterns.is_match(u)).count();
        let percentage = ratio(matching_units as f64, units.len() as f64) * 100.0;

        let base = (percentage * 0.1).min(MAX_SUB_SCORE);
        let bonus = (matches.total_indicators as f64 * 0.1).min(MAX_INDICATOR_BONUS);

        Self {
            fragments: matches.flagged_fragments,
            indicators: matches.total_indicators,
            matching_units,
            total_units: units.len(),
            percentage,
            score: (base + bonus).min(MAX_SUB_SCORE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StructureAnalysis {
    pub fragments: Vec<String>,
    pub indicators: usize,
    pub flow_connectives: usize,
    /// Whitespace-separated words per paragraph
    pub avg_paragraph_length: f64,
    pub paragraph_count: usize,
    pub length_bonus: f64,
    pub flow_bonus: f64,
    pub score: f64,
}

impl StructureAnalysis {
    fn measure(text: &str, paragraphs: &[&str]) -> Self {
        let matches = patterns::STRUCTURE_LANGUAGE.match_text(text);
        let flow_connectives = patterns::count_flow_connectives(text);

        let avg_paragraph_length = ratio(
            paragraphs.iter().map(|p| p.split_whitespace().count()).sum::<usize>() as f64,
            paragraphs.len() as f64,
        );
        let length_bonus = if paragraphs.is_empty() {
            0.0
        } else if (3.0..=8.0).contains(&avg_paragraph_length) {
            1.0
        } else if avg_paragraph_length < 3.0 {
            0.5
        } else {
            0.0
        };
        let flow_bonus = (flow_connectives as f64 * 0.1).min(1.0);
        let raw = ((matches.total_indicators + flow_connectives) as f64 / 2.0).min(MAX_SUB_SCORE);

        Self {
            fragments: matches.flagged_fragments,
            indicators: matches.total_indicators,
            flow_connectives,
            avg_paragraph_length,
            paragraph_count: paragraphs.len(),
            length_bonus,
            flow_bonus,
            score: (raw + length_bonus + flow_bonus).min(MAX_SUB_SCORE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PedagogyResult {
    /// Weighted sum of the sub-scores x 10, on a 0-100 scale
    pub score: f64,
    pub objectives_score: f64,
    pub examples_score: f64,
    pub assessment_score: f64,
    pub structure_score: f64,
    pub engagement_score: f64,
    pub rating: Rating,
    pub assessment: &'static str,
    pub objectives: CoverageAnalysis,
    pub examples: CoverageAnalysis,
    pub assessments: CoverageAnalysis,
    pub structure: StructureAnalysis,
    pub engagement: EngagementAnalysis,
    pub recommendations: Vec<String>,
}

/// Scores learning objectives, examples, assessment, structure and
/// engagement, each on 0-10.
#[derive(Debug, Clone, Default)]
pub struct PedagogyEngine {
    weights: PedagogyWeights,
}

impl PedagogyEngine {
    pub fn new(weights: PedagogyWeights) -> Self {
        Self { weights }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        let weights = config
            .pedagogy
            .as_ref()
            .and_then(|p| p.weights)
            .unwrap_or_default();
        Self::new(weights)
    }

    pub fn analyze(&self, text: &str) -> PedagogyResult {
        let sentences = split_sentences(text);
        let paragraphs = split_paragraphs(text);

        let objectives =
            CoverageAnalysis::measure(&patterns::LEARNING_OBJECTIVES, text, &sentences);
        let examples = CoverageAnalysis::measure(&patterns::EXAMPLE_LANGUAGE, text, &paragraphs);
        let assessments =
            CoverageAnalysis::measure(&patterns::ASSESSMENT_LANGUAGE, text, &paragraphs);
        let structure = StructureAnalysis::measure(text, &paragraphs);
        let engagement = EngagementAnalysis::from_text(text);

        let w = &self.weights;
        let weighted = objectives.score * w.objectives
            + examples.score * w.examples
            + assessments.score * w.assessment
            + structure.score * w.structure
            + engagement.score * w.engagement;
        let composite = weighted * 10.0;
        debug!(
            "pedagogy: objectives={:.2} examples={:.2} assessment={:.2} structure={:.2} \
             engagement={:.2} composite={:.2}",
            objectives.score,
            examples.score,
            assessments.score,
            structure.score,
            engagement.score,
            composite
        );

        let recommendations = {
            let mut recs = Recommendations::new();
            recs.push_if(
                objectives.score < SUB_SCORE_ALERT,
                "Add clear learning objectives at the beginning of each section",
            )
            .push_if(
                examples.score < SUB_SCORE_ALERT,
                "Include more examples and illustrations to support learning",
            )
            .push_if(
                assessments.score < SUB_SCORE_ALERT,
                "Add assessment elements like questions and exercises",
            )
            .push_if(
                structure.score < SUB_SCORE_ALERT,
                "Improve content structure with clear introductions and summaries",
            )
            .push_if(
                engagement.score < SUB_SCORE_ALERT,
                "Increase engagement through questions and active voice",
            )
            .push_if(
                composite < COMPOSITE_ALERT,
                "Consider restructuring content to improve pedagogical effectiveness",
            );
            recs.finish_or("Content demonstrates good pedagogical practices")
        };

        let score = round_to(composite.clamp(0.0, 100.0), 2);
        let rating = PEDAGOGY_SCALE.rate(score);

        PedagogyResult {
            score,
            objectives_score: round_to(objectives.score, 1),
            examples_score: round_to(examples.score, 1),
            assessment_score: round_to(assessments.score, 1),
            structure_score: round_to(structure.score, 1),
            engagement_score: round_to(engagement.score, 1),
            rating,
            assessment: assessment_label(rating),
            objectives,
            examples,
            assessments,
            structure,
            engagement,
            recommendations,
        }
    }
}

fn assessment_label(rating: Rating) -> &'static str {
    match rating {
        Rating::Excellent => "Excellent pedagogical quality",
        Rating::Good => "Good pedagogical quality",
        Rating::Fair => "Fair pedagogical quality",
        Rating::Poor => "Poor pedagogical quality",
        Rating::VeryPoor => "Very poor pedagogical quality",
    }
}

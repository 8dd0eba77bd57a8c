pub mod matching;
pub mod taxonomy;

pub use matching::{KeywordSet, TopicMatchStrategy};
pub use taxonomy::{GradeBand, Subject, Taxonomy, TopicGroup, TopicLeaf};

use log::debug;
use serde::Serialize;

use crate::scoring::{Rating, RatingScale, Recommendations, ScoringConfig};
use crate::text::{ratio, round_to, TextStatistics};

const ALIGNMENT_SCALE: RatingScale = RatingScale::new(90.0, 75.0, 60.0, 40.0);

/// Missing topics named per subject in a recommendation.
const MISSING_TOPICS_SHOWN: usize = 3;

/// Coverage of one subject's taxonomy leaves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectAlignment {
    pub subject: String,
    /// covered / total x 100, rounded to 2 decimals; 0 for an empty subject
    pub score: f64,
    pub covered: Vec<String>,
    pub missing: Vec<String>,
    pub total_topics: usize,
    pub coverage_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurriculumResult {
    /// Mean of the subject scores (0-100)
    pub score: f64,
    pub rating: Rating,
    pub assessment: &'static str,
    pub subjects: Vec<SubjectAlignment>,
    pub covered_topics: Vec<String>,
    pub missing_topics: Vec<String>,
    pub total_topics_covered: usize,
    pub total_topics_missing: usize,
    /// Covered share of all leaves combined; differs from `score` whenever
    /// subjects have different leaf counts.
    pub coverage_percentage: f64,
    pub grade_level: &'static str,
    pub recommendations: Vec<String>,
}

/// Scores how much of a curriculum taxonomy a text touches.
#[derive(Debug, Clone)]
pub struct CurriculumEngine {
    taxonomy: Taxonomy,
    strategy: TopicMatchStrategy,
}

impl Default for CurriculumEngine {
    fn default() -> Self {
        Self::new(Taxonomy::standard().clone(), TopicMatchStrategy::default())
    }
}

impl CurriculumEngine {
    pub fn new(taxonomy: Taxonomy, strategy: TopicMatchStrategy) -> Self {
        Self { taxonomy, strategy }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        let strategy = config
            .curriculum
            .as_ref()
            .and_then(|c| c.match_strategy)
            .unwrap_or_default();
        Self::new(Taxonomy::standard().clone(), strategy)
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn strategy(&self) -> TopicMatchStrategy {
        self.strategy
    }

    pub fn analyze(&self, text: &str) -> CurriculumResult {
        let keywords = KeywordSet::from_text(text);
        debug!("curriculum: {} distinct keywords", keywords.len());

        let subjects: Vec<SubjectAlignment> = self
            .taxonomy
            .subjects()
            .iter()
            .map(|subject| self.align_subject(subject, &keywords))
            .collect();

        // Rated and compared unrounded; rounded only for reporting
        let mean = ratio(
            subjects.iter().map(|s| s.score).sum(),
            subjects.len() as f64,
        );
        let score = round_to(mean, 2);

        let covered_topics: Vec<String> = subjects.iter().flat_map(|s| s.covered.clone()).collect();
        let missing_topics: Vec<String> = subjects.iter().flat_map(|s| s.missing.clone()).collect();
        let total_topics_covered = covered_topics.len();
        let total_topics_missing = missing_topics.len();
        let coverage_percentage = ratio(
            total_topics_covered as f64,
            (total_topics_covered + total_topics_missing) as f64,
        ) * 100.0;

        let rating = ALIGNMENT_SCALE.rate(mean);
        let recommendations = recommendations(mean, &subjects, coverage_percentage);
        debug!(
            "curriculum: {}/{} topics covered, score {:.2}",
            total_topics_covered,
            total_topics_covered + total_topics_missing,
            score
        );

        CurriculumResult {
            score,
            rating,
            assessment: assessment_label(rating),
            subjects,
            covered_topics,
            missing_topics,
            total_topics_covered,
            total_topics_missing,
            coverage_percentage,
            grade_level: grade_level_recommendation(text),
            recommendations,
        }
    }

    fn align_subject(&self, subject: &Subject, keywords: &KeywordSet) -> SubjectAlignment {
        let mut covered = Vec::new();
        let mut missing = Vec::new();
        for leaf in subject.leaves() {
            if self.strategy.matches(leaf.topic, keywords) {
                covered.push(leaf.key());
            } else {
                missing.push(leaf.key());
            }
        }

        let total_topics = covered.len() + missing.len();
        let coverage_ratio = ratio(covered.len() as f64, total_topics as f64);
        SubjectAlignment {
            subject: subject.name.clone(),
            score: round_to(coverage_ratio * 100.0, 2),
            covered,
            missing,
            total_topics,
            coverage_ratio,
        }
    }
}

fn assessment_label(rating: Rating) -> &'static str {
    match rating {
        Rating::Excellent => "Excellent alignment with curriculum standards",
        Rating::Good => "Good alignment with minor gaps",
        Rating::Fair => "Fair alignment with some gaps",
        Rating::Poor => "Poor alignment with significant gaps",
        Rating::VeryPoor => "Very poor alignment with major gaps",
    }
}

fn recommendations(score: f64, subjects: &[SubjectAlignment], coverage: f64) -> Vec<String> {
    let mut recs = Recommendations::new();
    recs.push_if(
        score < 60.0,
        "Consider expanding content to cover more curriculum standards",
    );
    for subject in subjects {
        recs.push_if(
            subject.score < 50.0,
            format!("Focus on improving {} content coverage", subject.subject),
        );
        if !subject.missing.is_empty() {
            let shown: Vec<&str> = subject
                .missing
                .iter()
                .take(MISSING_TOPICS_SHOWN)
                .map(String::as_str)
                .collect();
            recs.push(format!("Add content covering: {}", shown.join(", ")));
        }
    }
    recs.push_if(
        coverage < 50.0,
        "Significantly expand topic coverage to meet curriculum requirements",
    );
    recs.finish_or("Content shows good alignment with curriculum standards")
}

/// Coarse grade band from sentence length and word complexity alone.
pub fn grade_level_recommendation(text: &str) -> &'static str {
    let stats = TextStatistics::from_text(text);
    let wps = stats.avg_words_per_sentence;
    let spw = stats.avg_syllables_per_word;

    if wps < 10.0 && spw < 1.5 {
        "Elementary (K-5)"
    } else if wps < 15.0 && spw < 1.8 {
        "Middle School (6-8)"
    } else if wps < 20.0 && spw < 2.1 {
        "High School (9-12)"
    } else {
        "Advanced/College Level"
    }
}

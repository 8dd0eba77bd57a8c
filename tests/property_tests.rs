//! Property-based tests using proptest

use proptest::prelude::*;

use edu_eval::bias::BiasEngine;
use edu_eval::curriculum::CurriculumEngine;
use edu_eval::loader::clean_text;
use edu_eval::pedagogy::PedagogyEngine;
use edu_eval::readability::{ReadabilityEngine, MAX_GRADE_LEVEL};

const VOCABULARY: &[&str] = &[
    "students", "will", "understand", "for", "example", "practice", "exercise", "summary",
    "however", "you", "your", "male", "nurse", "female", "doctor", "exotic", "primitive",
    "young", "people", "can't", "diverse", "inclusive", "plants", "cells", "energy",
    "fractions", "addition", "geometry", "history", "the", "is", "are", "learning",
    "photosynthesis", "comprehensive", "methodological",
];

const SEPARATORS: &[&str] = &[" ", ". ", "? ", "! ", "\n\n"];

const BIAS_BLOCK: &str = "The male nurse. Exotic customs. Young people can't focus. \
                          They all speak alike. ";

/// Word salad from a vocabulary that hits every engine's patterns, with
/// random sentence and paragraph breaks.
fn lesson_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (prop::sample::select(VOCABULARY), prop::sample::select(SEPARATORS)),
        0..120,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(word, sep)| format!("{}{}", word, sep))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_scores_stay_in_range(text in lesson_text()) {
        let readability = ReadabilityEngine::new().analyze(&text);
        prop_assert!((0.0..=MAX_GRADE_LEVEL).contains(&readability.grade_level));
        prop_assert!((0.0..=100.0).contains(&readability.reading_ease));

        let curriculum = CurriculumEngine::default().analyze(&text);
        prop_assert!((0.0..=100.0).contains(&curriculum.score));
        prop_assert!((0.0..=100.0).contains(&curriculum.coverage_percentage));

        let pedagogy = PedagogyEngine::default().analyze(&text);
        prop_assert!((0.0..=100.0).contains(&pedagogy.score));
        for sub in [
            pedagogy.objectives_score,
            pedagogy.examples_score,
            pedagogy.assessment_score,
            pedagogy.structure_score,
            pedagogy.engagement_score,
        ] {
            prop_assert!((0.0..=10.0).contains(&sub), "sub-score {} out of range", sub);
        }

        let bias = BiasEngine::default().analyze(&text);
        prop_assert!((0.0..=100.0).contains(&bias.score));
    }

    #[test]
    fn test_arbitrary_text_never_panics(text in "\\PC{0,400}") {
        let readability = ReadabilityEngine::new().analyze(&text);
        prop_assert!((0.0..=MAX_GRADE_LEVEL).contains(&readability.grade_level));
        let pedagogy = PedagogyEngine::default().analyze(&text);
        prop_assert!((0.0..=100.0).contains(&pedagogy.score));
        let bias = BiasEngine::default().analyze(&text);
        prop_assert!((0.0..=100.0).contains(&bias.score));
    }

    #[test]
    fn test_engines_are_idempotent(text in lesson_text()) {
        let readability = ReadabilityEngine::new();
        prop_assert_eq!(readability.analyze(&text), readability.analyze(&text));
        let curriculum = CurriculumEngine::default();
        prop_assert_eq!(curriculum.analyze(&text), curriculum.analyze(&text));
        let pedagogy = PedagogyEngine::default();
        prop_assert_eq!(pedagogy.analyze(&text), pedagogy.analyze(&text));
        let bias = BiasEngine::default();
        prop_assert_eq!(bias.analyze(&text), bias.analyze(&text));
    }

    #[test]
    fn test_bias_penalty_is_monotone(smaller in 0usize..8, extra in 1usize..8) {
        let engine = BiasEngine::default();
        let fewer = engine.analyze(&BIAS_BLOCK.repeat(smaller));
        let more = engine.analyze(&BIAS_BLOCK.repeat(smaller + extra));
        prop_assert!(more.penalty >= fewer.penalty);
        prop_assert!(more.score <= fewer.score);
    }

    #[test]
    fn test_curriculum_counts_are_consistent(text in lesson_text()) {
        let engine = CurriculumEngine::default();
        let result = engine.analyze(&text);
        let leaf_total: usize = result.subjects.iter().map(|s| s.total_topics).sum();
        prop_assert_eq!(result.total_topics_covered + result.total_topics_missing, leaf_total);
        prop_assert_eq!(leaf_total, engine.taxonomy().topic_count());
        prop_assert_eq!(result.covered_topics.len(), result.total_topics_covered);
    }

    #[test]
    fn test_clean_text_is_idempotent(text in "\\PC{0,200}") {
        let once = clean_text(&text);
        prop_assert_eq!(clean_text(&once), once);
    }
}

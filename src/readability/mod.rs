pub mod bands;
pub mod formulas;

pub use formulas::{count_complex_words, FormulaInputs, MAX_GRADE_LEVEL};

use log::debug;
use serde::Serialize;

use crate::scoring::Recommendations;
use crate::text::{round_to, split_paragraphs, TextStatistics};

/// Characters of a paragraph kept in its preview.
const PREVIEW_CHARS: usize = 100;

/// Readability of one text. Reported values are rounded (grade, ease, fog,
/// SMOG and words per sentence to 1 decimal, syllables per word to 2).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadabilityResult {
    /// Flesch-Kincaid grade level in `[0, 20]`
    pub grade_level: f64,
    pub reading_ease: f64,
    pub gunning_fog: f64,
    pub smog: f64,
    pub avg_words_per_sentence: f64,
    pub avg_syllables_per_word: f64,
    pub word_count: usize,
    pub sentence_count: usize,
    pub complex_word_count: usize,
    pub assessment: &'static str,
    pub reading_ease_assessment: &'static str,
    pub complexity_level: &'static str,
    pub recommended_audience: &'static str,
    pub recommendations: Vec<String>,
}

/// Side-by-side formula values, the grade formulas uncapped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaComparison {
    pub flesch_kincaid_grade: f64,
    pub flesch_reading_ease: f64,
    pub gunning_fog: f64,
    pub smog: f64,
    /// Mean of Flesch-Kincaid, Gunning Fog and SMOG
    pub average_grade_level: f64,
    pub agreement: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphReadability {
    /// 1-based position among non-empty paragraphs
    pub number: usize,
    pub preview: String,
    pub result: ReadabilityResult,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReadabilityEngine;

impl ReadabilityEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> ReadabilityResult {
        let stats = TextStatistics::from_text(text);
        let inputs = FormulaInputs::from_stats(&stats, count_complex_words(text));

        let grade = formulas::flesch_kincaid_grade(&inputs);
        let ease = formulas::flesch_reading_ease(&inputs);
        debug!(
            "readability: W={} S={} Y={} C={} grade={:.2} ease={:.2}",
            inputs.words, inputs.sentences, inputs.syllables, inputs.complex_words, grade, ease
        );

        let grade_level = round_to(grade, 1);
        let reading_ease = round_to(ease, 1);
        let avg_words_per_sentence = round_to(stats.avg_words_per_sentence, 1);
        let avg_syllables_per_word = round_to(stats.avg_syllables_per_word, 2);

        ReadabilityResult {
            grade_level,
            reading_ease,
            gunning_fog: round_to(formulas::gunning_fog(&inputs), 1),
            smog: round_to(formulas::smog(&inputs), 1),
            avg_words_per_sentence,
            avg_syllables_per_word,
            word_count: stats.word_count,
            sentence_count: stats.sentence_count,
            complex_word_count: inputs.complex_words,
            assessment: bands::grade_assessment(grade),
            reading_ease_assessment: bands::reading_ease_assessment(ease),
            complexity_level: bands::complexity_level(grade),
            recommended_audience: bands::recommended_audience(grade),
            recommendations: recommendations(
                grade_level,
                reading_ease,
                avg_words_per_sentence,
                avg_syllables_per_word,
            ),
        }
    }

    pub fn compare_formulas(&self, text: &str) -> FormulaComparison {
        let inputs = FormulaInputs::from_text(text);
        let grades = [
            formulas::flesch_kincaid_raw(&inputs),
            formulas::gunning_fog(&inputs),
            formulas::smog(&inputs),
        ];
        let average = grades.iter().sum::<f64>() / grades.len() as f64;

        FormulaComparison {
            flesch_kincaid_grade: round_to(grades[0], 1),
            flesch_reading_ease: round_to(formulas::flesch_reading_ease(&inputs), 1),
            gunning_fog: round_to(grades[1], 1),
            smog: round_to(grades[2], 1),
            average_grade_level: round_to(average, 1),
            agreement: bands::formula_agreement(&grades),
        }
    }

    /// Analyze each non-empty paragraph on its own.
    pub fn analyze_paragraphs<S: AsRef<str>>(&self, paragraphs: &[S]) -> Vec<ParagraphReadability> {
        paragraphs
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .enumerate()
            .map(|(i, paragraph)| ParagraphReadability {
                number: i + 1,
                preview: preview(paragraph),
                result: self.analyze(paragraph),
            })
            .collect()
    }

    /// Split `text` on blank lines and analyze each paragraph.
    pub fn analyze_paragraphs_in(&self, text: &str) -> Vec<ParagraphReadability> {
        self.analyze_paragraphs(&split_paragraphs(text))
    }
}

fn preview(paragraph: &str) -> String {
    if paragraph.chars().count() > PREVIEW_CHARS {
        let head: String = paragraph.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        paragraph.to_string()
    }
}

fn recommendations(
    grade: f64,
    ease: f64,
    words_per_sentence: f64,
    syllables_per_word: f64,
) -> Vec<String> {
    let mut recs = Recommendations::new();

    if grade > 12.0 {
        recs.push("Consider simplifying language for broader accessibility");
    } else if grade < 5.0 {
        recs.push("Content may be too simple for target audience");
    }

    if ease < 50.0 {
        recs.push("Text is difficult to read - consider simplifying sentence structure");
    } else if ease > 90.0 {
        recs.push("Text is very easy - may need more complexity for target audience");
    }

    if words_per_sentence > 20.0 {
        recs.push("Sentences are long - consider breaking them into shorter sentences");
    } else if words_per_sentence < 8.0 {
        recs.push("Sentences are very short - consider combining some for better flow");
    }

    if syllables_per_word > 2.0 {
        recs.push("Words are complex - consider using simpler vocabulary");
    } else if syllables_per_word < 1.3 {
        recs.push("Vocabulary is very simple - may need more sophisticated terms");
    }

    recs.finish_or("Readability is appropriate for the target audience")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_text() {
        let result = ReadabilityEngine::new().analyze("The cat sat. The dog ran!");
        assert_eq!(result.word_count, 6);
        assert_eq!(result.sentence_count, 2);
        assert_eq!(result.grade_level, 0.0);
        assert_eq!(result.reading_ease, 100.0);
        assert_eq!(result.avg_words_per_sentence, 3.0);
        assert_eq!(result.avg_syllables_per_word, 1.0);
        assert_eq!(result.assessment, "Appropriate for elementary students");
        assert_eq!(result.reading_ease_assessment, "Very easy to read");
        assert_eq!(result.complexity_level, "Elementary (K-5)");
        assert_eq!(result.recommended_audience, "Early elementary students (K-3)");
        assert_eq!(
            result.recommendations,
            vec![
                "Content may be too simple for target audience",
                "Text is very easy - may need more complexity for target audience",
                "Sentences are very short - consider combining some for better flow",
                "Vocabulary is very simple - may need more sophisticated terms",
            ]
        );
    }

    #[test]
    fn test_complex_text_recommendations() {
        let text = "Comprehensive educational evaluation necessitates considerable methodological \
                    sophistication, particularly regarding institutional accountability, \
                    organizational effectiveness, and multidimensional representational \
                    considerations.";
        let result = ReadabilityEngine::new().analyze(text);
        assert_eq!(result.sentence_count, 1);
        assert_eq!(result.grade_level, MAX_GRADE_LEVEL);
        assert_eq!(result.reading_ease, 0.0);
        assert_eq!(result.complexity_level, "Advanced/Professional");
        assert_eq!(
            result.recommendations,
            vec![
                "Consider simplifying language for broader accessibility",
                "Text is difficult to read - consider simplifying sentence structure",
                "Words are complex - consider using simpler vocabulary",
            ]
        );
    }

    #[test]
    fn test_empty_text() {
        let result = ReadabilityEngine::new().analyze("");
        assert_eq!(result.grade_level, 0.0);
        assert_eq!(result.reading_ease, 0.0);
        assert_eq!(result.gunning_fog, 0.0);
        assert_eq!(result.smog, 0.0);
        assert_eq!(result.word_count, 0);
        assert_eq!(result.assessment, "Appropriate for elementary students");
        assert_eq!(result.reading_ease_assessment, "Very difficult to read");
    }

    #[test]
    fn test_compare_formulas() {
        let comparison = ReadabilityEngine::new().compare_formulas("The cat sat. The dog ran!");
        // FK floors at 0, fog = 0.4 * 3 = 1.2, SMOG = 3.1291
        assert_eq!(comparison.flesch_kincaid_grade, 0.0);
        assert_eq!(comparison.gunning_fog, 1.2);
        assert_eq!(comparison.smog, 3.1);
        assert_eq!(comparison.average_grade_level, 1.4);
        assert_eq!(comparison.agreement, "Moderate agreement between formulas");
    }

    #[test]
    fn test_analyze_paragraphs_numbering_and_preview() {
        let long = "word ".repeat(30);
        let paragraphs = vec!["First one.", "   ", long.as_str()];
        let analyses = ReadabilityEngine::new().analyze_paragraphs(&paragraphs);
        assert_eq!(analyses.len(), 2);
        assert_eq!(analyses[0].number, 1);
        assert_eq!(analyses[0].preview, "First one.");
        assert_eq!(analyses[1].number, 2);
        assert!(analyses[1].preview.ends_with("..."));
        assert_eq!(analyses[1].preview.chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_analyze_paragraphs_in_text() {
        let analyses = ReadabilityEngine::new().analyze_paragraphs_in("One here.\n\nTwo here.");
        assert_eq!(analyses.len(), 2);
        assert_eq!(analyses[1].preview, "Two here.");
    }

    #[test]
    fn test_idempotent() {
        let engine = ReadabilityEngine::new();
        let text = "Reading is fun. Writing is harder, but it gets easier with practice.";
        assert_eq!(engine.analyze(text), engine.analyze(text));
    }
}

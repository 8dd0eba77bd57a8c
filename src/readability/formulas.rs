use serde::Serialize;

use crate::text::{count_syllables, ratio, words, TextStatistics};

/// Inflectional suffixes stripped before deciding whether a word is complex.
const INFLECTIONS: &[&str] = &["es", "ed", "ing"];

/// Minimum syllables for a complex word.
const COMPLEX_SYLLABLES: usize = 3;

/// Highest grade level reported by [`flesch_kincaid_grade`].
pub const MAX_GRADE_LEVEL: f64 = 20.0;

/// Raw counts every formula is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FormulaInputs {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
    pub complex_words: usize,
}

impl FormulaInputs {
    pub fn from_text(text: &str) -> Self {
        let stats = TextStatistics::from_text(text);
        Self::from_stats(&stats, count_complex_words(text))
    }

    pub fn from_stats(stats: &TextStatistics, complex_words: usize) -> Self {
        Self {
            words: stats.word_count,
            sentences: stats.sentence_count,
            syllables: stats.total_syllables,
            complex_words,
        }
    }

    fn words_per_sentence(&self) -> f64 {
        ratio(self.words as f64, self.sentences as f64)
    }

    fn syllables_per_word(&self) -> f64 {
        ratio(self.syllables as f64, self.words as f64)
    }

    fn complex_ratio(&self) -> f64 {
        ratio(self.complex_words as f64, self.words as f64)
    }

    fn is_degenerate(&self) -> bool {
        self.words == 0 || self.sentences == 0
    }
}

/// Words of 3+ syllables once a trailing -es, -ed or -ing is removed.
pub fn count_complex_words(text: &str) -> usize {
    words(text)
        .iter()
        .filter(|word| {
            let stem = INFLECTIONS
                .iter()
                .find_map(|suffix| word.strip_suffix(suffix))
                .unwrap_or(word.as_str());
            count_syllables(stem) >= COMPLEX_SYLLABLES
        })
        .count()
}

/// `0.39 * W/S + 11.8 * Y/W - 15.59`, floored at 0. Not capped.
pub fn flesch_kincaid_raw(inputs: &FormulaInputs) -> f64 {
    if inputs.is_degenerate() {
        return 0.0;
    }
    let grade = 0.39 * inputs.words_per_sentence() + 11.8 * inputs.syllables_per_word() - 15.59;
    grade.max(0.0)
}

/// Flesch-Kincaid grade level clamped to `[0, 20]`.
pub fn flesch_kincaid_grade(inputs: &FormulaInputs) -> f64 {
    flesch_kincaid_raw(inputs).clamp(0.0, MAX_GRADE_LEVEL)
}

/// `206.835 - 1.015 * W/S - 84.6 * Y/W`, clamped to `[0, 100]`.
pub fn flesch_reading_ease(inputs: &FormulaInputs) -> f64 {
    if inputs.is_degenerate() {
        return 0.0;
    }
    let ease = 206.835 - 1.015 * inputs.words_per_sentence() - 84.6 * inputs.syllables_per_word();
    ease.clamp(0.0, 100.0)
}

/// `0.4 * (W/S + 100 * C/W)`
pub fn gunning_fog(inputs: &FormulaInputs) -> f64 {
    if inputs.is_degenerate() {
        return 0.0;
    }
    let fog = 0.4 * (inputs.words_per_sentence() + 100.0 * inputs.complex_ratio());
    fog.max(0.0)
}

/// `1.043 * sqrt(C * 30 / S) + 3.1291`
pub fn smog(inputs: &FormulaInputs) -> f64 {
    if inputs.sentences == 0 {
        return 0.0;
    }
    let polysyllables = inputs.complex_words as f64 * 30.0 / inputs.sentences as f64;
    let index = 1.043 * polysyllables.sqrt() + 3.1291;
    index.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::round_to;

    fn inputs(
        words: usize,
        sentences: usize,
        syllables: usize,
        complex_words: usize,
    ) -> FormulaInputs {
        FormulaInputs {
            words,
            sentences,
            syllables,
            complex_words,
        }
    }

    #[test]
    fn test_flesch_kincaid_exact() {
        let grade = flesch_kincaid_grade(&inputs(10, 2, 15, 0));
        assert!((grade - 4.06).abs() < 1e-9);
        assert_eq!(round_to(grade, 1), 4.1);
    }

    #[test]
    fn test_reading_ease_exact() {
        let ease = flesch_reading_ease(&inputs(10, 2, 15, 0));
        assert!((ease - 74.86).abs() < 1e-9);
        assert_eq!(round_to(ease, 1), 74.9);
    }

    #[test]
    fn test_grade_floor_and_cap() {
        // Very short, monosyllabic sentences go negative before the floor
        assert_eq!(flesch_kincaid_grade(&inputs(2, 2, 2, 0)), 0.0);
        // One enormous sentence of long words exceeds the cap
        let huge = inputs(200, 1, 800, 150);
        assert_eq!(flesch_kincaid_grade(&huge), MAX_GRADE_LEVEL);
        assert!(flesch_kincaid_raw(&huge) > MAX_GRADE_LEVEL);
    }

    #[test]
    fn test_reading_ease_clamped() {
        assert_eq!(flesch_reading_ease(&inputs(2, 2, 2, 0)), 100.0);
        assert_eq!(flesch_reading_ease(&inputs(200, 1, 800, 150)), 0.0);
    }

    #[test]
    fn test_gunning_fog() {
        // 0.4 * (5 + 100 * 2/10) = 10
        assert!((gunning_fog(&inputs(10, 2, 15, 2)) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_smog() {
        // 1.043 * sqrt(4 * 30 / 30) + 3.1291 = 5.2151
        assert!((smog(&inputs(100, 30, 150, 4)) - 5.2151).abs() < 1e-9);
        // No complex words still yields the constant
        assert!((smog(&inputs(10, 2, 10, 0)) - 3.1291).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_inputs_are_zero() {
        let empty = FormulaInputs::default();
        assert_eq!(flesch_kincaid_grade(&empty), 0.0);
        assert_eq!(flesch_reading_ease(&empty), 0.0);
        assert_eq!(gunning_fog(&empty), 0.0);
        assert_eq!(smog(&empty), 0.0);
        // Words without any sentence break
        assert_eq!(flesch_kincaid_grade(&inputs(5, 0, 5, 0)), 0.0);
    }

    #[test]
    fn test_count_complex_words() {
        // "beautiful" has 3 syllables
        assert_eq!(count_complex_words("A beautiful day"), 1);
        // "interesting" -> "interest" has 3
        assert_eq!(count_complex_words("interesting"), 1);
        // "educated" -> "educat" has 3
        assert_eq!(count_complex_words("educated"), 1);
        // "boxes" -> "box"
        assert_eq!(count_complex_words("boxes"), 0);
        assert_eq!(count_complex_words(""), 0);
    }

    #[test]
    fn test_inputs_from_text() {
        let parsed = FormulaInputs::from_text("The cat sat. The dog ran!");
        assert_eq!(parsed, inputs(6, 2, 6, 0));
    }
}

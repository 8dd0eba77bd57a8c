use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("word pattern compiles"));

static SENTENCE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+(?:\s|$)").expect("sentence pattern compiles"));

static PARAGRAPH_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph pattern compiles"));

static VOWEL_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[aeiouy]+").expect("vowel pattern compiles"));

/// Words ignored when reducing text to keywords.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "can", "this", "that", "these", "those",
];

/// Minimum keyword length (in characters) used by the curriculum checker.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Counts and averages derived from a block of text.
///
/// Always computed fresh from the input; every average with a zero
/// denominator is 0.0.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TextStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    /// Sum of per-word syllable estimates
    pub total_syllables: usize,
    pub avg_words_per_sentence: f64,
    pub avg_syllables_per_word: f64,
    pub avg_words_per_paragraph: f64,
}

impl TextStatistics {
    pub fn from_text(text: &str) -> Self {
        let words = words(text);
        let word_count = words.len();
        let sentence_count = split_sentences(text).len();
        let paragraph_count = split_paragraphs(text).len();
        let total_syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

        Self {
            word_count,
            sentence_count,
            paragraph_count,
            total_syllables,
            avg_words_per_sentence: ratio(word_count as f64, sentence_count as f64),
            avg_syllables_per_word: ratio(total_syllables as f64, word_count as f64),
            avg_words_per_paragraph: ratio(word_count as f64, paragraph_count as f64),
        }
    }
}

/// Lower-cased word tokens in order of appearance.
pub fn words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn count_words(text: &str) -> usize {
    WORD_RE.find_iter(&text.to_lowercase()).count()
}

/// Sentences split on runs of `.!?` followed by whitespace or end of text.
/// Fragments are trimmed and empty ones dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Paragraphs separated by blank lines, trimmed, empty ones dropped.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK_RE
        .split(text.trim())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Heuristic syllable count: drop a trailing "e", count vowel runs, at least 1.
pub fn count_syllables(word: &str) -> usize {
    let lowered = word.to_lowercase();
    let stem = lowered.strip_suffix('e').unwrap_or(&lowered);
    VOWEL_RUN_RE.find_iter(stem).count().max(1)
}

/// Lower-cased tokens of at least `min_len` characters that are not stop words.
pub fn extract_keywords(text: &str, min_len: usize) -> Vec<String> {
    words(text)
        .into_iter()
        .filter(|w| w.chars().count() >= min_len && !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

/// Division that yields 0.0 instead of NaN/inf on a zero denominator.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

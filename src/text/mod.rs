pub mod patterns;
pub mod stats;

pub use patterns::{CategoryMatch, MatchResult, PatternCategory, PatternSet};
pub use stats::{
    count_syllables, count_words, extract_keywords, ratio, round_to, split_paragraphs,
    split_sentences, words, TextStatistics, MIN_KEYWORD_LEN, STOP_WORDS,
};

use serde::Serialize;

use super::patterns::{ACTIVE_VOICE_RE, DIRECT_ADDRESS_RE};
use crate::text::split_sentences;

const MAX_SUB_SCORE: f64 = 10.0;
const MAX_VARIANCE_SCORE: f64 = 5.0;

/// Engagement signals of a text and the 0-10 score derived from them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EngagementAnalysis {
    pub questions: usize,
    pub exclamations: usize,
    pub direct_address: usize,
    /// Reported only; not part of the score
    pub active_voice: usize,
    pub variance_score: f64,
    pub score: f64,
}

impl EngagementAnalysis {
    pub fn from_text(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let questions = text.matches('?').count();
        let exclamations = text.matches('!').count();
        let direct_address = DIRECT_ADDRESS_RE.find_iter(&lowered).count();
        let active_voice = ACTIVE_VOICE_RE.find_iter(&lowered).count();
        let variance_score = sentence_variance_score(text);

        let score = (questions as f64 * 0.5
            + exclamations as f64 * 0.3
            + direct_address as f64 * 0.2
            + variance_score * 0.5)
            .min(MAX_SUB_SCORE);

        Self {
            questions,
            exclamations,
            direct_address,
            active_voice,
            variance_score,
            score,
        }
    }
}

/// `min(5, variance / 10)` of per-sentence word counts; 0 below two sentences.
pub fn sentence_variance_score(text: &str) -> f64 {
    let lengths: Vec<f64> = split_sentences(text)
        .iter()
        .map(|s| s.split_whitespace().count() as f64)
        .collect();
    if lengths.len() < 2 {
        return 0.0;
    }

    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<f64>() / n;
    let variance = lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / n;
    (variance / 10.0).min(MAX_VARIANCE_SCORE)
}

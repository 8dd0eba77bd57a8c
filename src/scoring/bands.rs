use serde::Serialize;

/// Five-step qualitative rating shared by the bias, curriculum and pedagogy
/// engines, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl Rating {
    pub const ALL: [Rating; 5] = [
        Rating::Excellent,
        Rating::Good,
        Rating::Fair,
        Rating::Poor,
        Rating::VeryPoor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "excellent",
            Rating::Good => "good",
            Rating::Fair => "fair",
            Rating::Poor => "poor",
            Rating::VeryPoor => "very poor",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bounds (inclusive) for Excellent, Good, Fair and Poor; anything
/// below the last bound is VeryPoor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingScale {
    thresholds: [f64; 4],
}

impl RatingScale {
    pub const fn new(excellent: f64, good: f64, fair: f64, poor: f64) -> Self {
        Self {
            thresholds: [excellent, good, fair, poor],
        }
    }

    pub fn rate(&self, score: f64) -> Rating {
        self.thresholds
            .iter()
            .zip(Rating::ALL)
            .find(|(threshold, _)| score >= **threshold)
            .map(|(_, rating)| rating)
            .unwrap_or(Rating::VeryPoor)
    }
}

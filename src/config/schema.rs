use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::evaluation::EngineKind;
use crate::output::DEFAULT_FLAGGED_PHRASE_LIMIT;
use crate::scoring::ScoringConfig;

fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_flagged_phrase_limit() -> usize {
    DEFAULT_FLAGGED_PHRASE_LIMIT
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where `--report` and `--summary` files go; relative paths resolve
    /// against the working directory
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Flagged bias phrases shown per document on the terminal
    #[serde(default = "default_flagged_phrase_limit")]
    pub flagged_phrase_limit: usize,

    /// Engines run when `--engine` is not given (default: all)
    #[serde(default)]
    pub engines: Option<Vec<EngineKind>>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_dir: default_report_dir(),
            flagged_phrase_limit: default_flagged_phrase_limit(),
            engines: None,
            scoring: Some(ScoringConfig::default()),
        }
    }
}

impl Config {
    pub fn engines(&self) -> Vec<EngineKind> {
        match &self.engines {
            Some(engines) if !engines.is_empty() => engines.clone(),
            _ => EngineKind::ALL.to_vec(),
        }
    }

    pub fn scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }
}

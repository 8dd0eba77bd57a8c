//! Error types for edu-eval.
//!
//! Scoring itself never fails on text input. These variants cover the
//! surrounding contract: building engines from a custom configuration,
//! constructing documents, and loading material from disk.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Error, Debug)]
pub enum EvalError {
    /// The caller handed the library something that breaks its input contract
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A scoring configuration failed validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Material could not be loaded from disk
    #[error("Failed to load {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    /// A pattern table entry is not a valid regular expression
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl EvalError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for caller-side contract violations, as opposed to environment
    /// failures such as unreadable files.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EvalError::invalid_input("paragraph 2 is empty");
        assert_eq!(err.to_string(), "Invalid input: paragraph 2 is empty");

        let err = EvalError::load("lesson.pdf", "unsupported file format: .pdf");
        assert!(err.to_string().contains("lesson.pdf"));
        assert!(err.to_string().contains("unsupported"));
    }

    #[test]
    fn test_is_invalid_input() {
        assert!(EvalError::invalid_input("x").is_invalid_input());
        assert!(!EvalError::invalid_config("x").is_invalid_input());
    }

    #[test]
    fn test_regex_error_converts() {
        let err: EvalError = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, EvalError::Pattern(_)));
    }
}

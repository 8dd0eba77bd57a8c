use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::metadata::Metadata;
use crate::error::{EvalError, Result};
use crate::text::{count_words, ratio, split_paragraphs};

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

static DISALLOWED_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.,!?;:\-()]").expect("character filter compiles"));

static TERMINATOR_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("terminator pattern compiles"));

/// Drop every character that is not a word character, whitespace, or
/// `. , ! ? ; : - ( )`, then collapse whitespace runs to one space and trim.
pub fn clean_text(text: &str) -> String {
    let kept = DISALLOWED_CHAR_RE.replace_all(text, "");
    WHITESPACE_RUN_RE.replace_all(kept.trim(), " ").into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Txt,
    Csv,
    /// Built from an in-memory string
    Inline,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Txt => "txt",
            DocumentFormat::Csv => "csv",
            DocumentFormat::Inline => "inline",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Educational material ready for evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub source: Option<PathBuf>,
    pub format: DocumentFormat,
    /// Cleaned text handed to the engines
    pub content: String,
    pub paragraphs: Vec<String>,
    /// Paragraphs fed to per-paragraph analysis: the caller's paragraphs for
    /// [`Document::new`], otherwise each blank-line section of the original
    /// text cleaned on its own. Cleaning joins every line of the whole
    /// document, so `paragraphs` alone would hold a single entry.
    pub source_paragraphs: Vec<String>,
    pub original_content: String,
    pub metadata: Metadata,
    /// Size on disk, for loaded files
    pub file_size: Option<u64>,
}

/// Basic counts over a document's cleaned content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentSummary {
    pub word_count: usize,
    /// Runs of `.`, `!` or `?`
    pub sentence_count: usize,
    pub character_count: usize,
    pub paragraph_count: usize,
    pub avg_paragraph_length: f64,
    pub file_size: Option<u64>,
    pub format: DocumentFormat,
}

impl Document {
    /// Build from caller-supplied content and paragraphs. Every paragraph
    /// must contain non-whitespace text.
    pub fn new(content: impl Into<String>, paragraphs: Vec<String>) -> Result<Self> {
        if let Some(index) = paragraphs.iter().position(|p| p.trim().is_empty()) {
            return Err(EvalError::invalid_input(format!(
                "paragraph {} is empty",
                index + 1
            )));
        }
        let content = content.into();
        Ok(Self {
            source: None,
            format: DocumentFormat::Inline,
            metadata: Metadata::extract(&content),
            original_content: content.clone(),
            content,
            source_paragraphs: paragraphs.clone(),
            paragraphs,
            file_size: None,
        })
    }

    /// Clean an in-memory string and split it into paragraphs.
    pub fn from_text(text: &str) -> Self {
        Self::from_raw(text.to_string(), DocumentFormat::Inline)
    }

    pub(crate) fn from_raw(original: String, format: DocumentFormat) -> Self {
        let content = clean_text(&original);
        let paragraphs = split_paragraphs(&content)
            .into_iter()
            .map(str::to_string)
            .collect();
        let source_paragraphs = split_paragraphs(&original)
            .into_iter()
            .map(clean_text)
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            source: None,
            format,
            metadata: Metadata::extract(&original),
            content,
            paragraphs,
            source_paragraphs,
            original_content: original,
            file_size: None,
        }
    }

    /// Path for display, or `<inline>` for in-memory documents.
    pub fn display_name(&self) -> String {
        self.source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<inline>".to_string())
    }

    pub fn summary(&self) -> ContentSummary {
        let paragraph_words: usize = self
            .paragraphs
            .iter()
            .map(|p| p.split_whitespace().count())
            .sum();
        ContentSummary {
            word_count: count_words(&self.content),
            sentence_count: TERMINATOR_RUN_RE.find_iter(&self.content).count(),
            character_count: self.content.chars().count(),
            paragraph_count: self.paragraphs.len(),
            avg_paragraph_length: ratio(paragraph_words as f64, self.paragraphs.len() as f64),
            file_size: self.file_size,
            format: self.format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Hello\n\n   world\t!  "), "Hello world !");
    }

    #[test]
    fn test_clean_text_strips_symbols() {
        assert_eq!(clean_text("Cost: $5 & up (approx.)"), "Cost: 5 up (approx.)");
        assert_eq!(clean_text("end $"), "end");
        assert_eq!(clean_text("well-known; yes?"), "well-known; yes?");
    }

    #[test]
    fn test_clean_text_keeps_unicode_letters() {
        assert_eq!(clean_text("café naïve"), "café naïve");
    }

    #[test]
    fn test_from_text_is_single_paragraph() {
        let doc = Document::from_text("First paragraph.\n\nSecond paragraph.");
        assert_eq!(doc.content, "First paragraph. Second paragraph.");
        assert_eq!(doc.paragraphs.len(), 1);
        assert_eq!(doc.format, DocumentFormat::Inline);
        assert_eq!(doc.source_paragraphs, vec!["First paragraph.", "Second paragraph."]);
    }

    #[test]
    fn test_new_rejects_blank_paragraph() {
        let err = Document::new("a\n\nb", vec!["a".into(), "   ".into()]).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("paragraph 2"));
    }

    #[test]
    fn test_new_accepts_paragraphs() {
        let doc = Document::new("One. Two.", vec!["One.".into(), "Two.".into()]).unwrap();
        assert_eq!(doc.paragraphs.len(), 2);
        assert_eq!(doc.source_paragraphs, vec!["One.", "Two."]);
        assert_eq!(doc.display_name(), "<inline>");
    }

    #[test]
    fn test_summary_counts() {
        let doc = Document::from_text("Is it done?! Yes. It is done...");
        let summary = doc.summary();
        assert_eq!(summary.word_count, 7);
        assert_eq!(summary.sentence_count, 3);
        assert_eq!(summary.paragraph_count, 1);
        assert_eq!(summary.avg_paragraph_length, 7.0);
        assert_eq!(summary.character_count, doc.content.chars().count());
    }

    #[test]
    fn test_empty_text_summary() {
        let summary = Document::from_text("").summary();
        assert_eq!(summary.word_count, 0);
        assert_eq!(summary.paragraph_count, 0);
        assert_eq!(summary.avg_paragraph_length, 0.0);
    }
}

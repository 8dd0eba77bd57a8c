use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

fn labels(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(&format!(r"(?i){}\s*(.+)", p)).expect("metadata label pattern compiles")
        })
        .collect()
}

static TITLE: Lazy<Vec<Regex>> =
    Lazy::new(|| labels(&[r"Title:", r"Subject:", r"Chapter\s+\d+:", r"Lesson\s+\d+:"]));
static AUTHOR: Lazy<Vec<Regex>> = Lazy::new(|| labels(&[r"Author:", r"By:", r"Written by:"]));
static SUBJECT: Lazy<Vec<Regex>> = Lazy::new(|| labels(&[r"Subject:", r"Topic:", r"Course:"]));
static GRADE_LEVEL: Lazy<Vec<Regex>> =
    Lazy::new(|| labels(&[r"Grade\s+Level:", r"Grade:", r"Level:"]));
static DATE_CREATED: Lazy<Vec<Regex>> =
    Lazy::new(|| labels(&[r"Date:", r"Created:", r"Published:"]));

/// Descriptive fields found in labelled lines such as `Title: Fractions`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub grade_level: Option<String>,
    pub date_created: Option<String>,
}

impl Metadata {
    /// Labels are tried in priority order; the first label present anywhere
    /// in the text wins, and the value is the rest of its line.
    pub fn extract(text: &str) -> Self {
        Self {
            title: first_capture(&TITLE, text),
            author: first_capture(&AUTHOR, text),
            subject: first_capture(&SUBJECT, text),
            grade_level: first_capture(&GRADE_LEVEL, text),
            date_created: first_capture(&DATE_CREATED, text),
        }
    }

    /// Display label and value for every field that was found.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Grade Level", &self.grade_level),
            ("Date Created", &self.date_created),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .filter(|(_, v)| !v.is_empty())
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_labelled_fields() {
        let text = "Title: Fractions Made Easy\nAuthor: J. Rivera\nGrade Level: 4\n\
                    Date: 2024-09-01\n\nBody text.";
        let meta = Metadata::extract(text);
        assert_eq!(meta.title.as_deref(), Some("Fractions Made Easy"));
        assert_eq!(meta.author.as_deref(), Some("J. Rivera"));
        assert_eq!(meta.grade_level.as_deref(), Some("4"));
        assert_eq!(meta.date_created.as_deref(), Some("2024-09-01"));
        assert_eq!(meta.subject, None);
    }

    #[test]
    fn test_label_priority_beats_position() {
        // "Title:" is preferred even though "Lesson 3:" appears first
        let meta = Metadata::extract("Lesson 3: Plants\nTitle: Growing Things");
        assert_eq!(meta.title.as_deref(), Some("Growing Things"));
    }

    #[test]
    fn test_subject_fills_title_and_subject() {
        let meta = Metadata::extract("subject: Biology");
        assert_eq!(meta.title.as_deref(), Some("Biology"));
        assert_eq!(meta.subject.as_deref(), Some("Biology"));
    }

    #[test]
    fn test_grade_level_label_preferred() {
        let meta = Metadata::extract("Level: Beginner\nGrade Level: 7");
        assert_eq!(meta.grade_level.as_deref(), Some("7"));
    }

    #[test]
    fn test_entries_skip_missing() {
        let meta = Metadata::extract("By: Sam Lee\nPlain content.");
        assert_eq!(meta.entries(), vec![("Author", "Sam Lee")]);
        assert!(!meta.is_empty());
        assert!(Metadata::extract("nothing labelled").is_empty());
    }
}

use regex::{Captures, Regex, RegexBuilder};
use serde::Serialize;

use crate::error::Result;

/// A named group of case-insensitive regular expressions.
#[derive(Debug, Clone)]
pub struct PatternCategory {
    name: String,
    patterns: Vec<Regex>,
}

impl PatternCategory {
    pub fn new(name: impl Into<String>, patterns: &[&str]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.into(),
            patterns,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }
}

/// Indicator count for one category inside a [`MatchResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMatch {
    pub name: String,
    pub indicators: usize,
}

/// Outcome of running a [`PatternSet`] over a text.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MatchResult {
    pub total_indicators: usize,
    /// Matched fragments in category order, then pattern order, then match
    /// order. Duplicates are kept.
    pub flagged_fragments: Vec<String>,
    pub categories_checked: Vec<String>,
    pub per_category: Vec<CategoryMatch>,
}

/// An ordered, immutable collection of pattern categories.
#[derive(Debug, Clone)]
pub struct PatternSet {
    name: String,
    categories: Vec<PatternCategory>,
}

impl PatternSet {
    pub fn new(name: impl Into<String>, categories: Vec<PatternCategory>) -> Self {
        Self {
            name: name.into(),
            categories,
        }
    }

    /// Compile a set from a static `(category, patterns)` table.
    pub fn from_table(name: impl Into<String>, table: &[(&str, &[&str])]) -> Result<Self> {
        let categories = table
            .iter()
            .map(|(category, patterns)| PatternCategory::new(*category, patterns))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(name, categories))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn categories(&self) -> &[PatternCategory] {
        &self.categories
    }

    fn all_patterns(&self) -> impl Iterator<Item = &Regex> {
        self.categories.iter().flat_map(|c| c.patterns.iter())
    }

    /// Count every match of every pattern and collect the matched fragments.
    pub fn match_text(&self, text: &str) -> MatchResult {
        let lowered = text.to_lowercase();
        let mut result = MatchResult::default();

        for category in &self.categories {
            let mut indicators = 0;
            for pattern in &category.patterns {
                for caps in pattern.captures_iter(&lowered) {
                    indicators += 1;
                    result.flagged_fragments.push(fragment(&caps));
                }
            }
            result.total_indicators += indicators;
            result.categories_checked.push(category.name.clone());
            result.per_category.push(CategoryMatch {
                name: category.name.clone(),
                indicators,
            });
        }

        result
    }

    /// Total number of matches without collecting fragments.
    pub fn count_matches(&self, text: &str) -> usize {
        let lowered = text.to_lowercase();
        self.all_patterns()
            .map(|p| p.find_iter(&lowered).count())
            .sum()
    }

    /// Whether any pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.all_patterns().any(|p| p.is_match(&lowered))
    }
}

/// The literal text a match contributes to a fragment list.
///
/// Patterns without groups contribute the whole match. Patterns with groups
/// contribute their captured groups joined by a space; a group nested inside
/// an earlier captured group is skipped so its text is not repeated.
fn fragment(caps: &Captures<'_>) -> String {
    if caps.len() == 1 {
        return caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default();
    }

    let mut parts: Vec<&str> = Vec::new();
    let mut covered_until = 0;
    for group in caps.iter().skip(1).flatten() {
        if !parts.is_empty() && group.end() <= covered_until {
            continue;
        }
        covered_until = group.end();
        parts.push(group.as_str());
    }
    parts.join(" ")
}

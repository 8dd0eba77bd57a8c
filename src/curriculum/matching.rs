use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::text::{extract_keywords, MIN_KEYWORD_LEN};

/// How a taxonomy topic is judged "covered" by a keyword set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicMatchStrategy {
    /// Any topic word is a keyword, the whole topic is a keyword, or a
    /// keyword and the topic contain one another as substrings.
    #[default]
    Permissive,
    /// Only whole-word or whole-phrase equality counts.
    Strict,
}

impl TopicMatchStrategy {
    pub fn matches(&self, topic: &str, keywords: &KeywordSet) -> bool {
        let topic = topic.to_lowercase();
        let exact = topic
            .split_whitespace()
            .any(|word| keywords.contains(word))
            || keywords.contains(&topic);

        match self {
            TopicMatchStrategy::Strict => exact,
            TopicMatchStrategy::Permissive => {
                exact
                    || keywords
                        .iter()
                        .any(|k| topic.contains(k) || k.contains(topic.as_str()))
            }
        }
    }
}

/// De-duplicated, stop-word-filtered keywords of a text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordSet {
    keywords: HashSet<String>,
}

impl KeywordSet {
    pub fn from_text(text: &str) -> Self {
        Self {
            keywords: extract_keywords(text, MIN_KEYWORD_LEN).into_iter().collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

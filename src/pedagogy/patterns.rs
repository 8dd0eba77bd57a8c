use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::PatternSet;

const OBJECTIVES: &[&str] = &[
    r"learning objective[s]?",
    r"objective[s]?",
    r"goal[s]?",
    r"student[s]? will",
    r"student[s]? can",
    r"student[s]? should",
    r"understand",
    r"identify",
    r"describe",
    r"explain",
    r"analyze",
    r"evaluate",
    r"create",
    r"demonstrate",
];

const EXAMPLES: &[&str] = &[
    r"example[s]?",
    r"for example",
    r"such as",
    r"including",
    r"like",
    r"specifically",
    r"instance",
    r"illustration",
    r"case study",
    r"sample",
];

const ASSESSMENTS: &[&str] = &[
    r"question[s]?",
    r"quiz",
    r"test",
    r"assessment",
    r"evaluation",
    r"exercise[s]?",
    r"activity",
    r"practice",
    r"review",
    r"check your understanding",
];

const STRUCTURE: &[&str] = &[
    r"introduction",
    r"conclusion",
    r"summary",
    r"overview",
    r"background",
    r"key points",
    r"main idea",
    r"important",
    r"note",
    r"remember",
];

/// Transition words and phrases, counted as plain substrings.
pub const FLOW_CONNECTIVES: &[&str] = &[
    "first",
    "second",
    "third",
    "next",
    "then",
    "finally",
    "however",
    "therefore",
    "consequently",
    "in addition",
    "furthermore",
    "moreover",
    "on the other hand",
];

fn single(name: &str, patterns: &[&str]) -> PatternSet {
    PatternSet::from_table(name, &[(name, patterns)]).expect("built-in pedagogy patterns compile")
}

pub static LEARNING_OBJECTIVES: Lazy<PatternSet> =
    Lazy::new(|| single("learning_objectives", OBJECTIVES));
pub static EXAMPLE_LANGUAGE: Lazy<PatternSet> = Lazy::new(|| single("examples", EXAMPLES));
pub static ASSESSMENT_LANGUAGE: Lazy<PatternSet> = Lazy::new(|| single("assessment", ASSESSMENTS));
pub static STRUCTURE_LANGUAGE: Lazy<PatternSet> = Lazy::new(|| single("structure", STRUCTURE));

/// Second-person address; also hits inside words such as "young".
pub static DIRECT_ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"you|your").expect("direct address pattern compiles"));

pub static ACTIVE_VOICE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(is|are|was|were)\s+\w+ing").expect("active voice pattern compiles")
});

/// Non-overlapping substring occurrences of every flow connective.
pub fn count_flow_connectives(text: &str) -> usize {
    let lowered = text.to_lowercase();
    FLOW_CONNECTIVES
        .iter()
        .map(|connective| lowered.matches(connective).count())
        .sum()
}

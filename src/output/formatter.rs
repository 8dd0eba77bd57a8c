use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::evaluation::{EngineKind, Evaluation};

/// Flagged phrases shown when no limit is configured.
pub const DEFAULT_FLAGGED_PHRASE_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    pub use_colors: bool,
    pub flagged_phrase_limit: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            use_colors: false,
            flagged_phrase_limit: DEFAULT_FLAGGED_PHRASE_LIMIT,
        }
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// `"72.50/100"`, colored green/yellow/red by the share of `max` reached.
pub fn format_score(score: f64, max: f64, use_colors: bool) -> String {
    let text = format!("{:.2}/{}", score, max);
    if !use_colors {
        return text;
    }
    let share = if max > 0.0 { score / max } else { 0.0 };
    if share >= 0.8 {
        text.green().bold().to_string()
    } else if share >= 0.6 {
        text.yellow().bold().to_string()
    } else {
        text.red().bold().to_string()
    }
}

/// At most `limit` phrases, then an "... and N more" line for the rest.
pub fn format_flagged_phrases(phrases: &[String], limit: usize) -> Vec<String> {
    let mut lines: Vec<String> = phrases
        .iter()
        .take(limit)
        .map(|p| format!("- {}", p))
        .collect();
    if phrases.len() > limit {
        lines.push(format!("... and {} more", phrases.len() - limit));
    }
    lines
}

fn heading(title: &str, use_colors: bool) -> String {
    let rule = "=".repeat(40);
    if use_colors {
        format!("{}\n{}\n{}", rule.dimmed(), title.bold(), rule.dimmed())
    } else {
        format!("{}\n{}\n{}", rule, title, rule)
    }
}

fn push_recommendations(lines: &mut Vec<String>, recommendations: &[String]) {
    if recommendations.is_empty() {
        return;
    }
    lines.push("Recommendations:".to_string());
    lines.extend(recommendations.iter().map(|r| format!("  - {}", r)));
}

fn format_engine(
    evaluation: &Evaluation,
    kind: EngineKind,
    opts: &FormatOptions,
) -> Option<String> {
    let mut lines = vec![heading(kind.title(), opts.use_colors)];

    match kind {
        EngineKind::Readability => {
            let r = evaluation.readability.as_ref()?;
            lines.push(format!("Flesch-Kincaid Grade Level: {:.1}", r.grade_level));
            lines.push(format!(
                "Flesch Reading Ease: {:.1} ({})",
                r.reading_ease, r.reading_ease_assessment
            ));
            lines.push(format!("Gunning Fog Index: {:.1}", r.gunning_fog));
            lines.push(format!("SMOG Index: {:.1}", r.smog));
            lines.push(format!("Average Words per Sentence: {:.1}", r.avg_words_per_sentence));
            lines.push(format!("Average Syllables per Word: {:.2}", r.avg_syllables_per_word));
            lines.push(format!("Complexity Level: {}", r.complexity_level));
            lines.push(format!("Recommended Audience: {}", r.recommended_audience));
            if let Some(c) = &evaluation.formula_comparison {
                lines.push(format!(
                    "Average Grade Level: {:.1} ({})",
                    c.average_grade_level, c.agreement
                ));
            }
            lines.push(format!("Readability Assessment: {}", r.assessment));
            push_recommendations(&mut lines, &r.recommendations);
        }
        EngineKind::Curriculum => {
            let c = evaluation.curriculum.as_ref()?;
            lines.push(format!(
                "Alignment Score: {}",
                format_score(c.score, 100.0, opts.use_colors)
            ));
            for subject in &c.subjects {
                lines.push(format!(
                    "  {}: {:.1}/100 ({}/{} topics)",
                    subject.subject,
                    subject.score,
                    subject.covered.len(),
                    subject.total_topics
                ));
            }
            lines.push(format!("Covered Topics: {}", c.total_topics_covered));
            lines.push(format!("Missing Topics: {}", c.total_topics_missing));
            lines.push(format!("Suggested Grade Level: {}", c.grade_level));
            lines.push(format!("Overall Assessment: {}", c.assessment));
            push_recommendations(&mut lines, &c.recommendations);
        }
        EngineKind::Pedagogy => {
            let p = evaluation.pedagogy.as_ref()?;
            lines.push(format!(
                "Pedagogical Score: {}",
                format_score(p.score, 100.0, opts.use_colors)
            ));
            lines.push(format!("Learning Objectives: {:.1}/10", p.objectives_score));
            lines.push(format!("Examples and Illustrations: {:.1}/10", p.examples_score));
            lines.push(format!("Assessment Elements: {:.1}/10", p.assessment_score));
            lines.push(format!("Structure and Organization: {:.1}/10", p.structure_score));
            lines.push(format!("Engagement Factors: {:.1}/10", p.engagement_score));
            lines.push(format!("Overall Assessment: {}", p.assessment));
            push_recommendations(&mut lines, &p.recommendations);
        }
        EngineKind::Bias => {
            let b = evaluation.bias.as_ref()?;
            lines.push(format!(
                "Bias Score: {}",
                format_score(b.score, 100.0, opts.use_colors)
            ));
            for d in &b.dimensions {
                lines.push(format!("  {}: {:.1}/100", d.dimension.label(), d.score));
            }
            lines.push(format!("Overall Assessment: {}", b.assessment));
            if !b.flagged_phrases.is_empty() {
                lines.push("Flagged Phrases:".to_string());
                lines.extend(format_flagged_phrases(
                    &b.flagged_phrases,
                    opts.flagged_phrase_limit,
                ));
            }
            push_recommendations(&mut lines, &b.recommendations);
        }
    }

    Some(lines.join("\n"))
}

/// Full terminal view of one evaluation.
pub fn format_evaluation(evaluation: &Evaluation, opts: &FormatOptions) -> String {
    let title = if opts.use_colors {
        evaluation.source.bold().to_string()
    } else {
        evaluation.source.clone()
    };
    let mut sections = vec![format!(
        "{} ({} words, {} paragraphs)",
        title, evaluation.summary.word_count, evaluation.summary.paragraph_count
    )];

    sections.extend(
        EngineKind::ALL
            .iter()
            .filter_map(|&kind| format_engine(evaluation, kind, opts)),
    );

    if let Some(paragraphs) = &evaluation.paragraphs {
        let mut lines = vec![heading("Paragraph Readability", opts.use_colors)];
        for p in paragraphs {
            lines.push(format!(
                "{:>3}. grade {:.1}, ease {:.1}  {}",
                p.number, p.result.grade_level, p.result.reading_ease, p.preview
            ));
        }
        sections.push(lines.join("\n"));
    }

    if let Some(overall) = evaluation.overall_quality() {
        sections.push(format!(
            "Overall Quality Score: {}\nRecommendation: {}",
            format_score(overall.score, 100.0, opts.use_colors),
            overall.label
        ));
    }

    sections.join("\n\n")
}

/// One line per evaluation: index, overall score, source. Sources are
/// truncated to the terminal width; pipes get them whole.
pub fn format_batch_table(evaluations: &[Evaluation], use_colors: bool) -> String {
    if evaluations.is_empty() {
        return "No documents evaluated.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 4;
    let score_width = 6;
    let separator = "  ";

    evaluations
        .iter()
        .enumerate()
        .map(|(idx, evaluation)| {
            let index_str = format!("{:>3}.", idx + 1);
            let score_str = evaluation
                .overall_quality()
                .map(|q| format!("{:.1}", q.score))
                .unwrap_or_else(|| "-".to_string());
            let score_padded = format!("{:>width$}", score_str, width = score_width);

            let fixed_width = index_width + score_width + separator.len() * 2;
            let source = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(&evaluation.source, width - fixed_width)
                }
                Some(_) => truncate_text(&evaluation.source, 20),
                None => evaluation.source.clone(),
            };

            if use_colors {
                format!(
                    "{}{}{}{}{}",
                    index_str.dimmed(),
                    separator,
                    score_padded.bold(),
                    separator,
                    source
                )
            } else {
                format!("{}{}{}{}{}", index_str, separator, score_padded, separator, source)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A single evaluation as a JSON object, several as an array.
pub fn format_json(evaluations: &[Evaluation]) -> serde_json::Result<String> {
    match evaluations {
        [single] => serde_json::to_string_pretty(single),
        many => serde_json::to_string_pretty(many),
    }
}

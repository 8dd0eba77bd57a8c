//! Plain-text evaluation reports written to the report directory.

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::evaluation::Evaluation;

const WIDE_RULE_WIDTH: usize = 80;
const SECTION_RULE_WIDTH: usize = 40;
const SUMMARY_RULE_WIDTH: usize = 50;

/// Flagged phrases listed in the bias section of a full report.
const REPORT_FLAGGED_PHRASES: usize = 10;

/// Recommendations carried into the overall section.
const PRIORITY_RECOMMENDATIONS: usize = 5;

const ACTION_ITEMS: &[&str] = &[
    "Review flagged bias issues and revise insensitive language",
    "Address curriculum gaps by adding missing topics",
    "Improve readability if grade level is inappropriate",
    "Enhance pedagogical elements (objectives, examples, assessments)",
    "Consider feedback from diverse stakeholders",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Full,
    Summary,
}

impl ReportKind {
    fn file_prefix(&self) -> &'static str {
        match self {
            ReportKind::Full => "evaluation_report",
            ReportKind::Summary => "summary_report",
        }
    }

    pub fn file_name(&self, generated: &DateTime<Local>) -> String {
        format!(
            "{}_{}.txt",
            self.file_prefix(),
            generated.format("%Y%m%d_%H%M%S")
        )
    }

    pub fn render(&self, evaluation: &Evaluation, generated: &DateTime<Local>) -> String {
        match self {
            ReportKind::Full => full_report(evaluation, generated),
            ReportKind::Summary => summary_report(evaluation, generated),
        }
    }
}

fn timestamp(generated: &DateTime<Local>) -> String {
    generated.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn section(title: &str) -> Vec<String> {
    vec![title.to_string(), "-".repeat(SECTION_RULE_WIDTH)]
}

fn bullets(lines: &mut Vec<String>, items: &[String]) {
    lines.extend(items.iter().map(|i| format!("  • {}", i)));
}

/// Header, material information, executive summary, one section per engine
/// that ran, overall recommendations and footer.
pub fn full_report(evaluation: &Evaluation, generated: &DateTime<Local>) -> String {
    let mut parts = vec![
        header(generated),
        material_section(evaluation),
        executive_summary(evaluation),
    ];
    parts.extend(curriculum_section(evaluation));
    parts.extend(readability_section(evaluation));
    parts.extend(pedagogy_section(evaluation));
    parts.extend(bias_section(evaluation));
    parts.push(overall_section(evaluation));
    parts.push(footer(generated));
    parts.join("\n\n")
}

fn header(generated: &DateTime<Local>) -> String {
    let rule = "=".repeat(WIDE_RULE_WIDTH);
    [
        rule.clone(),
        "EDUCATIONAL RESOURCE QUALITY EVALUATION REPORT".to_string(),
        rule.clone(),
        format!("Generated: {}", timestamp(generated)),
        "Educational Resource Quality Evaluator".to_string(),
        "Comprehensive Analysis and Recommendations".to_string(),
        rule,
    ]
    .join("\n")
}

fn material_section(evaluation: &Evaluation) -> String {
    let summary = &evaluation.summary;
    let mut lines = section("MATERIAL INFORMATION");
    lines.push(format!("File Path: {}", evaluation.source));
    lines.push(format!("File Type: {}", summary.format));
    if let Some(size) = summary.file_size {
        lines.push(format!("File Size: {} bytes", size));
    }
    lines.push(format!("Content Length: {} characters", summary.character_count));
    lines.push(format!("Word Count: {}", summary.word_count));
    lines.push(format!("Paragraph Count: {}", summary.paragraph_count));

    let entries = evaluation.metadata.entries();
    if !entries.is_empty() {
        lines.push("\nMetadata:".to_string());
        lines.extend(entries.iter().map(|(k, v)| format!("  {}: {}", k, v)));
    }
    lines.join("\n")
}

fn executive_summary(evaluation: &Evaluation) -> String {
    let mut lines = section("EXECUTIVE SUMMARY");
    if let Some(overall) = evaluation.overall_quality() {
        lines.push(format!("Overall Quality Score: {:.2}/100", overall.score));
        lines.push(format!("Recommendation: {}", overall.label));
    }

    lines.push("\nKey Findings:".to_string());
    if let Some(c) = &evaluation.curriculum {
        lines.push(format!("  • Curriculum Alignment: {:.1}/100", c.score));
        lines.push(format!("  • Topics Covered: {}", c.total_topics_covered));
        lines.push(format!("  • Topics Missing: {}", c.total_topics_missing));
    }
    if let Some(r) = &evaluation.readability {
        lines.push(format!("  • Readability Grade Level: {:.1}", r.grade_level));
        lines.push(format!("  • Reading Ease: {:.1}", r.reading_ease));
    }
    if let Some(p) = &evaluation.pedagogy {
        lines.push(format!("  • Pedagogical Quality: {:.1}/100", p.score));
    }
    if let Some(b) = &evaluation.bias {
        lines.push(format!("  • Bias Assessment: {:.1}/100", b.score));
        lines.push(format!("  • Flagged Phrases: {}", b.flagged_phrases.len()));
    }
    lines.join("\n")
}

fn curriculum_section(evaluation: &Evaluation) -> Option<String> {
    let c = evaluation.curriculum.as_ref()?;
    let mut lines = section("CURRICULUM ALIGNMENT ANALYSIS");
    lines.push(format!("Alignment Score: {:.2}/100", c.score));
    lines.push(format!("Assessment: {}", c.assessment));
    lines.push(String::new());
    lines.push("Subject Area Breakdown:".to_string());
    for subject in &c.subjects {
        lines.push(format!("  • {}: {:.1}/100", subject.subject, subject.score));
    }
    lines.push("\nCoverage Details:".to_string());
    lines.push(format!("  • Topics Covered: {}", c.total_topics_covered));
    lines.push(format!("  • Topics Missing: {}", c.total_topics_missing));
    lines.push(format!("  • Coverage Percentage: {:.1}%", c.coverage_percentage));
    lines.push(format!("  • Suggested Grade Level: {}", c.grade_level));
    lines.push("\nRecommendations:".to_string());
    bullets(&mut lines, &c.recommendations);
    Some(lines.join("\n"))
}

fn readability_section(evaluation: &Evaluation) -> Option<String> {
    let r = evaluation.readability.as_ref()?;
    let mut lines = section("READABILITY ANALYSIS");
    lines.push(format!("Flesch-Kincaid Grade Level: {:.1}", r.grade_level));
    lines.push(format!("Flesch Reading Ease: {:.1}", r.reading_ease));
    lines.push(format!("Assessment: {}", r.assessment));
    lines.push(String::new());
    lines.push("Detailed Metrics:".to_string());
    lines.push(format!("  • Average Words per Sentence: {:.1}", r.avg_words_per_sentence));
    lines.push(format!("  • Average Syllables per Word: {:.2}", r.avg_syllables_per_word));
    lines.push(format!("  • Word Count: {}", r.word_count));
    lines.push(format!("  • Sentence Count: {}", r.sentence_count));
    lines.push(format!("  • Complexity Level: {}", r.complexity_level));
    lines.push(format!("  • Recommended Audience: {}", r.recommended_audience));
    lines.push(format!("  • Gunning Fog Index: {:.1}", r.gunning_fog));
    lines.push(format!("  • SMOG Index: {:.1}", r.smog));
    if let Some(c) = &evaluation.formula_comparison {
        lines.push(format!(
            "  • Average Grade Level: {:.1} ({})",
            c.average_grade_level, c.agreement
        ));
    }
    lines.push("\nRecommendations:".to_string());
    bullets(&mut lines, &r.recommendations);
    Some(lines.join("\n"))
}

fn pedagogy_section(evaluation: &Evaluation) -> Option<String> {
    let p = evaluation.pedagogy.as_ref()?;
    let mut lines = section("PEDAGOGICAL QUALITY ANALYSIS");
    lines.push(format!("Overall Pedagogical Score: {:.2}/100", p.score));
    lines.push(format!("Assessment: {}", p.assessment));
    lines.push(String::new());
    lines.push("Component Scores:".to_string());
    lines.push(format!("  • Learning Objectives: {:.1}/10", p.objectives_score));
    lines.push(format!("  • Examples & Illustrations: {:.1}/10", p.examples_score));
    lines.push(format!("  • Assessment Elements: {:.1}/10", p.assessment_score));
    lines.push(format!("  • Structure & Organization: {:.1}/10", p.structure_score));
    lines.push(format!("  • Engagement Factors: {:.1}/10", p.engagement_score));
    lines.push("\nRecommendations:".to_string());
    bullets(&mut lines, &p.recommendations);
    Some(lines.join("\n"))
}

fn bias_section(evaluation: &Evaluation) -> Option<String> {
    let b = evaluation.bias.as_ref()?;
    let mut lines = section("BIAS & SENSITIVITY ANALYSIS");
    lines.push(format!("Overall Bias Score: {:.2}/100", b.score));
    lines.push(format!("Assessment: {}", b.assessment));
    lines.push(String::new());
    lines.push("Bias Analysis:".to_string());
    for d in &b.dimensions {
        lines.push(format!("  • {}: {:.1}/100", d.dimension.label(), d.score));
    }

    if !b.flagged_phrases.is_empty() {
        lines.push(format!(
            "\nFlagged Phrases ({} found):",
            b.flagged_phrases.len()
        ));
        let shown = &b.flagged_phrases[..b.flagged_phrases.len().min(REPORT_FLAGGED_PHRASES)];
        bullets(&mut lines, shown);
        if b.flagged_phrases.len() > REPORT_FLAGGED_PHRASES {
            lines.push(format!(
                "  ... and {} more",
                b.flagged_phrases.len() - REPORT_FLAGGED_PHRASES
            ));
        }
    }

    lines.push("\nRecommendations:".to_string());
    bullets(&mut lines, &b.recommendations);
    Some(lines.join("\n"))
}

fn overall_section(evaluation: &Evaluation) -> String {
    let mut lines = section("OVERALL ASSESSMENT & RECOMMENDATIONS");
    let recommendations = evaluation.all_recommendations();
    if !recommendations.is_empty() {
        lines.push("Priority Recommendations:".to_string());
        lines.extend(
            recommendations
                .iter()
                .take(PRIORITY_RECOMMENDATIONS)
                .enumerate()
                .map(|(i, r)| format!("  {}. {}", i + 1, r)),
        );
    }
    lines.push("\nAction Items:".to_string());
    lines.extend(
        ACTION_ITEMS
            .iter()
            .enumerate()
            .map(|(i, item)| format!("  {}. {}", i + 1, item)),
    );
    lines.join("\n")
}

fn footer(generated: &DateTime<Local>) -> String {
    let rule = "=".repeat(WIDE_RULE_WIDTH);
    [
        rule.clone(),
        "Report generated by Educational Resource Quality Evaluator".to_string(),
        format!("Generated on: {}", timestamp(generated)),
        "For questions or support, please refer to the user manual".to_string(),
        rule,
    ]
    .join("\n")
}

/// Quick scores and the overall score.
pub fn summary_report(evaluation: &Evaluation, generated: &DateTime<Local>) -> String {
    let mut lines = vec![
        "EDUCATIONAL RESOURCE EVALUATION SUMMARY".to_string(),
        "=".repeat(SUMMARY_RULE_WIDTH),
        format!("File: {}", evaluation.source),
        format!("Generated: {}", timestamp(generated)),
        String::new(),
        "QUICK SCORES:".to_string(),
    ];
    if let Some(c) = &evaluation.curriculum {
        lines.push(format!("  Curriculum Alignment: {:.1}/100", c.score));
    }
    if let Some(r) = &evaluation.readability {
        lines.push(format!("  Readability Grade: {:.1}", r.grade_level));
    }
    if let Some(p) = &evaluation.pedagogy {
        lines.push(format!("  Pedagogical Quality: {:.1}/100", p.score));
    }
    if let Some(b) = &evaluation.bias {
        lines.push(format!("  Bias Assessment: {:.1}/100", b.score));
    }
    if let Some(overall) = evaluation.overall_quality() {
        lines.push(format!("\nOverall Score: {:.1}/100", overall.score));
        lines.push(format!("Recommendation: {}", overall.label));
    }
    lines.join("\n")
}

/// `dir/name`, or `dir/<stem>_N.txt` for the first N >= 2 not yet taken, so
/// reports generated within the same second do not replace each other.
fn unused_path(dir: &Path, name: &str) -> PathBuf {
    let first = dir.join(name);
    if !first.exists() {
        return first;
    }
    let stem = name.trim_end_matches(".txt");
    (2..)
        .map(|n| dir.join(format!("{}_{}.txt", stem, n)))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

/// Render a report and write it atomically into `dir`, creating the
/// directory if needed. Returns the path written.
pub fn write_report(
    dir: &Path,
    kind: ReportKind,
    evaluation: &Evaluation,
    generated: &DateTime<Local>,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;

    let path = unused_path(dir, &kind.file_name(generated));
    let contents = kind.render(evaluation, generated);

    let mut file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save report to {}", path.display()))?;

    log::info!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{EngineKind, Evaluator};
    use crate::loader::Document;
    use chrono::TimeZone;

    fn at_noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 5, 12, 30, 45).unwrap()
    }

    fn evaluation(engines: &[EngineKind]) -> Evaluation {
        let doc = Document::from_text(
            "Title: Fractions\n\nStudents will learn fractions. For example, a half. \
             The male nurse counts. What is a quarter?",
        );
        Evaluator::default().evaluate(&doc, engines)
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            ReportKind::Full.file_name(&at_noon()),
            "evaluation_report_20240305_123045.txt"
        );
        assert_eq!(
            ReportKind::Summary.file_name(&at_noon()),
            "summary_report_20240305_123045.txt"
        );
    }

    #[test]
    fn test_full_report_sections() {
        let report = full_report(&evaluation(&EngineKind::ALL), &at_noon());
        assert!(report.starts_with(&"=".repeat(80)));
        for heading in [
            "EDUCATIONAL RESOURCE QUALITY EVALUATION REPORT",
            "MATERIAL INFORMATION",
            "EXECUTIVE SUMMARY",
            "CURRICULUM ALIGNMENT ANALYSIS",
            "READABILITY ANALYSIS",
            "PEDAGOGICAL QUALITY ANALYSIS",
            "BIAS & SENSITIVITY ANALYSIS",
            "OVERALL ASSESSMENT & RECOMMENDATIONS",
        ] {
            assert!(report.contains(heading), "missing {}", heading);
        }
        assert!(report.contains("Generated: 2024-03-05 12:30:45"));
        assert!(report.contains("  Title: Fractions"));
        assert!(report.contains("  • male nurse"));
        assert!(report.contains("  5. Consider feedback from diverse stakeholders"));
    }

    #[test]
    fn test_full_report_omits_engines_not_run() {
        let report = full_report(&evaluation(&[EngineKind::Readability]), &at_noon());
        assert!(report.contains("READABILITY ANALYSIS"));
        assert!(!report.contains("BIAS & SENSITIVITY ANALYSIS"));
        assert!(!report.contains("Overall Quality Score"));
    }

    #[test]
    fn test_priority_recommendations_capped() {
        let report = full_report(&evaluation(&EngineKind::ALL), &at_noon());
        let overall = report
            .split("OVERALL ASSESSMENT & RECOMMENDATIONS")
            .nth(1)
            .unwrap();
        let priorities = overall.split("Action Items:").next().unwrap();
        let numbered = priorities
            .lines()
            .filter(|l| l.trim_start().chars().next().is_some_and(|c| c.is_ascii_digit()))
            .count();
        assert!(numbered <= 5);
        assert!(numbered > 0);
    }

    #[test]
    fn test_summary_report() {
        let evaluation = evaluation(&[EngineKind::Bias, EngineKind::Pedagogy]);
        let report = summary_report(&evaluation, &at_noon());
        assert!(report.starts_with("EDUCATIONAL RESOURCE EVALUATION SUMMARY\n"));
        assert!(report.contains("File: <inline>"));
        assert!(report.contains("  Bias Assessment: 95.0/100"));
        assert!(!report.contains("Readability Grade"));
        assert!(report.contains("Overall Score:"));
    }

    #[test]
    fn test_same_second_reports_do_not_collide() {
        let dir = tempfile::TempDir::new().unwrap();
        let evaluation = evaluation(&[EngineKind::Bias]);
        let first = write_report(dir.path(), ReportKind::Full, &evaluation, &at_noon()).unwrap();
        let second = write_report(dir.path(), ReportKind::Full, &evaluation, &at_noon()).unwrap();
        assert_ne!(first, second);
        assert_eq!(
            second,
            dir.path().join("evaluation_report_20240305_123045_2.txt")
        );
    }

    #[test]
    fn test_write_report_creates_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let reports = dir.path().join("reports");
        let path = write_report(
            &reports,
            ReportKind::Summary,
            &evaluation(&EngineKind::ALL),
            &at_noon(),
        )
        .unwrap();
        assert_eq!(path, reports.join("summary_report_20240305_123045.txt"));
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("QUICK SCORES:"));
    }
}

//! Running the engines over documents.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::bias::{BiasEngine, BiasResult};
use crate::curriculum::{CurriculumEngine, CurriculumResult};
use crate::error::{EvalError, Result};
use crate::loader::{ContentSummary, Document, Metadata};
use crate::pedagogy::{PedagogyEngine, PedagogyResult};
use crate::readability::{
    FormulaComparison, ParagraphReadability, ReadabilityEngine, ReadabilityResult,
    MAX_GRADE_LEVEL,
};
use crate::scoring::ScoringConfig;
use crate::text::ratio;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Readability,
    Curriculum,
    Pedagogy,
    Bias,
}

impl EngineKind {
    pub const ALL: [EngineKind; 4] = [
        EngineKind::Readability,
        EngineKind::Curriculum,
        EngineKind::Pedagogy,
        EngineKind::Bias,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Readability => "readability",
            EngineKind::Curriculum => "curriculum",
            EngineKind::Pedagogy => "pedagogy",
            EngineKind::Bias => "bias",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EngineKind::Readability => "Readability",
            EngineKind::Curriculum => "Curriculum Alignment",
            EngineKind::Pedagogy => "Pedagogical Quality",
            EngineKind::Bias => "Bias & Cultural Sensitivity",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "readability" => Ok(EngineKind::Readability),
            "curriculum" => Ok(EngineKind::Curriculum),
            "pedagogy" => Ok(EngineKind::Pedagogy),
            "bias" => Ok(EngineKind::Bias),
            other => Err(EvalError::invalid_input(format!(
                "unknown engine '{}'. Expected one of: readability, curriculum, pedagogy, bias",
                other
            ))),
        }
    }
}

/// Mean of the 0-100 composites with its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallQuality {
    pub score: f64,
    pub label: &'static str,
}

impl OverallQuality {
    fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let score = ratio(scores.iter().sum(), scores.len() as f64);
        let label = if score >= 80.0 {
            "EXCELLENT - Ready for use"
        } else if score >= 60.0 {
            "GOOD - Minor improvements needed"
        } else if score >= 40.0 {
            "FAIR - Significant improvements needed"
        } else {
            "POOR - Major revisions required"
        };
        Some(Self { score, label })
    }
}

/// Engine-independent view of one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSummary {
    pub engine: EngineKind,
    pub composite: f64,
    /// Upper bound of `composite`: 20 for readability grade level, else 100
    pub scale_max: f64,
    pub sub_scores: Vec<(String, f64)>,
    pub assessment: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub source: String,
    pub summary: ContentSummary,
    pub metadata: Metadata,
    pub readability: Option<ReadabilityResult>,
    pub formula_comparison: Option<FormulaComparison>,
    pub curriculum: Option<CurriculumResult>,
    pub pedagogy: Option<PedagogyResult>,
    pub bias: Option<BiasResult>,
    /// Present when per-paragraph readability was requested
    pub paragraphs: Option<Vec<ParagraphReadability>>,
}

impl Evaluation {
    /// Mean of curriculum, pedagogy and bias scores among the engines that
    /// ran. Readability grade level is on a different scale and is left out.
    pub fn overall_quality(&self) -> Option<OverallQuality> {
        let scores: Vec<f64> = [
            self.curriculum.as_ref().map(|c| c.score),
            self.pedagogy.as_ref().map(|p| p.score),
            self.bias.as_ref().map(|b| b.score),
        ]
        .into_iter()
        .flatten()
        .collect();
        OverallQuality::from_scores(&scores)
    }

    pub fn engines(&self) -> Vec<EngineKind> {
        self.summaries().into_iter().map(|s| s.engine).collect()
    }

    pub fn summaries(&self) -> Vec<EngineSummary> {
        let mut out = Vec::new();
        if let Some(r) = &self.readability {
            out.push(EngineSummary {
                engine: EngineKind::Readability,
                composite: r.grade_level,
                scale_max: MAX_GRADE_LEVEL,
                sub_scores: named(&[
                    ("Reading Ease", r.reading_ease),
                    ("Gunning Fog", r.gunning_fog),
                    ("SMOG", r.smog),
                    ("Words per Sentence", r.avg_words_per_sentence),
                    ("Syllables per Word", r.avg_syllables_per_word),
                ]),
                assessment: r.assessment.to_string(),
                recommendations: r.recommendations.clone(),
            });
        }
        if let Some(c) = &self.curriculum {
            out.push(EngineSummary {
                engine: EngineKind::Curriculum,
                composite: c.score,
                scale_max: 100.0,
                sub_scores: c
                    .subjects
                    .iter()
                    .map(|s| (s.subject.clone(), s.score))
                    .collect(),
                assessment: c.assessment.to_string(),
                recommendations: c.recommendations.clone(),
            });
        }
        if let Some(p) = &self.pedagogy {
            out.push(EngineSummary {
                engine: EngineKind::Pedagogy,
                composite: p.score,
                scale_max: 100.0,
                sub_scores: named(&[
                    ("Learning Objectives", p.objectives_score),
                    ("Examples & Illustrations", p.examples_score),
                    ("Assessment Elements", p.assessment_score),
                    ("Structure & Organization", p.structure_score),
                    ("Engagement Factors", p.engagement_score),
                ]),
                assessment: p.assessment.to_string(),
                recommendations: p.recommendations.clone(),
            });
        }
        if let Some(b) = &self.bias {
            out.push(EngineSummary {
                engine: EngineKind::Bias,
                composite: b.score,
                scale_max: 100.0,
                sub_scores: b
                    .dimensions
                    .iter()
                    .map(|d| (d.dimension.label().to_string(), d.score))
                    .collect(),
                assessment: b.assessment.to_string(),
                recommendations: b.recommendations.clone(),
            });
        }
        out
    }

    /// Fill in results for engines that ran in `other`, keeping the rest.
    pub fn merge(&mut self, other: Evaluation) {
        if other.readability.is_some() {
            self.readability = other.readability;
            self.formula_comparison = other.formula_comparison;
        }
        if other.curriculum.is_some() {
            self.curriculum = other.curriculum;
        }
        if other.pedagogy.is_some() {
            self.pedagogy = other.pedagogy;
        }
        if other.bias.is_some() {
            self.bias = other.bias;
        }
        if other.paragraphs.is_some() {
            self.paragraphs = other.paragraphs;
        }
    }

    /// Every engine's recommendations, in summary order.
    pub fn all_recommendations(&self) -> Vec<String> {
        self.summaries()
            .into_iter()
            .flat_map(|s| s.recommendations)
            .collect()
    }
}

fn named(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
    pairs.iter().map(|(n, v)| (n.to_string(), *v)).collect()
}

/// Owns one instance of each engine, built once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    readability: ReadabilityEngine,
    curriculum: CurriculumEngine,
    pedagogy: PedagogyEngine,
    bias: BiasEngine,
    per_paragraph: bool,
}

impl Evaluator {
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        Ok(Self {
            readability: ReadabilityEngine::new(),
            curriculum: CurriculumEngine::from_config(config),
            pedagogy: PedagogyEngine::from_config(config),
            bias: BiasEngine::from_config(config)?,
            per_paragraph: false,
        })
    }

    /// Also run readability on each source paragraph.
    pub fn with_paragraphs(mut self, enabled: bool) -> Self {
        self.per_paragraph = enabled;
        self
    }

    pub fn readability(&self) -> &ReadabilityEngine {
        &self.readability
    }

    pub fn curriculum(&self) -> &CurriculumEngine {
        &self.curriculum
    }

    pub fn pedagogy(&self) -> &PedagogyEngine {
        &self.pedagogy
    }

    pub fn bias(&self) -> &BiasEngine {
        &self.bias
    }

    /// Run the selected engines. The engines are independent, so they run
    /// in parallel; the result does not depend on scheduling.
    pub fn evaluate(&self, document: &Document, engines: &[EngineKind]) -> Evaluation {
        let text = document.content.as_str();
        let wants = |kind: EngineKind| engines.contains(&kind);

        let ((readability, curriculum), (pedagogy, bias)) = rayon::join(
            || {
                rayon::join(
                    || {
                        wants(EngineKind::Readability).then(|| {
                            (
                                self.readability.analyze(text),
                                self.readability.compare_formulas(text),
                            )
                        })
                    },
                    || wants(EngineKind::Curriculum).then(|| self.curriculum.analyze(text)),
                )
            },
            || {
                rayon::join(
                    || wants(EngineKind::Pedagogy).then(|| self.pedagogy.analyze(text)),
                    || wants(EngineKind::Bias).then(|| self.bias.analyze(text)),
                )
            },
        );

        let paragraphs = (self.per_paragraph && wants(EngineKind::Readability))
            .then(|| self.readability.analyze_paragraphs(&document.source_paragraphs));

        let (readability, formula_comparison) = match readability {
            Some((result, comparison)) => (Some(result), Some(comparison)),
            None => (None, None),
        };
        debug!(
            "evaluated {} with {} engine(s)",
            document.display_name(),
            engines.len()
        );

        Evaluation {
            source: document.display_name(),
            summary: document.summary(),
            metadata: document.metadata.clone(),
            readability,
            formula_comparison,
            curriculum,
            pedagogy,
            bias,
            paragraphs,
        }
    }

    /// Evaluate many documents in parallel, one task per document. Output
    /// order matches input order.
    pub fn evaluate_batch(
        &self,
        documents: &[Document],
        engines: &[EngineKind],
    ) -> Vec<Evaluation> {
        documents
            .par_iter()
            .map(|doc| self.evaluate(doc, engines))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LESSON: &str = "Students will understand fractions. For example, half of a pizza \
                          is one of two equal parts. Practice this exercise. What is a quarter?";

    #[test]
    fn test_engine_kind_parse() {
        assert_eq!("Bias".parse::<EngineKind>().unwrap(), EngineKind::Bias);
        assert_eq!(" readability ".parse::<EngineKind>().unwrap(), EngineKind::Readability);
        let err = "grammar".parse::<EngineKind>().unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_evaluate_selected_engines_only() {
        let doc = Document::from_text(LESSON);
        let evaluation = Evaluator::default().evaluate(&doc, &[EngineKind::Bias]);
        assert!(evaluation.bias.is_some());
        assert!(evaluation.readability.is_none());
        assert!(evaluation.formula_comparison.is_none());
        assert!(evaluation.curriculum.is_none());
        assert!(evaluation.pedagogy.is_none());
        assert_eq!(evaluation.engines(), vec![EngineKind::Bias]);
    }

    #[test]
    fn test_evaluate_matches_direct_engine_calls() {
        let doc = Document::from_text(LESSON);
        let evaluator = Evaluator::default();
        let evaluation = evaluator.evaluate(&doc, &EngineKind::ALL);
        assert_eq!(evaluation.pedagogy, Some(PedagogyEngine::default().analyze(&doc.content)));
        assert_eq!(evaluation.bias, Some(BiasEngine::default().analyze(&doc.content)));
        assert_eq!(
            evaluation.readability,
            Some(ReadabilityEngine::new().analyze(&doc.content))
        );
    }

    #[test]
    fn test_overall_quality_excludes_readability() {
        let doc = Document::from_text(LESSON);
        let evaluation = Evaluator::default().evaluate(&doc, &EngineKind::ALL);
        let bias = evaluation.bias.as_ref().unwrap().score;
        let pedagogy = evaluation.pedagogy.as_ref().unwrap().score;
        let curriculum = evaluation.curriculum.as_ref().unwrap().score;
        let overall = evaluation.overall_quality().unwrap();
        assert!((overall.score - (bias + pedagogy + curriculum) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_quality_none_for_readability_only() {
        let doc = Document::from_text(LESSON);
        let evaluation = Evaluator::default().evaluate(&doc, &[EngineKind::Readability]);
        assert_eq!(evaluation.overall_quality(), None);
    }

    #[test]
    fn test_overall_quality_labels() {
        assert_eq!(
            OverallQuality::from_scores(&[100.0]).unwrap().label,
            "EXCELLENT - Ready for use"
        );
        assert_eq!(
            OverallQuality::from_scores(&[60.0]).unwrap().label,
            "GOOD - Minor improvements needed"
        );
        assert_eq!(
            OverallQuality::from_scores(&[40.0, 40.0]).unwrap().label,
            "FAIR - Significant improvements needed"
        );
        assert_eq!(
            OverallQuality::from_scores(&[39.9]).unwrap().label,
            "POOR - Major revisions required"
        );
    }

    #[test]
    fn test_summaries_order_and_scale() {
        let doc = Document::from_text(LESSON);
        let evaluation = Evaluator::default().evaluate(&doc, &EngineKind::ALL);
        let summaries = evaluation.summaries();
        let kinds: Vec<EngineKind> = summaries.iter().map(|s| s.engine).collect();
        assert_eq!(kinds, EngineKind::ALL.to_vec());
        assert_eq!(summaries[0].scale_max, 20.0);
        assert_eq!(summaries[1].sub_scores.len(), 4);
        assert_eq!(summaries[2].sub_scores.len(), 5);
        assert_eq!(summaries[3].sub_scores[0].0, "Gender Bias");
    }

    #[test]
    fn test_paragraph_analysis_uses_source_paragraphs() {
        let doc = Document::from_text("First part here.\n\nSecond part here.\n\n   \n\nThird.");
        let evaluation = Evaluator::default()
            .with_paragraphs(true)
            .evaluate(&doc, &[EngineKind::Readability]);
        let paragraphs = evaluation.paragraphs.unwrap();
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[2].number, 3);
        assert_eq!(paragraphs[2].preview, "Third.");
    }

    #[test]
    fn test_paragraph_analysis_uses_caller_paragraphs() {
        let doc = Document::new(
            "Alpha beta gamma. Delta epsilon zeta.",
            vec!["Alpha beta gamma.".into(), "Delta epsilon zeta.".into()],
        )
        .unwrap();
        let evaluation = Evaluator::default()
            .with_paragraphs(true)
            .evaluate(&doc, &[EngineKind::Readability]);
        let paragraphs = evaluation.paragraphs.unwrap();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].preview, "Alpha beta gamma.");
        assert_eq!(paragraphs[1].number, 2);
        assert_eq!(paragraphs[1].preview, "Delta epsilon zeta.");
    }

    #[test]
    fn test_merge_accumulates_engines() {
        let doc = Document::from_text(LESSON);
        let evaluator = Evaluator::default();
        let mut evaluation = evaluator.evaluate(&doc, &[EngineKind::Bias]);
        evaluation.merge(evaluator.evaluate(&doc, &[EngineKind::Pedagogy]));
        assert_eq!(evaluation.engines(), vec![EngineKind::Pedagogy, EngineKind::Bias]);
        assert_eq!(evaluation.overall_quality().unwrap().score, {
            let p = evaluation.pedagogy.as_ref().unwrap().score;
            let b = evaluation.bias.as_ref().unwrap().score;
            (p + b) / 2.0
        });
    }

    #[test]
    fn test_batch_preserves_order() {
        let docs: Vec<Document> = ["The male nurse.", "Plants grow.", "Exotic and primitive."]
            .iter()
            .map(|t| Document::from_text(t))
            .collect();
        let evaluator = Evaluator::default();
        let batch = evaluator.evaluate_batch(&docs, &[EngineKind::Bias]);
        assert_eq!(batch.len(), 3);
        for (doc, evaluation) in docs.iter().zip(&batch) {
            assert_eq!(evaluation, &evaluator.evaluate(doc, &[EngineKind::Bias]));
        }
        assert_eq!(batch[1].bias.as_ref().unwrap().score, 100.0);
    }
}

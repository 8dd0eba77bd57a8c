//! Interactive menu: load one material, run engines one at a time, write a
//! report.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};

use crate::config::{prompt, Config};
use crate::evaluation::{EngineKind, Evaluation, Evaluator};
use crate::loader::{load_material, Document};
use crate::output::{format_evaluation, write_report, FormatOptions, ReportKind};

const MENU: &str = "\
Main Menu:
1. Load Educational Material
2. Check Curriculum Alignment
3. Analyze Readability Score
4. Evaluate Pedagogical Quality
5. Run Bias & Sensitivity Analysis
6. Generate Final Evaluation Report
7. Exit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Load,
    Run(EngineKind),
    Report,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Load),
            "2" => Some(MenuChoice::Run(EngineKind::Curriculum)),
            "3" => Some(MenuChoice::Run(EngineKind::Readability)),
            "4" => Some(MenuChoice::Run(EngineKind::Pedagogy)),
            "5" => Some(MenuChoice::Run(EngineKind::Bias)),
            "6" => Some(MenuChoice::Report),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// State carried between menu actions.
pub struct Session {
    evaluator: Evaluator,
    options: FormatOptions,
    report_dir: PathBuf,
    document: Option<Document>,
    results: Option<Evaluation>,
}

impl Session {
    pub fn new(evaluator: Evaluator, config: &Config, use_colors: bool) -> Self {
        Self {
            evaluator,
            options: FormatOptions {
                use_colors,
                flagged_phrase_limit: config.flagged_phrase_limit,
            },
            report_dir: config.report_dir.clone(),
            document: None,
            results: None,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn results(&self) -> Option<&Evaluation> {
        self.results.as_ref()
    }

    /// Load material, discarding results for any previous document.
    pub fn load(&mut self, path: &Path) -> Result<String> {
        let document = load_material(path)?;
        let message = format!(
            "Successfully loaded: {}\nContent length: {} characters\nParagraphs: {}",
            path.display(),
            document.content.chars().count(),
            document.paragraphs.len()
        );
        self.document = Some(document);
        self.results = None;
        Ok(message)
    }

    /// Run one engine on the loaded material and show its section.
    pub fn run(&mut self, kind: EngineKind) -> Result<String> {
        let document = self
            .document
            .as_ref()
            .context("Please load educational material first (Option 1).")?;
        let evaluation = self.evaluator.evaluate(document, &[kind]);
        let shown = format_evaluation(&evaluation, &self.options);

        match &mut self.results {
            Some(results) => results.merge(evaluation),
            None => self.results = Some(evaluation),
        }
        Ok(shown)
    }

    /// Write the full report for every engine run so far.
    pub fn generate_report(&self) -> Result<PathBuf> {
        if self.document.is_none() {
            anyhow::bail!("Please load educational material first (Option 1).");
        }
        let results = self
            .results
            .as_ref()
            .context("Please run at least one analysis before generating a report.")?;
        write_report(&self.report_dir, ReportKind::Full, results, &Local::now())
    }
}

/// Run the menu loop until the user exits or input ends.
pub fn run_interactive(session: &mut Session) -> Result<()> {
    println!("{}", "=".repeat(60));
    println!("Educational Resource Quality Evaluator");
    println!("{}", "=".repeat(60));
    println!();

    loop {
        println!("{}", MENU);
        let Some(input) = prompt("Enter your choice (1-7): ")? else {
            println!("\nExiting...");
            return Ok(());
        };
        let Some(choice) = MenuChoice::parse(&input) else {
            println!("Invalid choice. Please enter a number between 1 and 7.");
            continue;
        };

        let outcome = match choice {
            MenuChoice::Exit => {
                println!("Thank you for using the Educational Resource Quality Evaluator!");
                return Ok(());
            }
            MenuChoice::Load => match prompt("Enter the path to the educational material file: ")? {
                None => return Ok(()),
                Some(path) if path.is_empty() => Ok("Please provide a file path.".to_string()),
                Some(path) => session.load(Path::new(&path)),
            },
            MenuChoice::Run(kind) => session.run(kind),
            MenuChoice::Report => session.generate_report().map(|path| {
                let mut message = format!("Report generated successfully: {}", path.display());
                if let Some(overall) = session.results().and_then(|r| r.overall_quality()) {
                    message.push_str(&format!(
                        "\nOverall Quality Score: {:.2}/100\nRecommendation: {}",
                        overall.score, overall.label
                    ));
                }
                message
            }),
        };

        match outcome {
            Ok(message) => println!("\n{}\n", message),
            Err(e) => {
                log::debug!("menu action failed: {:?}", e);
                println!("\nError: {:#}\n", e);
            }
        }
    }
}

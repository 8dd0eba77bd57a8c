use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use edu_eval::config::Config;
use edu_eval::evaluation::{EngineKind, Evaluator};
use edu_eval::loader::{load_material, Document};
use edu_eval::output::{self, FormatOptions, ReportKind};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum EngineArg {
    Readability,
    Curriculum,
    Pedagogy,
    Bias,
    All,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate one or more .txt/.csv files (paths or glob patterns)
    Evaluate {
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Engines to run; repeat for several (default: all, or `engines` from config)
        #[arg(short, long = "engine", value_enum)]
        engines: Vec<EngineArg>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write a full report per document to the report directory
        #[arg(long)]
        report: bool,

        /// Write a summary report per document to the report directory
        #[arg(long)]
        summary: bool,

        /// Also score readability paragraph by paragraph
        #[arg(long)]
        paragraphs: bool,
    },
    /// Menu-driven session: load material, run engines, generate a report
    Interactive,
    /// Write the default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "edu-eval")]
#[command(about = "Educational resource quality evaluator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/edu-eval/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = cli.command {
        match edu_eval::config::write_default_config(config_path, force) {
            Ok(path) => {
                println!("Config written to {}", path.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    let config = match edu_eval::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let scoring = config.scoring();
    if let Err(errors) = edu_eval::scoring::validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let evaluator = match Evaluator::from_config(&scoring) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let code = match cli.command {
        Commands::Evaluate {
            patterns,
            engines,
            format,
            report,
            summary,
            paragraphs,
        } => {
            let request = EvaluateRequest {
                patterns,
                engines: resolve_engines(&engines, &config),
                format,
                report,
                summary,
                paragraphs,
            };
            run_evaluate(evaluator, &config, request)
        }
        Commands::Interactive => {
            let mut session =
                edu_eval::menu::Session::new(evaluator, &config, output::should_use_colors());
            match edu_eval::menu::run_interactive(&mut session) {
                Ok(()) => EXIT_SUCCESS,
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    EXIT_FAILURE
                }
            }
        }
        Commands::Init { .. } => EXIT_SUCCESS,
    };

    std::process::exit(code);
}

struct EvaluateRequest {
    patterns: Vec<String>,
    engines: Vec<EngineKind>,
    format: OutputFormat,
    report: bool,
    summary: bool,
    paragraphs: bool,
}

/// `--engine` flags win over the config; `all` anywhere selects every engine.
fn resolve_engines(args: &[EngineArg], config: &Config) -> Vec<EngineKind> {
    if args.is_empty() {
        return config.engines();
    }
    if args.contains(&EngineArg::All) {
        return EngineKind::ALL.to_vec();
    }
    // Keep canonical order regardless of flag order
    EngineKind::ALL
        .into_iter()
        .filter(|kind| {
            args.iter().any(|arg| match arg {
                EngineArg::Readability => *kind == EngineKind::Readability,
                EngineArg::Curriculum => *kind == EngineKind::Curriculum,
                EngineArg::Pedagogy => *kind == EngineKind::Pedagogy,
                EngineArg::Bias => *kind == EngineKind::Bias,
                EngineArg::All => true,
            })
        })
        .collect()
}

/// Paths for each pattern. Patterns without glob metacharacters pass
/// through unchanged so a missing file surfaces as a load error.
fn expand_patterns(patterns: &[String]) -> (Vec<PathBuf>, Vec<String>) {
    let mut paths = Vec::new();
    let mut problems = Vec::new();

    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(pattern));
            continue;
        }
        match glob::glob(pattern) {
            Ok(entries) => {
                let before = paths.len();
                for entry in entries {
                    match entry {
                        Ok(path) if path.is_file() => paths.push(path),
                        Ok(_) => {}
                        Err(e) => problems.push(format!("{}: {}", pattern, e)),
                    }
                }
                if paths.len() == before {
                    problems.push(format!("{}: no files match", pattern));
                }
            }
            Err(e) => problems.push(format!("{}: invalid pattern: {}", pattern, e)),
        }
    }

    (paths, problems)
}

fn run_evaluate(evaluator: Evaluator, config: &Config, request: EvaluateRequest) -> i32 {
    let start_time = Instant::now();
    let (paths, mut problems) = expand_patterns(&request.patterns);

    let mut documents: Vec<Document> = Vec::new();
    for path in &paths {
        match load_material(path) {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                problems.push(e.to_string());
            }
        }
    }

    let evaluator = evaluator.with_paragraphs(request.paragraphs);
    let evaluations = evaluator.evaluate_batch(&documents, &request.engines);

    let elapsed = Duration::from_millis(start_time.elapsed().as_millis() as u64);
    log::info!(
        "Evaluated {} document(s) in {}",
        evaluations.len(),
        humantime::format_duration(elapsed)
    );

    match request.format {
        OutputFormat::Json => match output::format_json(&evaluations) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize results: {}", e);
                return EXIT_FAILURE;
            }
        },
        OutputFormat::Text => {
            let use_colors = output::should_use_colors();
            let opts = FormatOptions {
                use_colors,
                flagged_phrase_limit: config.flagged_phrase_limit,
            };
            let blocks: Vec<String> = evaluations
                .iter()
                .map(|e| output::format_evaluation(e, &opts))
                .collect();
            println!("{}", blocks.join("\n\n"));
            if evaluations.len() > 1 {
                println!();
                println!("{}", output::format_batch_table(&evaluations, use_colors));
            }
        }
    }

    let generated = Local::now();
    let kinds = [
        (request.report, ReportKind::Full),
        (request.summary, ReportKind::Summary),
    ];
    for evaluation in &evaluations {
        for (_, kind) in kinds.iter().filter(|(wanted, _)| *wanted) {
            match output::write_report(&config.report_dir, *kind, evaluation, &generated) {
                Ok(path) => eprintln!("Report written to {}", path.display()),
                Err(e) => problems.push(format!("{:#}", e)),
            }
        }
    }

    if problems.is_empty() {
        return EXIT_SUCCESS;
    }
    for problem in &problems {
        eprintln!("Error: {}", problem);
    }
    EXIT_FAILURE
}

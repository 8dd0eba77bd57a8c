pub mod formatter;
pub mod report;

pub use formatter::{
    format_batch_table, format_evaluation, format_flagged_phrases, format_json, format_score,
    should_use_colors, FormatOptions, DEFAULT_FLAGGED_PHRASE_LIMIT,
};
pub use report::{full_report, summary_report, write_report, ReportKind};

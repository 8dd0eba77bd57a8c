//! Loading educational material from `.txt` and `.csv` files.

pub mod document;
pub mod metadata;

pub use document::{clean_text, ContentSummary, Document, DocumentFormat};
pub use metadata::Metadata;

use log::{debug, info, warn};
use std::fs;
use std::path::Path;

use crate::error::{EvalError, Result};

/// Largest file accepted by [`load_material`].
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "csv"];

/// Load a material file and prepare it for evaluation.
///
/// # Errors
///
/// Returns [`EvalError::Load`] if:
/// - The path is not a readable file
/// - The file is larger than [`MAX_FILE_SIZE`]
/// - The extension is not `.txt` or `.csv`
/// - Nothing readable remains after cleaning
pub fn load_material(path: &Path) -> Result<Document> {
    let meta = fs::metadata(path)
        .ok()
        .filter(|m| m.is_file())
        .ok_or_else(|| EvalError::load(path, "file not found or not accessible"))?;

    let file_size = meta.len();
    if file_size > MAX_FILE_SIZE {
        return Err(EvalError::load(
            path,
            format!(
                "file too large ({} bytes). Maximum size is {} bytes.",
                file_size, MAX_FILE_SIZE
            ),
        ));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let format = match extension.as_str() {
        "txt" => DocumentFormat::Txt,
        "csv" => DocumentFormat::Csv,
        other => {
            let shown = if other.is_empty() {
                "(none)".to_string()
            } else {
                format!(".{}", other)
            };
            return Err(EvalError::load(
                path,
                format!(
                    "unsupported file format: {}. Supported formats: .txt, .csv",
                    shown
                ),
            ));
        }
    };

    let bytes = fs::read(path).map_err(|e| EvalError::load(path, e.to_string()))?;
    let text = decode(&bytes, path);

    let original = match format {
        DocumentFormat::Csv => csv_text(&text, path)?,
        _ => text,
    };

    let mut document = Document::from_raw(original, format);
    if document.content.trim().is_empty() {
        return Err(EvalError::load(
            path,
            "file appears to be empty or contains no readable content",
        ));
    }
    document.source = Some(path.to_path_buf());
    document.file_size = Some(file_size);

    info!(
        "Loaded {} ({}, {} bytes, {} paragraphs)",
        path.display(),
        format,
        file_size,
        document.paragraphs.len()
    );
    Ok(document)
}

/// UTF-8, or Latin-1 when the bytes are not valid UTF-8. Latin-1 maps every
/// byte to the code point of the same value, so decoding cannot fail.
fn decode(bytes: &[u8], path: &Path) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            warn!(
                "{} is not valid UTF-8 ({}), decoding as Latin-1",
                path.display(),
                e
            );
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

/// Join each record's non-blank cells with a space and the records with a
/// blank line.
fn csv_text(text: &str, path: &Path) -> Result<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| EvalError::load(path, format!("invalid CSV: {}", e)))?;
        let row = record
            .iter()
            .filter(|cell| !cell.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !row.is_empty() {
            rows.push(row);
        }
    }
    debug!("{}: {} non-empty CSV rows", path.display(), rows.len());

    if rows.is_empty() {
        return Err(EvalError::load(
            path,
            "CSV file appears to be empty or contains no readable content",
        ));
    }
    Ok(rows.join("\n\n"))
}

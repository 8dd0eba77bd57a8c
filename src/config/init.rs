use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, Config};

/// Prompt user with a message and return their trimmed input.
///
/// Returns `None` on end of input.
pub fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

const HEADER: &str = "\
# edu-eval configuration
#
# report_dir: directory for full and summary reports
# flagged_phrase_limit: flagged bias phrases listed per document on the terminal
# engines: default engine selection (readability, curriculum, pedagogy, bias)
# scoring: weights and count buckets; each weight group must sum to 1
";

/// Write the default configuration to `path`, or the default location.
///
/// Refuses to replace an existing file unless `force` is set. Returns the
/// path written.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let yaml = serde_saphyr::to_string(&Config::default())
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    save_atomically(&config_path, &format!("{}\n{}", HEADER, yaml))?;
    log::info!("Wrote default config to {}", config_path.display());
    Ok(config_path)
}

fn save_atomically(path: &Path, contents: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;
    Ok(())
}

mod init;
mod schema;

pub use init::{prompt, write_default_config};
pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/edu-eval/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("edu-eval"))
}

/// Get the default config file path (~/.config/edu-eval/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to built-in defaults when that file does not exist
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => match get_config_path() {
            Ok(p) => (p, false),
            Err(e) => {
                log::debug!("No default config location ({}), using defaults", e);
                return Ok(Config::default());
            }
        },
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        log::debug!(
            "No config at {}, using defaults",
            config_path.display()
        );
        return Ok(Config::default());
    }

    parse_config_file(&config_path)
}

fn parse_config_file(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    log::debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_explicit_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "flagged_phrase_limit: 2\n").unwrap();
        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.flagged_phrase_limit, 2);
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(dir.path().join("missing.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "unknown_key: 1\n").unwrap();
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}

mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/task-match/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("task-match"))
}

/// Get the default config file path (~/.config/task-match/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to an empty config when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit config path does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            read_config(&path)
        }
        None => {
            let default_path = get_config_path()?;
            if default_path.exists() {
                read_config(&default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let mut config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    config.tasks = config.tasks.map(|p| resolve_catalog_path(&p, base));
    config.volunteers = config.volunteers.map(|p| resolve_catalog_path(&p, base));
    config.source = Some(path.to_path_buf());

    Ok(config)
}

/// Expand a leading `~` to the home directory and anchor relative paths at
/// `base` (the directory holding the config file)
fn resolve_catalog_path(raw: &Path, base: &Path) -> PathBuf {
    if let Ok(rest) = raw.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if raw.is_relative() {
        base.join(raw)
    } else {
        raw.to_path_buf()
    }
}

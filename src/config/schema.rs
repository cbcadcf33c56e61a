use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringConfig;

/// Application config.
///
/// Catalog paths may start with `~/`; relative paths are taken from the
/// directory holding the config file.
///
/// Example YAML:
/// ```yaml
/// tasks: ~/events/spring/tasks.yaml
/// volunteers: ~/events/spring/volunteers.yaml
/// scoring:
///   accumulation: cumulative
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Task catalog file (YAML or JSON)
    #[serde(default)]
    pub tasks: Option<PathBuf>,

    /// Volunteer catalog file (YAML or JSON)
    #[serde(default)]
    pub volunteers: Option<PathBuf>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    /// File this config was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// One-line note on where this config came from, for `--verbose`.
    pub fn source_description(&self) -> String {
        match &self.source {
            Some(path) => format!("Loaded config from {}", path.display()),
            None => "No config file found, using defaults".to_string(),
        }
    }
}

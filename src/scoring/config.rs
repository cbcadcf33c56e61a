use serde::{Deserialize, Serialize};

/// How per-volunteer contributions turn into a task's aggregate score.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Accumulation {
    /// One running total carried across tasks in catalog order; each task
    /// stores the total so far, its own contributions included.
    #[default]
    Cumulative,
    /// Each task is scored on its own contributions only.
    PerTask,
}

impl std::fmt::Display for Accumulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Accumulation::Cumulative => write!(f, "cumulative"),
            Accumulation::PerTask => write!(f, "per_task"),
        }
    }
}

/// Scoring configuration.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   accumulation: per_task
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Defaults to `cumulative`
    #[serde(default)]
    pub accumulation: Option<Accumulation>,
}

impl ScoringConfig {
    pub fn accumulation(&self) -> Accumulation {
        self.accumulation.unwrap_or_default()
    }
}

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::types::{Task, TaskCatalog, Volunteer};
use super::validation::validate_volunteers;

/// Read a sequence of records from a YAML or JSON file.
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML.
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file at {}", path.display()))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: invalid JSON in {}", path.display()))
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: invalid YAML in {}", path.display()))
    }
}

/// Load the task catalog from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if two records
/// share an id.
pub fn load_tasks(path: &Path) -> Result<TaskCatalog> {
    let tasks: Vec<Task> = read_records(path)?;
    TaskCatalog::from_tasks(tasks)
        .with_context(|| format!("Invalid task catalog {}", path.display()))
}

/// Load volunteers from a file, checking every interest against `tasks`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, if a name repeats,
/// or if an interest references a task id missing from `tasks`. All problems
/// are listed in the error message.
pub fn load_volunteers(path: &Path, tasks: &TaskCatalog) -> Result<Vec<Volunteer>> {
    let volunteers: Vec<Volunteer> = read_records(path)?;

    if let Err(errors) = validate_volunteers(&volunteers, tasks) {
        anyhow::bail!(
            "Invalid volunteer catalog {}:\n  - {}",
            path.display(),
            errors.join("\n  - ")
        );
    }

    Ok(volunteers)
}

use std::collections::HashSet;

use super::types::{Scorable, TaskCatalog, Volunteer};

/// Validate a volunteer batch against the task catalog.
/// Returns all validation errors at once (not just the first).
pub fn validate_volunteers(
    volunteers: &[Volunteer],
    tasks: &TaskCatalog,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(mut dupes) = validate_unique_names(volunteers, &[] as &[Volunteer]) {
        errors.append(&mut dupes);
    }

    for (i, volunteer) in volunteers.iter().enumerate() {
        if volunteer.name.trim().is_empty() {
            errors.push(format!("volunteers[{}].name: must not be empty", i));
        }
        for (j, id) in volunteer.interested_tasks.iter().enumerate() {
            if !tasks.contains(*id) {
                errors.push(format!(
                    "volunteers[{}].interested_tasks[{}]: unknown task id {}",
                    i, j, id
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that every name in `incoming` is unique, both within the batch and
/// against volunteers already present in `existing`.
pub fn validate_unique_names<V: Scorable, E: Scorable>(
    incoming: &[V],
    existing: &[E],
) -> Result<(), Vec<String>> {
    let mut seen: HashSet<&str> = existing.iter().map(|v| v.name()).collect();
    let mut errors = Vec::new();

    for (i, volunteer) in incoming.iter().enumerate() {
        if !seen.insert(volunteer.name()) {
            errors.push(format!(
                "volunteers[{}].name: duplicate volunteer '{}'",
                i,
                volunteer.name()
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::assign::Assignments;
use crate::catalog::{Scorable, Task, TaskCatalog, TaskId};
use crate::scoring::RankedTask;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with at most three decimals, trailing zeros trimmed
/// (1.3, 2.05, 0)
pub fn format_score(score: f64) -> String {
    let formatted = format!("{:.3}", score);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate label to fit available width, accounting for Unicode
fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn task_label(tasks: &TaskCatalog, id: TaskId) -> String {
    tasks
        .get(id)
        .map(Task::label)
        .unwrap_or_else(|| format!("#{}", id))
}

/// Format the priority order as a table: Index, Score, Kind, Id, Label
/// Index column: 3 chars (fits "99."), right-aligned
/// Score column: 8 chars, right-aligned
pub fn format_task_order(order: &[RankedTask], tasks: &TaskCatalog, use_colors: bool) -> String {
    if order.is_empty() {
        return "No tasks found.".to_string();
    }

    let term_width = get_terminal_width();
    let score_width = 8;
    let separator = "  ";

    order
        .iter()
        .enumerate()
        .map(|(idx, ranked)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded =
                format!("{:>width$}", format_score(ranked.score), width = score_width);
            let people_facing = tasks.get(ranked.task_id).is_some_and(|t| t.people_facing);
            let kind = if people_facing { "P" } else { " " };
            let id_str = format!("#{:<5}", ranked.task_id);

            let fixed_width =
                index_str.len() + 1 + score_width + separator.len() * 3 + 1 + id_str.len();
            let label = task_label(tasks, ranked.task_id);
            let label = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_label(&label, width - fixed_width)
                }
                Some(_) => truncate_label(&label, 20),
                None => label,
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    kind.magenta(),
                    separator,
                    id_str.cyan(),
                    separator,
                    label
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, score_padded, separator, kind, separator, id_str, separator, label
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the priority order as tab-separated values for scripting
/// Columns: score, task id, people_facing, label (no headers, no colors)
pub fn format_task_order_tsv(order: &[RankedTask], tasks: &TaskCatalog) -> String {
    order
        .iter()
        .map(|ranked| {
            let people_facing = tasks.get(ranked.task_id).is_some_and(|t| t.people_facing);
            format!(
                "{}\t{}\t{}\t{}",
                format_score(ranked.score),
                ranked.task_id,
                people_facing,
                task_label(tasks, ranked.task_id)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the assignment relation, one line per volunteer in catalog order.
///
/// Volunteers without tasks are listed with "-". Names holding tasks but
/// missing from the catalog (manual overrides) follow at the end.
pub fn format_assignments<V: Scorable>(
    assignments: &Assignments,
    volunteers: &[V],
    tasks: &TaskCatalog,
    use_colors: bool,
) -> String {
    if volunteers.is_empty() && assignments.is_empty() {
        return "No volunteers found.".to_string();
    }

    let mut names: Vec<&str> = volunteers.iter().map(|v| v.name()).collect();
    for entry in assignments.iter() {
        if !names.contains(&entry.volunteer.as_str()) {
            names.push(entry.volunteer.as_str());
        }
    }

    let name_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);

    names
        .iter()
        .map(|name| {
            let held = assignments
                .tasks_for(name)
                .map(|ids| {
                    ids.iter()
                        .map(|id| task_label(tasks, *id))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "-".to_string());
            let padded = format!("{:<width$}", name, width = name_width);

            if use_colors {
                format!("{}  {}", padded.yellow(), held)
            } else {
                format!("{}  {}", padded, held)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the assignment relation as tab-separated values
/// Columns: volunteer, task id, label (one row per assigned task)
pub fn format_assignments_tsv(assignments: &Assignments, tasks: &TaskCatalog) -> String {
    assignments
        .iter()
        .flat_map(|entry| {
            entry.tasks.iter().map(move |id| {
                format!("{}\t{}\t{}", entry.volunteer, id, task_label(tasks, *id))
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the volunteers interested in a task, one name per line
pub fn format_interested<V: Scorable>(task: &Task, volunteers: &[&V], use_colors: bool) -> String {
    if volunteers.is_empty() {
        return format!("No volunteers interested in {}.", task.label());
    }

    volunteers
        .iter()
        .enumerate()
        .map(|(idx, volunteer)| {
            let index_str = format!("{:>2}.", idx + 1);
            if use_colors {
                format!("{} {}", index_str.dimmed(), volunteer.name().yellow())
            } else {
                format!("{} {}", index_str, volunteer.name())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Serialize)]
struct OrderRow<'a> {
    score: f64,
    task_id: TaskId,
    people_facing: bool,
    name: Option<&'a str>,
}

/// Render the priority order as pretty JSON
pub fn task_order_json(order: &[RankedTask], tasks: &TaskCatalog) -> Result<String> {
    let rows: Vec<OrderRow> = order
        .iter()
        .map(|ranked| {
            let task = tasks.get(ranked.task_id);
            OrderRow {
                score: ranked.score,
                task_id: ranked.task_id,
                people_facing: task.is_some_and(|t| t.people_facing),
                name: task.and_then(|t| t.name.as_deref()),
            }
        })
        .collect();
    serde_json::to_string_pretty(&rows).context("Failed to serialize task order")
}

/// Render the assignment relation as pretty JSON
pub fn assignments_json(assignments: &Assignments) -> Result<String> {
    let entries: Vec<_> = assignments.iter().collect();
    serde_json::to_string_pretty(&entries).context("Failed to serialize assignments")
}

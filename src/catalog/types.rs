use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::scoring::desirability::rank_score;

pub type TaskId = u64;

/// A unit of work to hand out during a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub name: Option<String>,
    /// People-facing tasks are always scheduled before everything else
    #[serde(default)]
    pub people_facing: bool,
}

impl Task {
    pub fn new(id: TaskId, people_facing: bool) -> Self {
        Self {
            id,
            name: None,
            people_facing,
        }
    }

    pub fn named(id: TaskId, name: &str, people_facing: bool) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            people_facing,
        }
    }

    /// Display label: the name when present, otherwise "#id"
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", self.id),
        }
    }
}

/// Anything that can take part in scoring and matching.
///
/// `name` is the identity used as the key of the assignment relation, so it
/// must be unique among the volunteers of a run.
pub trait Scorable {
    fn name(&self) -> &str;

    /// True iff the task appears anywhere in the declared interests
    fn is_interested(&self, task: &Task) -> bool;

    /// Rank-derived weight for the task; 0 when not interested
    fn task_desirability_score(&self, task: &Task) -> f64;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Volunteer {
    pub name: String,
    /// Declared interests, most wanted first
    #[serde(default)]
    pub interested_tasks: Vec<TaskId>,
}

impl Volunteer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            interested_tasks: Vec::new(),
        }
    }

    pub fn with_interests(name: &str, interested_tasks: Vec<TaskId>) -> Self {
        Self {
            name: name.to_string(),
            interested_tasks,
        }
    }

    /// Zero-based position of the task in the interest list
    pub fn rank_of(&self, task: &Task) -> Option<usize> {
        self.interested_tasks.iter().position(|id| *id == task.id)
    }
}

impl Scorable for Volunteer {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_interested(&self, task: &Task) -> bool {
        self.rank_of(task).is_some()
    }

    fn task_desirability_score(&self, task: &Task) -> f64 {
        self.rank_of(task).map(rank_score).unwrap_or(0.0)
    }
}

/// Tasks keyed by id, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    tasks: Vec<Task>,
    index: HashMap<TaskId, usize>,
}

impl TaskCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting duplicate ids
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self> {
        let mut catalog = Self::new();
        for task in tasks {
            catalog.insert(task)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, task: Task) -> Result<()> {
        if self.index.contains_key(&task.id) {
            bail!("Duplicate task id {}", task.id);
        }
        self.index.insert(task.id, self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.index.get(&id).map(|&i| &self.tasks[i])
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

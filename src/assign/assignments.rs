use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::catalog::TaskId;

/// One volunteer's share of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolunteerAssignment {
    pub volunteer: String,
    pub tasks: BTreeSet<TaskId>,
}

/// The assignment relation: volunteer name to assigned task ids.
///
/// A task is held by at most one volunteer. Volunteers are kept in the order
/// they first received a task.
#[derive(Debug, Clone, Default)]
pub struct Assignments {
    entries: Vec<VolunteerAssignment>,
    by_volunteer: HashMap<String, usize>,
    owners: HashMap<TaskId, usize>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `task` to `volunteer`.
    ///
    /// Re-inserting an existing pair changes nothing. A task held by someone
    /// else moves to `volunteer`. Returns true if the relation changed.
    pub fn assign(&mut self, volunteer: &str, task: TaskId) -> bool {
        let slot = match self.by_volunteer.get(volunteer) {
            Some(&slot) => slot,
            None => {
                self.entries.push(VolunteerAssignment {
                    volunteer: volunteer.to_string(),
                    tasks: BTreeSet::new(),
                });
                let slot = self.entries.len() - 1;
                self.by_volunteer.insert(volunteer.to_string(), slot);
                slot
            }
        };

        match self.owners.insert(task, slot) {
            Some(previous) if previous == slot => false,
            Some(previous) => {
                self.entries[previous].tasks.remove(&task);
                self.entries[slot].tasks.insert(task);
                true
            }
            None => {
                self.entries[slot].tasks.insert(task);
                true
            }
        }
    }

    /// Name of the volunteer currently holding `task`
    pub fn volunteer_for(&self, task: TaskId) -> Option<&str> {
        self.owners
            .get(&task)
            .map(|&slot| self.entries[slot].volunteer.as_str())
    }

    pub fn tasks_for(&self, volunteer: &str) -> Option<&BTreeSet<TaskId>> {
        self.by_volunteer
            .get(volunteer)
            .map(|&slot| &self.entries[slot].tasks)
    }

    pub fn is_assigned(&self, task: TaskId) -> bool {
        self.owners.contains_key(&task)
    }

    /// Number of assigned tasks
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Volunteers holding at least one task, in first-assignment order
    pub fn iter(&self) -> impl Iterator<Item = &VolunteerAssignment> {
        self.entries.iter().filter(|entry| !entry.tasks.is_empty())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_volunteer.clear();
        self.owners.clear();
    }
}

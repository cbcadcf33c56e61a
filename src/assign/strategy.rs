use super::assignments::Assignments;
use crate::catalog::{Scorable, Task, TaskCatalog};
use crate::scoring::RankedTask;

/// Volunteers interested in `task`, in catalog order
pub fn interested_volunteers<'a, V: Scorable>(task: &Task, volunteers: &'a [V]) -> Vec<&'a V> {
    volunteers
        .iter()
        .filter(|volunteer| volunteer.is_interested(task))
        .collect()
}

/// Interface for matching policies.
///
/// A strategy walks the priority order produced by scoring and records its
/// decisions in the assignment relation. Tasks already present in the
/// relation (manual overrides) are left alone.
pub trait AssignmentStrategy<V: Scorable> {
    fn assign(
        &self,
        order: &[RankedTask],
        tasks: &TaskCatalog,
        volunteers: &[V],
        assignments: &mut Assignments,
    );

    fn name(&self) -> &str;
}

/// First interested volunteer wins; with no interest the task goes to the
/// first volunteer in the catalog. With no volunteers nothing is assigned.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyStrategy;

impl<V: Scorable> AssignmentStrategy<V> for GreedyStrategy {
    fn assign(
        &self,
        order: &[RankedTask],
        tasks: &TaskCatalog,
        volunteers: &[V],
        assignments: &mut Assignments,
    ) {
        for ranked in order {
            let Some(task) = tasks.get(ranked.task_id) else {
                continue;
            };
            if assignments.is_assigned(task.id) {
                continue;
            }

            let interested = interested_volunteers(task, volunteers);
            let chosen = interested.first().copied().or_else(|| volunteers.first());

            if let Some(volunteer) = chosen {
                assignments.assign(volunteer.name(), task.id);
            }
        }
    }

    fn name(&self) -> &str {
        "greedy"
    }
}

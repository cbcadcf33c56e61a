use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::config::Accumulation;
use crate::catalog::{Scorable, Task, TaskCatalog, TaskId};

/// A task's position key in the schedule: aggregate score, then id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedTask {
    pub score: f64,
    pub task_id: TaskId,
}

// Heap entry; reversed so BinaryHeap pops the smallest (score, id) first
#[derive(Debug, Clone, Copy)]
struct BucketEntry(RankedTask);

impl Ord for BucketEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .score
            .total_cmp(&self.0.score)
            .then_with(|| other.0.task_id.cmp(&self.0.task_id))
    }
}

impl PartialOrd for BucketEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for BucketEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BucketEntry {}

/// Two min-priority queues: people-facing tasks and everything else.
#[derive(Debug, Default)]
pub struct PriorityBuckets {
    people_facing: BinaryHeap<BucketEntry>,
    general: BinaryHeap<BucketEntry>,
}

impl PriorityBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a scored task in the bucket its classification selects
    pub fn push(&mut self, task: &Task, score: f64) {
        let entry = BucketEntry(RankedTask {
            score,
            task_id: task.id,
        });
        if task.people_facing {
            self.people_facing.push(entry);
        } else {
            self.general.push(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.people_facing.len() + self.general.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain both buckets: people-facing first, each ascending by (score, id)
    pub fn into_ordered(mut self) -> Vec<RankedTask> {
        let mut ordered = Vec::with_capacity(self.len());
        while let Some(BucketEntry(ranked)) = self.people_facing.pop() {
            ordered.push(ranked);
        }
        while let Some(BucketEntry(ranked)) = self.general.pop() {
            ordered.push(ranked);
        }
        ordered
    }
}

/// Score every task against every volunteer and return the schedule order.
///
/// Tasks are visited in catalog order. Under [`Accumulation::Cumulative`] the
/// total is never reset between tasks, so each task's score is the running
/// total after its own contributions are added.
pub fn compute_task_order<V: Scorable>(
    tasks: &TaskCatalog,
    volunteers: &[V],
    accumulation: Accumulation,
) -> Vec<RankedTask> {
    let mut buckets = PriorityBuckets::new();
    let mut desire_sum = 0.0;

    for task in tasks.iter() {
        if accumulation == Accumulation::PerTask {
            desire_sum = 0.0;
        }
        for volunteer in volunteers {
            desire_sum += volunteer.task_desirability_score(task);
        }
        buckets.push(task, desire_sum);
    }

    buckets.into_ordered()
}

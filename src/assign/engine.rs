use anyhow::{bail, Result};
use std::path::Path;

use super::assignments::Assignments;
use super::strategy::{interested_volunteers, AssignmentStrategy, GreedyStrategy};
use crate::catalog::{
    load_tasks, load_volunteers, validate_unique_names, Scorable, Task, TaskCatalog, Volunteer,
};
use crate::scoring::{compute_task_order, RankedTask, ScoringConfig};

/// Runs one batch: import catalogs, order tasks, match them to volunteers.
///
/// The engine owns the assignment relation. Tasks and volunteers are handed
/// in by a loader and never modified.
pub struct AssignmentEngine<V: Scorable = Volunteer> {
    tasks: TaskCatalog,
    volunteers: Vec<V>,
    assignments: Assignments,
    scoring: ScoringConfig,
    strategy: Box<dyn AssignmentStrategy<V>>,
}

impl<V: Scorable> Default for AssignmentEngine<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Scorable> AssignmentEngine<V> {
    /// Empty engine with default scoring and the greedy strategy
    pub fn new() -> Self {
        Self {
            tasks: TaskCatalog::new(),
            volunteers: Vec::new(),
            assignments: Assignments::new(),
            scoring: ScoringConfig::default(),
            strategy: Box::new(GreedyStrategy),
        }
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_strategy(mut self, strategy: Box<dyn AssignmentStrategy<V>>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the task catalog
    pub fn import_tasks(&mut self, tasks: TaskCatalog) {
        self.tasks = tasks;
    }

    /// Append volunteers to the catalog.
    ///
    /// Volunteer names key the assignment relation, so a name that repeats
    /// within the batch or matches an existing volunteer rejects the whole
    /// batch and nothing is imported.
    pub fn import_volunteers(&mut self, volunteers: Vec<V>) -> Result<()> {
        if let Err(errors) = validate_unique_names(&volunteers, &self.volunteers) {
            bail!("Cannot import volunteers:\n  - {}", errors.join("\n  - "));
        }
        self.volunteers.extend(volunteers);
        Ok(())
    }

    pub fn tasks(&self) -> &TaskCatalog {
        &self.tasks
    }

    pub fn volunteers(&self) -> &[V] {
        &self.volunteers
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Volunteers who declared interest in `task`, in catalog order
    pub fn interested_volunteers(&self, task: &Task) -> Vec<&V> {
        interested_volunteers(task, &self.volunteers)
    }

    /// Priority order of every task: people-facing first, then the rest,
    /// each ascending by (score, id).
    ///
    /// Buckets are rebuilt on every call, so repeated calls agree.
    pub fn tasks_by_desirability(&self) -> Vec<RankedTask> {
        compute_task_order(&self.tasks, &self.volunteers, self.scoring.accumulation())
    }

    /// Run the configured strategy over the current priority order.
    ///
    /// Existing assignments are kept; tasks already assigned are skipped.
    pub fn assign_tasks(&mut self) {
        let order = self.tasks_by_desirability();
        self.strategy
            .assign(&order, &self.tasks, &self.volunteers, &mut self.assignments);
    }

    /// Record `task` under `volunteer`, moving it if someone else held it
    pub fn assign_task(&mut self, task: &Task, volunteer: &V) {
        self.assignments.assign(volunteer.name(), task.id);
    }

    pub fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    /// Start a fresh run with an empty relation
    pub fn clear_assignments(&mut self) {
        self.assignments.clear();
    }
}

impl AssignmentEngine<Volunteer> {
    /// Load and replace the task catalog from a YAML or JSON file
    pub fn import_tasks_from_file(&mut self, path: &Path) -> Result<()> {
        let tasks = load_tasks(path)?;
        self.import_tasks(tasks);
        Ok(())
    }

    /// Load volunteers from a file, checked against the current task catalog
    pub fn import_volunteers_from_file(&mut self, path: &Path) -> Result<()> {
        let volunteers = load_volunteers(path, &self.tasks)?;
        self.import_volunteers(volunteers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TaskId;
    use crate::scoring::Accumulation;
    use std::collections::HashMap;
    use std::env;
    use std::fs;

    fn engine(tasks: Vec<Task>, volunteers: Vec<Volunteer>) -> AssignmentEngine {
        let mut engine = AssignmentEngine::new();
        engine.import_tasks(TaskCatalog::from_tasks(tasks).unwrap());
        engine.import_volunteers(volunteers).unwrap();
        engine
    }

    /// Stand-in with fixed per-task scores and interest flags
    struct Scripted {
        name: String,
        scores: HashMap<TaskId, f64>,
        interested: bool,
    }

    impl Scripted {
        fn new(name: &str, scores: &[(TaskId, f64)], interested: bool) -> Self {
            Self {
                name: name.to_string(),
                scores: scores.iter().copied().collect(),
                interested,
            }
        }
    }

    impl Scorable for Scripted {
        fn name(&self) -> &str {
            &self.name
        }

        fn is_interested(&self, _task: &Task) -> bool {
            self.interested
        }

        fn task_desirability_score(&self, task: &Task) -> f64 {
            self.scores.get(&task.id).copied().unwrap_or(0.0)
        }
    }

    #[test]
    fn test_interested_volunteers_returns_empty_by_default() {
        let engine: AssignmentEngine = AssignmentEngine::new();
        assert!(engine.interested_volunteers(&Task::new(1, false)).is_empty());
    }

    #[test]
    fn test_interested_volunteers_only_interested() {
        let mut engine: AssignmentEngine<Scripted> = AssignmentEngine::new();
        engine
            .import_volunteers(vec![
                Scripted::new("yes", &[], true),
                Scripted::new("no", &[], false),
            ])
            .unwrap();

        let interested = engine.interested_volunteers(&Task::new(1, false));
        let names: Vec<_> = interested.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["yes"]);
    }

    #[test]
    fn test_tasks_by_desirability_returns_empty() {
        let engine: AssignmentEngine = AssignmentEngine::new();
        assert!(engine.tasks_by_desirability().is_empty());
    }

    #[test]
    fn test_tasks_by_desirability_scenario() {
        let mut engine: AssignmentEngine<Scripted> = AssignmentEngine::new();
        engine.import_tasks(
            TaskCatalog::from_tasks(vec![
                Task::new(1, false),
                Task::new(2, false),
                Task::new(3, true),
            ])
            .unwrap(),
        );
        engine
            .import_volunteers(vec![
                Scripted::new("v1", &[(1, 0.5), (2, 0.3), (3, 0.25)], false),
                Scripted::new("v2", &[(1, 0.3), (2, 0.2)], false),
                Scripted::new("v3", &[(1, 0.5)], false),
            ])
            .unwrap();

        let order = engine.tasks_by_desirability();
        let ids: Vec<TaskId> = order.iter().map(|r| r.task_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!((order[0].score - 2.05).abs() < 1e-9);
        assert!((order[1].score - 1.3).abs() < 1e-9);
        assert!((order[2].score - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_tasks_by_desirability_repeatable() {
        let engine = engine(
            vec![Task::new(1, false), Task::new(2, true)],
            vec![Volunteer::with_interests("ana", vec![1, 2])],
        );
        assert_eq!(engine.tasks_by_desirability(), engine.tasks_by_desirability());
        assert_eq!(engine.tasks_by_desirability().len(), 2);
    }

    #[test]
    fn test_per_task_scoring() {
        let engine = engine(
            vec![Task::new(1, false), Task::new(2, false)],
            vec![Volunteer::with_interests("ana", vec![1, 2])],
        )
        .with_scoring(ScoringConfig {
            accumulation: Some(Accumulation::PerTask),
        });

        let order = engine.tasks_by_desirability();
        assert_eq!(order[0], RankedTask { score: 0.25, task_id: 2 });
        assert_eq!(order[1], RankedTask { score: 0.5, task_id: 1 });
    }

    #[test]
    fn test_assign_tasks_uninterested_go_to_first_volunteer() {
        let mut engine = engine(
            vec![Task::new(1, false), Task::new(2, false), Task::new(3, true)],
            vec![
                Volunteer::with_interests("ana", vec![]),
                Volunteer::with_interests("bo", vec![2]),
            ],
        );
        engine.assign_tasks();

        let assignments = engine.assignments();
        assert_eq!(assignments.volunteer_for(1), Some("ana"));
        assert_eq!(assignments.volunteer_for(2), Some("bo"));
        assert_eq!(assignments.volunteer_for(3), Some("ana"));
        assert_eq!(assignments.len(), 3);
    }

    #[test]
    fn test_assign_tasks_first_match_not_least_loaded() {
        let mut engine = engine(
            vec![Task::new(1, false), Task::new(2, false)],
            vec![
                Volunteer::with_interests("ana", vec![1, 2]),
                Volunteer::with_interests("bo", vec![1, 2]),
            ],
        );
        engine.assign_tasks();

        let tasks: Vec<_> =
            engine.assignments().tasks_for("ana").unwrap().iter().copied().collect();
        assert_eq!(tasks, vec![1, 2]);
        assert!(engine.assignments().tasks_for("bo").is_none());
    }

    #[test]
    fn test_assign_tasks_without_volunteers() {
        let mut engine = engine(vec![Task::new(1, false)], vec![]);
        engine.assign_tasks();
        assert!(engine.assignments().is_empty());
    }

    #[test]
    fn test_assign_tasks_keeps_manual_override() {
        let mut engine = engine(
            vec![Task::new(1, false)],
            vec![
                Volunteer::with_interests("ana", vec![1]),
                Volunteer::new("bo"),
            ],
        );
        let bo = engine.volunteers()[1].clone();
        engine.assign_task(&Task::new(1, false), &bo);
        engine.assign_tasks();
        assert_eq!(engine.assignments().volunteer_for(1), Some("bo"));
    }

    #[test]
    fn test_assign_task_twice_same_as_once() {
        let mut engine = engine(vec![Task::new(1, false)], vec![Volunteer::new("ana")]);
        let task = Task::new(1, false);
        let ana = Volunteer::new("ana");
        engine.assign_task(&task, &ana);
        engine.assign_task(&task, &ana);
        assert_eq!(engine.assignments().len(), 1);
        assert_eq!(engine.assignments().tasks_for("ana").unwrap().len(), 1);
    }

    #[test]
    fn test_clear_assignments() {
        let mut engine = engine(vec![Task::new(1, false)], vec![Volunteer::new("ana")]);
        engine.assign_tasks();
        assert!(!engine.assignments().is_empty());
        engine.clear_assignments();
        assert!(engine.assignments().is_empty());
    }

    #[test]
    fn test_import_volunteers_rejects_duplicates() {
        let mut engine: AssignmentEngine = AssignmentEngine::new();
        engine.import_volunteers(vec![Volunteer::new("ana")]).unwrap();

        let err = engine
            .import_volunteers(vec![Volunteer::new("bo"), Volunteer::new("ana")])
            .unwrap_err();
        assert!(err.to_string().contains("duplicate volunteer 'ana'"));
        // whole batch rejected
        assert_eq!(engine.volunteers().len(), 1);
    }

    #[test]
    fn test_import_volunteers_extends() {
        let mut engine: AssignmentEngine = AssignmentEngine::new();
        engine.import_volunteers(vec![Volunteer::new("ana")]).unwrap();
        engine.import_volunteers(vec![Volunteer::new("bo")]).unwrap();
        let names: Vec<_> = engine.volunteers().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["ana", "bo"]);
    }

    struct Nobody;

    impl AssignmentStrategy<Volunteer> for Nobody {
        fn assign(&self, _: &[RankedTask], _: &TaskCatalog, _: &[Volunteer], _: &mut Assignments) {}

        fn name(&self) -> &str {
            "nobody"
        }
    }

    #[test]
    fn test_custom_strategy() {
        let mut engine = engine(vec![Task::new(1, false)], vec![Volunteer::new("ana")])
            .with_strategy(Box::new(Nobody));
        assert_eq!(engine.strategy_name(), "nobody");
        engine.assign_tasks();
        assert!(engine.assignments().is_empty());
    }

    #[test]
    fn test_import_from_files() {
        let tasks_path = env::temp_dir().join("task_match_engine_tasks.yaml");
        let volunteers_path = env::temp_dir().join("task_match_engine_volunteers.json");
        fs::write(&tasks_path, "- id: 1\n  people_facing: true\n- id: 2\n").unwrap();
        fs::write(
            &volunteers_path,
            r#"[
                {"name": "ana", "interested_tasks": [2]},
                {"name": "bo", "interested_tasks": [1]}
            ]"#,
        )
        .unwrap();

        let mut engine: AssignmentEngine = AssignmentEngine::new();
        engine.import_tasks_from_file(&tasks_path).unwrap();
        engine.import_volunteers_from_file(&volunteers_path).unwrap();
        engine.assign_tasks();

        assert_eq!(engine.assignments().volunteer_for(1), Some("bo"));
        assert_eq!(engine.assignments().volunteer_for(2), Some("ana"));

        let _ = fs::remove_file(&tasks_path);
        let _ = fs::remove_file(&volunteers_path);
    }
}

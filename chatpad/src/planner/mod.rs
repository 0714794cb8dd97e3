//! To-do planner
//!
//! Tasks are addressed by `TaskId`. The REPL shows 1-based positions and
//! resolves them to ids when a command is issued, so toggles and deletes
//! never act on a shifted index.

mod task;

pub use task::{PlannerTask, TaskId, parse_due};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::ValidationError;

/// An account's task list, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Planner {
    tasks: Vec<PlannerTask>,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new open task
    pub fn add_task(&mut self, text: &str, due: Option<NaiveDate>) -> Result<&PlannerTask, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyTaskText);
        }

        let task = PlannerTask::new(text, due);
        debug!(id = %task.id, ?due, "add_task: added");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Flip the done flag, returning the new value
    pub fn toggle_done(&mut self, id: TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.done = !task.done;
        debug!(%id, done = task.done, "toggle_done: toggled");
        Some(task.done)
    }

    /// Remove a task, returning it
    ///
    /// The list is rebuilt without the target; every other task keeps its
    /// relative order.
    pub fn delete_task(&mut self, id: TaskId) -> Option<PlannerTask> {
        let mut removed = None;
        self.tasks = std::mem::take(&mut self.tasks)
            .into_iter()
            .filter_map(|t| {
                if t.id == id && removed.is_none() {
                    removed = Some(t);
                    None
                } else {
                    Some(t)
                }
            })
            .collect();
        debug!(%id, found = removed.is_some(), "delete_task: called");
        removed
    }

    /// Id of the task at a 1-based position
    pub fn id_at(&self, position: usize) -> Option<TaskId> {
        position.checked_sub(1).and_then(|i| self.tasks.get(i)).map(|t| t.id)
    }

    pub fn get(&self, id: TaskId) -> Option<&PlannerTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[PlannerTask] {
        &self.tasks
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.done).count()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn texts(planner: &Planner) -> Vec<&str> {
        planner.tasks().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_add_task() {
        let mut planner = Planner::new();

        let task = planner.add_task("  Write report ", None).unwrap();
        assert_eq!(task.text, "Write report");
        assert!(!task.done);

        assert_eq!(planner.len(), 1);
        assert_eq!(planner.pending_count(), 1);
    }

    #[test]
    fn test_add_empty_task_rejected() {
        let mut planner = Planner::new();

        assert_eq!(planner.add_task("", None).unwrap_err(), ValidationError::EmptyTaskText);
        assert_eq!(planner.add_task("   ", None).unwrap_err(), ValidationError::EmptyTaskText);
        assert!(planner.is_empty());
    }

    #[test]
    fn test_add_task_with_due_date() {
        let mut planner = Planner::new();
        let due = parse_due("2030-01-15").unwrap();

        let task = planner.add_task("Renew passport", Some(due)).unwrap();
        assert_eq!(task.due, Some(due));
    }

    #[test]
    fn test_toggle_done() {
        let mut planner = Planner::new();
        let id = planner.add_task("Task 1", None).unwrap().id;

        assert_eq!(planner.toggle_done(id), Some(true));
        assert_eq!(planner.pending_count(), 0);
        assert_eq!(planner.toggle_done(id), Some(false));
        assert!(!planner.get(id).unwrap().done);
    }

    #[test]
    fn test_toggle_unknown_task() {
        let mut planner = Planner::new();
        planner.add_task("Task 1", None).unwrap();

        assert_eq!(planner.toggle_done(TaskId::new()), None);
    }

    #[test]
    fn test_delete_middle_task_preserves_order() {
        let mut planner = Planner::new();
        for text in ["a", "b", "c", "d"] {
            planner.add_task(text, None).unwrap();
        }

        let id = planner.id_at(2).unwrap();
        let removed = planner.delete_task(id).unwrap();

        assert_eq!(removed.text, "b");
        assert_eq!(texts(&planner), vec!["a", "c", "d"]);
        assert!(planner.delete_task(id).is_none());
    }

    #[test]
    fn test_ids_survive_earlier_deletions() {
        let mut planner = Planner::new();
        for text in ["a", "b", "c"] {
            planner.add_task(text, None).unwrap();
        }
        let c = planner.id_at(3).unwrap();

        planner.delete_task(planner.id_at(1).unwrap());

        // "c" moved from position 3 to 2 but its id still finds it
        assert_eq!(planner.toggle_done(c), Some(true));
        assert_eq!(planner.id_at(2), Some(c));
        assert!(planner.id_at(3).is_none());
    }

    #[test]
    fn test_id_at_is_one_based() {
        let mut planner = Planner::new();
        let id = planner.add_task("only", None).unwrap().id;

        assert_eq!(planner.id_at(0), None);
        assert_eq!(planner.id_at(1), Some(id));
        assert_eq!(planner.id_at(2), None);
    }

    proptest! {
        #[test]
        fn prop_repeated_deletes_remove_exactly_the_target(
            count in 1usize..20,
            picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..20),
        ) {
            let mut planner = Planner::new();
            let mut expected: Vec<String> = (0..count).map(|i| format!("task {i}")).collect();
            for text in &expected {
                planner.add_task(text, None).unwrap();
            }

            for pick in picks {
                if expected.is_empty() {
                    break;
                }
                let i = pick.index(expected.len());
                let id = planner.id_at(i + 1).unwrap();
                let removed = planner.delete_task(id).unwrap();
                prop_assert_eq!(removed.text, expected.remove(i));
            }

            let survivors: Vec<String> = planner.tasks().iter().map(|t| t.text.clone()).collect();
            prop_assert_eq!(survivors, expected);
        }
    }
}

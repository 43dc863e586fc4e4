//! The generic nine-step application checklist, kept per session and unrelated to any row
//! of the job table.

use serde::Serialize;
use tracing::info;

use crate::tracker::error::TrackerError;
use crate::tracker::schema::CHECKLIST_LABELS;

/// Task names, in display order. The set is fixed: tasks are never added or removed.
pub const TASKS: [&str; 9] = CHECKLIST_LABELS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// `floor(100 * completed / total)`
    pub percent: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionChecklist {
    done: [bool; 9],
}

impl SessionChecklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, task: &str, value: bool) -> Result<(), TrackerError> {
        let index = TASKS
            .iter()
            .position(|t| *t == task)
            .ok_or_else(|| TrackerError::UnknownTask {
                task: task.to_string(),
            })?;
        self.done[index] = value;
        Ok(())
    }

    /// Tasks paired with their current state, in display order.
    pub fn tasks(&self) -> impl Iterator<Item = (&'static str, bool)> {
        TASKS.into_iter().zip(self.done)
    }

    pub fn progress(&self) -> Progress {
        let completed = self.done.iter().filter(|d| **d).count();
        let total = TASKS.len();
        Progress {
            completed,
            total,
            percent: (completed * 100 / total) as u8,
        }
    }

    pub fn reset(&mut self) {
        self.done = [false; 9];
        info!("Session checklist reset");
    }

    /// Splits task names into (completed, pending), each in display order.
    pub fn partition(&self) -> (Vec<&'static str>, Vec<&'static str>) {
        let (completed, pending): (Vec<_>, Vec<_>) = self.tasks().partition(|(_, done)| *done);
        (
            completed.into_iter().map(|(task, _)| task).collect(),
            pending.into_iter().map(|(task, _)| task).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checklist_has_no_progress() {
        let checklist = SessionChecklist::new();
        assert_eq!(
            checklist.progress(),
            Progress {
                completed: 0,
                total: 9,
                percent: 0
            }
        );
    }

    #[test]
    fn test_toggle_known_task() {
        let mut checklist = SessionChecklist::new();
        let linkedin = |c: &SessionChecklist| c.tasks().find(|(t, _)| *t == "Update LinkedIn");
        checklist.toggle("Update LinkedIn", true).unwrap();
        assert_eq!(linkedin(&checklist), Some(("Update LinkedIn", true)));
        assert_eq!(checklist.progress().completed, 1);
        checklist.toggle("Update LinkedIn", false).unwrap();
        assert_eq!(linkedin(&checklist), Some(("Update LinkedIn", false)));
    }

    #[test]
    fn test_toggle_unknown_task_rejected() {
        let mut checklist = SessionChecklist::new();
        let err = checklist.toggle("Negotiate Salary", true).unwrap_err();
        assert!(matches!(err, TrackerError::UnknownTask { .. }));
        assert_eq!(checklist, SessionChecklist::new());
    }

    #[test]
    fn test_progress_percent_floors() {
        let mut checklist = SessionChecklist::new();
        checklist.toggle(TASKS[0], true).unwrap();
        assert_eq!(checklist.progress().percent, 11);
        checklist.toggle(TASKS[1], true).unwrap();
        assert_eq!(checklist.progress().percent, 22);
        for task in TASKS {
            checklist.toggle(task, true).unwrap();
        }
        let p = checklist.progress();
        assert_eq!((p.completed, p.percent), (9, 100));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut checklist = SessionChecklist::new();
        for task in TASKS.iter().step_by(2) {
            checklist.toggle(task, true).unwrap();
        }
        checklist.reset();
        assert_eq!(
            checklist.progress(),
            Progress {
                completed: 0,
                total: 9,
                percent: 0
            }
        );
    }

    #[test]
    fn test_partition_keeps_display_order() {
        let mut checklist = SessionChecklist::new();
        checklist.toggle("Thank You E-mail", true).unwrap();
        checklist.toggle("Research the Company", true).unwrap();

        let (completed, pending) = checklist.partition();
        assert_eq!(completed, vec!["Research the Company", "Thank You E-mail"]);
        assert_eq!(pending.len(), 7);
        assert_eq!(pending[0], "Analyze Job Role / Profile");
        assert!(!pending.contains(&"Thank You E-mail"));
    }
}

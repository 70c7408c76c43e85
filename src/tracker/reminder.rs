use crate::tracker::task::Task;
use chrono::NaiveDateTime;
use std::collections::HashSet;
use tracing::debug;

/// Remembers which (task, window) reminders have already fired
///
/// The fired set only grows until `reset()` is called.
#[derive(Debug, Default)]
pub struct ReminderTracker {
    fired: HashSet<(String, i64)>,
}

impl ReminderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the tasks that should be reminded about now
    ///
    /// Keeps incomplete, non-overdue tasks due within `[0, within_minutes]` whole
    /// minutes, drops those already fired for this window and records the rest as
    /// fired.
    pub fn tasks_to_remind<'a, I>(
        &mut self,
        tasks: I,
        within_minutes: i64,
        now: NaiveDateTime,
    ) -> Vec<&'a Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let due: Vec<&Task> = tasks
            .into_iter()
            .filter(|t| !t.is_completed())
            .filter(|t| !t.deadline().is_overdue(now))
            .filter(|t| {
                let minutes = t.deadline().minutes_left(now);
                minutes >= 0 && minutes <= within_minutes
            })
            .filter(|t| self.fired.insert((t.id().to_string(), within_minutes)))
            .collect();

        debug!(
            count = due.len(),
            within_minutes, "selected tasks to remind"
        );
        due
    }

    /// Whether a reminder for this task and window has already fired
    pub fn has_fired(&self, task_id: &str, within_minutes: i64) -> bool {
        self.fired.contains(&(task_id.to_string(), within_minutes))
    }

    /// Forget every fired reminder
    pub fn reset(&mut self) {
        self.fired.clear();
    }
}

use crate::error::{Result, TrackerError};
use crate::tracker::deadline::Deadline;
use crate::tracker::priority::Priority;
use chrono::NaiveDateTime;

/// Number of leading id characters that make up a short id
pub const SHORT_ID_LEN: usize = 8;

/// Start/end window of a time-boxed task
///
/// Informational only: no ordering is enforced between start, end and the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A unit of work tracked by the manager
///
/// A task with a `window` is a timed task. Timed tasks behave exactly like
/// plain tasks in every listing, search and CSV operation.
#[derive(Debug, Clone)]
pub struct Task {
    id: String,
    title: String,
    description: Option<String>,
    deadline: Deadline,
    priority: Priority,
    completed: bool,
    window: Option<TimeWindow>,
}

impl Task {
    /// Create a new, incomplete task
    ///
    /// # Errors
    /// Returns a validation error if the title is blank
    pub fn new(
        id: String,
        title: &str,
        description: Option<String>,
        deadline: Deadline,
        priority: Priority,
    ) -> Result<Self> {
        if title.trim().is_empty() {
            return Err(TrackerError::validation("Task title must not be blank"));
        }
        Ok(Self {
            id,
            title: title.to_string(),
            description,
            deadline,
            priority,
            completed: false,
            window: None,
        })
    }

    /// Attach a start/end window, turning this into a timed task
    pub fn with_window(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.window = Some(TimeWindow { start, end });
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// First eight characters of the id (the whole id if shorter)
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(SHORT_ID_LEN) {
            Some((end, _)) => &self.id[..end],
            None => &self.id,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// # Errors
    /// Returns a validation error if the title is blank
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(TrackerError::validation("Task title must not be blank"));
        }
        self.title = title.to_string();
        Ok(())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn deadline(&self) -> &Deadline {
        &self.deadline
    }

    pub fn deadline_mut(&mut self) -> &mut Deadline {
        &mut self.deadline
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Mark the task as completed. Completing twice is a no-op.
    pub fn complete(&mut self) {
        self.completed = true;
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn window(&self) -> Option<&TimeWindow> {
        self.window.as_ref()
    }

    pub fn is_timed(&self) -> bool {
        self.window.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn due() -> Deadline {
        Deadline::new(
            NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    fn task(id: &str) -> Task {
        Task::new(
            id.to_string(),
            "Write report",
            None,
            due(),
            Priority::Medium,
        )
        .unwrap()
    }

    #[test]
    fn test_new_task_is_incomplete() {
        let task = task("0123456789abcdef");
        assert!(!task.is_completed());
        assert!(!task.is_timed());
        assert_eq!(task.title(), "Write report");
        assert_eq!(task.description(), None);
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let result = Task::new("id".to_string(), "   ", None, due(), Priority::Low);
        assert!(matches!(result, Err(TrackerError::Validation(_))));
    }

    #[test]
    fn test_short_id_is_first_eight_chars() {
        assert_eq!(task("0123456789abcdef").short_id(), "01234567");
        assert_eq!(task("abc").short_id(), "abc");
        assert_eq!(task("12345678").short_id(), "12345678");
    }

    #[test]
    fn test_complete_is_idempotent() {
        let mut task = task("t1");
        task.complete();
        task.complete();
        assert!(task.is_completed());
    }

    #[test]
    fn test_set_title_rejects_blank_and_keeps_old() {
        let mut task = task("t1");
        assert!(task.set_title("").is_err());
        assert_eq!(task.title(), "Write report");
        task.set_title("Rewrite report").unwrap();
        assert_eq!(task.title(), "Rewrite report");
    }

    #[test]
    fn test_description_may_be_empty() {
        let mut task = task("t1");
        task.set_description(Some(String::new()));
        assert_eq!(task.description(), Some(""));
    }

    #[test]
    fn test_timed_task_window() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        // end before start is accepted as-is
        let task = task("t1").with_window(start, end);
        assert!(task.is_timed());
        assert_eq!(task.window().unwrap().start, start);
        assert_eq!(task.window().unwrap().end, end);
    }
}

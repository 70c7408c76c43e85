use crate::tracker::task::Task;

/// A named, ordered collection of task references
///
/// Projects store task ids only; the tasks themselves live in the manager's
/// registry. Adding the same task twice is not prevented here.
#[derive(Debug, Clone)]
pub struct Project {
    id: String,
    name: String,
    task_ids: Vec<String>,
}

impl Project {
    pub fn new(id: String, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            task_ids: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Ids of the referenced tasks, in the order they were added
    pub fn task_ids(&self) -> &[String] {
        &self.task_ids
    }

    pub fn task_count(&self) -> usize {
        self.task_ids.len()
    }

    /// Append a reference to `task`
    pub fn add_task(&mut self, task: &Task) {
        self.task_ids.push(task.id().to_string());
    }

    /// Remove every reference to `task_id`
    ///
    /// Returns true if anything was removed. A blank id removes nothing.
    pub fn remove_task_by_id(&mut self, task_id: &str) -> bool {
        if task_id.trim().is_empty() {
            return false;
        }
        let before = self.task_ids.len();
        self.task_ids.retain(|id| id != task_id);
        self.task_ids.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{Deadline, Priority};
    use chrono::NaiveDate;

    fn task(id: &str) -> Task {
        let due = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Task::new(
            id.to_string(),
            "Task",
            None,
            Deadline::new(due),
            Priority::Low,
        )
        .unwrap()
    }

    #[test]
    fn test_add_preserves_order_and_duplicates() {
        let mut project = Project::new("p1".to_string(), "Launch");
        project.add_task(&task("a"));
        project.add_task(&task("b"));
        project.add_task(&task("a"));
        assert_eq!(project.task_ids(), ["a", "b", "a"]);
        assert_eq!(project.task_count(), 3);
    }

    #[test]
    fn test_remove_removes_all_matches() {
        let mut project = Project::new("p1".to_string(), "Launch");
        project.add_task(&task("a"));
        project.add_task(&task("b"));
        project.add_task(&task("a"));

        assert!(project.remove_task_by_id("a"));
        assert_eq!(project.task_ids(), ["b"]);
        assert!(!project.remove_task_by_id("a"));
    }

    #[test]
    fn test_remove_blank_id_returns_false() {
        let mut project = Project::new("p1".to_string(), "Launch");
        project.add_task(&task("a"));
        assert!(!project.remove_task_by_id(""));
        assert!(!project.remove_task_by_id("  "));
        assert_eq!(project.task_count(), 1);
    }

    #[test]
    fn test_rename() {
        let mut project = Project::new("p1".to_string(), "Launch");
        project.set_name("Relaunch");
        assert_eq!(project.name(), "Relaunch");
    }
}

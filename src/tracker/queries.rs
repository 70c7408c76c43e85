//! Listing, search and reminder queries for TaskManager
//!
//! Every query is scoped to one project and resolves it first, so not-found and
//! ambiguous project errors propagate unchanged.

use super::manager::TaskManager;
use super::task::Task;
use crate::error::{Result, TrackerError};
use std::cmp::Ordering;
use tracing::debug;

/// Most urgent first, then soonest deadline
fn by_urgency(a: &&Task, b: &&Task) -> Ordering {
    b.priority()
        .rank()
        .cmp(&a.priority().rank())
        .then_with(|| a.deadline().due().cmp(&b.deadline().due()))
}

fn by_deadline(a: &&Task, b: &&Task) -> Ordering {
    a.deadline().due().cmp(&b.deadline().due())
}

fn matches_completed(task: &Task, filter: Option<bool>) -> bool {
    filter.is_none_or(|completed| task.is_completed() == completed)
}

impl TaskManager {
    /// Incomplete, not-yet-due tasks inside the next `within_hours` hours
    ///
    /// Sorted by priority (highest first), then by deadline.
    ///
    /// # Errors
    /// Returns a validation error if `within_hours` is negative
    pub fn list_upcoming_tasks(&self, project_ref: &str, within_hours: i64) -> Result<Vec<&Task>> {
        let project = self.project_by_id_or_name(project_ref)?;
        if within_hours < 0 {
            return Err(TrackerError::validation("hours must not be negative"));
        }
        let now = self.now();

        let mut result = Vec::new();
        for task in self.project_tasks(project) {
            if task.is_completed() || task.deadline().is_overdue(now) {
                continue;
            }
            if task.deadline().is_within_hours(within_hours, now)? {
                result.push(task);
            }
        }
        result.sort_by(by_urgency);

        debug!(
            project_id = project.id(),
            within_hours,
            count = result.len(),
            "listed upcoming tasks"
        );
        Ok(result)
    }

    /// Tasks of a project, optionally filtered by completion
    ///
    /// Incomplete tasks come first; within each group tasks are ordered by
    /// priority (highest first), then by deadline.
    pub fn list_project_tasks(
        &self,
        project_ref: &str,
        completed: Option<bool>,
    ) -> Result<Vec<&Task>> {
        let project = self.project_by_id_or_name(project_ref)?;

        let mut result: Vec<&Task> = self
            .project_tasks(project)
            .into_iter()
            .filter(|t| matches_completed(t, completed))
            .collect();
        result.sort_by(|a, b| {
            a.is_completed()
                .cmp(&b.is_completed())
                .then_with(|| by_urgency(a, b))
        });
        Ok(result)
    }

    /// Case-insensitive keyword search inside a project
    ///
    /// The title is always searched; the description only when
    /// `search_in_description` is set. Sorted like [`list_upcoming_tasks`].
    ///
    /// # Errors
    /// Returns a validation error if the keyword is blank
    ///
    /// [`list_upcoming_tasks`]: TaskManager::list_upcoming_tasks
    pub fn search_project_tasks(
        &self,
        project_ref: &str,
        keyword: &str,
        search_in_description: bool,
        completed: Option<bool>,
    ) -> Result<Vec<&Task>> {
        if keyword.trim().is_empty() {
            return Err(TrackerError::validation("Search keyword must not be blank"));
        }
        let project = self.project_by_id_or_name(project_ref)?;
        let needle = keyword.trim().to_lowercase();

        let mut result: Vec<&Task> = self
            .project_tasks(project)
            .into_iter()
            .filter(|t| matches_completed(t, completed))
            .filter(|t| {
                let hit_title = t.title().to_lowercase().contains(&needle);
                let hit_description = search_in_description
                    && t
                        .description()
                        .is_some_and(|d| d.to_lowercase().contains(&needle));
                hit_title || hit_description
            })
            .collect();
        result.sort_by(by_urgency);

        debug!(
            project_id = project.id(),
            keyword = %needle,
            count = result.len(),
            "searched project tasks"
        );
        Ok(result)
    }

    /// Keyword search narrowed to an upcoming window and capped in size
    ///
    /// When `within_hours` is set, only incomplete, non-overdue tasks whose
    /// remaining time in whole hours (truncated) lies in `[0, within_hours]` are kept.
    /// Note this is coarser than [`list_upcoming_tasks`], which counts minutes.
    /// The result is ordered by deadline only and truncated to `limit` when
    /// `limit > 0`.
    ///
    /// [`list_upcoming_tasks`]: TaskManager::list_upcoming_tasks
    pub fn search_project_tasks_advanced(
        &self,
        project_ref: &str,
        keyword: &str,
        search_in_description: bool,
        completed: Option<bool>,
        within_hours: Option<i64>,
        limit: usize,
    ) -> Result<Vec<&Task>> {
        let base =
            self.search_project_tasks(project_ref, keyword, search_in_description, completed)?;
        let now = self.now();

        let mut result: Vec<&Task> = match within_hours {
            None => base,
            Some(hours) => base
                .into_iter()
                .filter(|t| !t.is_completed() && !t.deadline().is_overdue(now))
                .filter(|t| {
                    let hours_left = t.deadline().hours_left(now);
                    hours_left >= 0 && hours_left <= hours
                })
                .collect(),
        };
        result.sort_by(by_deadline);

        if limit > 0 {
            result.truncate(limit);
        }
        Ok(result)
    }

    /// Tasks of a project that should be reminded about now
    ///
    /// Each (task, window) pair is returned at most once until
    /// [`reset_reminders`](TaskManager::reset_reminders) is called.
    pub fn run_reminders(&mut self, project_ref: &str, within_minutes: i64) -> Result<Vec<&Task>> {
        let project_id = self.resolve_project_id(project_ref)?;
        let now = self.now();

        let Self {
            projects,
            tasks,
            reminders,
            ..
        } = self;
        let tasks = &*tasks;
        let task_ids = projects
            .get(&project_id)
            .map(|p| p.task_ids())
            .unwrap_or_default();
        let candidates = task_ids.iter().filter_map(move |id| tasks.get(id));

        Ok(reminders.tasks_to_remind(candidates, within_minutes, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{ManualClock, Priority, SequenceIds};
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn setup() -> TaskManager {
        let mut manager =
            TaskManager::with_sources(ManualClock::new(now()), SequenceIds::new(["proj"]));
        manager.create_project("Work");
        manager
    }

    fn hours(h: i64) -> NaiveDateTime {
        now() + Duration::hours(h)
    }

    fn add(
        manager: &mut TaskManager,
        title: &str,
        priority: Priority,
        due: NaiveDateTime,
    ) -> String {
        let id = manager
            .create_task(title, None, due, priority)
            .unwrap()
            .id()
            .to_string();
        manager.assign_task_to_project(&id, "Work").unwrap();
        id
    }

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title().to_string()).collect()
    }

    #[test]
    fn test_upcoming_sorted_by_priority_then_deadline() {
        let mut manager = setup();
        add(&mut manager, "low", Priority::Low, hours(1));
        add(&mut manager, "high-late", Priority::High, hours(3));
        add(&mut manager, "high-early", Priority::High, hours(2));

        let upcoming = manager.list_upcoming_tasks("Work", 24).unwrap();
        assert_eq!(titles(&upcoming), vec!["high-early", "high-late", "low"]);
    }

    #[test]
    fn test_upcoming_rejects_negative_hours() {
        let manager = setup();
        let err = manager.list_upcoming_tasks("Work", -1).unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
    }

    #[test]
    fn test_list_puts_incomplete_first() {
        let mut manager = setup();
        let done = add(&mut manager, "done-high", Priority::High, now());
        add(&mut manager, "open-low", Priority::Low, now());
        add(&mut manager, "open-medium", Priority::Medium, now());
        manager.complete_task(&done).unwrap();

        let all = manager.list_project_tasks("Work", None).unwrap();
        assert_eq!(titles(&all), vec!["open-medium", "open-low", "done-high"]);

        let completed = manager.list_project_tasks("Work", Some(true)).unwrap();
        assert_eq!(titles(&completed), vec!["done-high"]);

        let open = manager.list_project_tasks("Work", Some(false)).unwrap();
        assert_eq!(titles(&open), vec!["open-medium", "open-low"]);
    }

    #[test]
    fn test_advanced_search_truncates_to_whole_hours() {
        let mut manager = setup();
        // 1h59m left counts as 1 hour here, while minute-precise listing says 2h
        add(
            &mut manager,
            "report",
            Priority::Low,
            now() + Duration::minutes(119),
        );

        let advanced = manager
            .search_project_tasks_advanced("Work", "report", false, None, Some(1), 0)
            .unwrap();
        assert_eq!(advanced.len(), 1);
        assert!(manager.list_upcoming_tasks("Work", 1).unwrap().is_empty());
    }

    #[test]
    fn test_advanced_search_orders_by_deadline_and_limits() {
        let mut manager = setup();
        add(&mut manager, "report a", Priority::High, hours(5));
        add(&mut manager, "report b", Priority::Low, hours(1));
        add(&mut manager, "report c", Priority::Medium, hours(3));

        let all = manager
            .search_project_tasks_advanced("Work", "report", false, None, None, 0)
            .unwrap();
        assert_eq!(titles(&all), vec!["report b", "report c", "report a"]);

        let limited = manager
            .search_project_tasks_advanced("Work", "report", false, None, None, 2)
            .unwrap();
        assert_eq!(titles(&limited), vec!["report b", "report c"]);
    }

    #[test]
    fn test_advanced_search_window_excludes_completed_and_overdue() {
        let mut manager = setup();
        let done = add(&mut manager, "report done", Priority::Low, hours(1));
        add(&mut manager, "report late", Priority::Low, hours(-1));
        add(&mut manager, "report ok", Priority::Low, hours(1));
        manager.complete_task(&done).unwrap();

        let windowed = manager
            .search_project_tasks_advanced("Work", "report", false, None, Some(10), 0)
            .unwrap();
        assert_eq!(titles(&windowed), vec!["report ok"]);

        // without a window nothing beyond the keyword filter applies
        let unwindowed = manager
            .search_project_tasks_advanced("Work", "report", false, None, None, 0)
            .unwrap();
        assert_eq!(unwindowed.len(), 3);
    }
}

//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use task_tracker::tracker::{ManualClock, Priority, SequenceIds, TaskManager};

/// Fixed starting instant for every test clock
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 15)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

/// Timestamp `hours` after the test clock's start
pub fn due_in(hours: i64) -> NaiveDateTime {
    test_now() + Duration::hours(hours)
}

/// Manager with a pinned clock and counter-generated ids
pub fn get_test_manager() -> (TaskManager, ManualClock) {
    get_test_manager_with_ids(Vec::<String>::new())
}

/// Manager with a pinned clock that hands out `ids` first
pub fn get_test_manager_with_ids<I, S>(ids: I) -> (TaskManager, ManualClock)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let clock = ManualClock::new(test_now());
    let manager = TaskManager::with_sources(clock.clone(), SequenceIds::new(ids));
    (manager, clock)
}

/// Create a task due `hours` after the test clock's start and assign it to `project`
pub fn add_task(
    manager: &mut TaskManager,
    project: &str,
    title: &str,
    priority: Priority,
    hours: i64,
) -> String {
    let due = due_in(hours);
    let id = manager
        .create_task(title, None, due, priority)
        .unwrap()
        .id()
        .to_string();
    manager.assign_task_to_project(&id, project).unwrap();
    id
}

/// Titles of a task list, in order
pub fn titles(tasks: &[&task_tracker::Task]) -> Vec<String> {
    tasks.iter().map(|t| t.title().to_string()).collect()
}

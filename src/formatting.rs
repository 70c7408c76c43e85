//! Formatting helper functions for the tracker MCP server
//!
//! This module contains the text rendering of tasks, projects and reminders.

use crate::tracker::{Project, Task, format_timestamp};
use chrono::NaiveDateTime;

/// One-line summary of a task
pub fn format_task_line(task: &Task) -> String {
    let marker = if task.is_completed() { "[x]" } else { "[ ]" };
    format!(
        "{} {} | {} | priority: {} | deadline: {}",
        marker,
        task.short_id(),
        task.title(),
        task.priority().label(),
        task.deadline()
    )
}

/// Full detail block for a single task
pub fn format_task_details(task: &Task) -> String {
    let mut result = format!("Task {}\n", task.id());
    result.push_str(&format!("  Short id: {}\n", task.short_id()));
    result.push_str(&format!("  Title: {}\n", task.title()));
    if let Some(description) = task.description()
        && !description.is_empty()
    {
        result.push_str(&format!("  Description: {}\n", description));
    }
    result.push_str(&format!("  Priority: {}\n", task.priority().label()));
    result.push_str(&format!("  Deadline: {}\n", task.deadline()));
    if let Some(window) = task.window() {
        result.push_str(&format!(
            "  Window: {} - {}\n",
            format_timestamp(&window.start),
            format_timestamp(&window.end)
        ));
    }
    result.push_str(&format!("  Completed: {}\n", task.is_completed()));
    result
}

/// Render a list of tasks under a count header
pub fn format_tasks(tasks: &[&Task], empty_message: &str) -> String {
    if tasks.is_empty() {
        return empty_message.to_string();
    }

    let mut result = format!("Found {} task(s):\n\n", tasks.len());
    for task in tasks {
        result.push_str("- ");
        result.push_str(&format_task_line(task));
        result.push('\n');
    }
    result
}

/// Render all projects with their task counts
pub fn format_projects<'a>(projects: impl IntoIterator<Item = &'a Project>) -> String {
    let lines: Vec<String> = projects
        .into_iter()
        .map(|p| {
            format!(
                "- [{}] {} (tasks: {})",
                p.id(),
                p.name(),
                p.task_count()
            )
        })
        .collect();

    if lines.is_empty() {
        return "No projects found".to_string();
    }
    format!(
        "Found {} project(s):\n\n{}\n",
        lines.len(),
        lines.join("\n")
    )
}

/// Reminder text for an upcoming task
///
/// Remaining time is shown as hours and minutes and never goes below zero.
pub fn format_reminder(task: &Task, now: NaiveDateTime) -> String {
    let minutes = task.deadline().minutes_left(now).max(0);
    format!(
        "Upcoming task: {} | Deadline: {} | Priority: {} | Remaining: {}h {}m",
        task.title(),
        task.deadline(),
        task.priority().label(),
        minutes / 60,
        minutes % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{Deadline, Priority};
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn task(minutes: i64) -> Task {
        Task::new(
            "0123456789abcdef".to_string(),
            "Ship release",
            Some("tag and publish".to_string()),
            Deadline::new(now() + Duration::minutes(minutes)),
            Priority::High,
        )
        .unwrap()
    }

    #[test]
    fn test_format_task_line() {
        assert_eq!(
            format_task_line(&task(90)),
            "[ ] 01234567 | Ship release | priority: High | deadline: 2025-03-15T10:30"
        );
    }

    #[test]
    fn test_format_task_details_includes_window() {
        let timed = task(90).with_window(now(), now() + Duration::hours(1));
        let details = format_task_details(&timed);
        assert!(details.contains("Description: tag and publish"));
        let window = "Window: 2025-03-15T09:00 - 2025-03-15T10:00";
        assert!(details.contains(window));
        assert!(details.contains("Completed: false"));
    }

    #[test]
    fn test_format_tasks_empty() {
        assert_eq!(format_tasks(&[], "Nothing due"), "Nothing due");
    }

    #[test]
    fn test_format_reminder_remaining_time() {
        assert_eq!(
            format_reminder(&task(135), now()),
            "Upcoming task: Ship release | Deadline: 2025-03-15T11:15 | Priority: High | \
             Remaining: 2h 15m"
        );
    }

    #[test]
    fn test_format_reminder_clamps_past_deadline() {
        let reminder = format_reminder(&task(-30), now());
        assert!(reminder.ends_with("Remaining: 0h 0m"));
    }
}

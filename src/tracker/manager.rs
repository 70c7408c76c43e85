use crate::error::{EntityKind, Result, TrackerError};
use crate::tracker::clock::{Clock, SystemClock};
use crate::tracker::deadline::Deadline;
use crate::tracker::ids::{IdSource, UuidIds};
use crate::tracker::priority::Priority;
use crate::tracker::project::Project;
use crate::tracker::reminder::ReminderTracker;
use crate::tracker::task::Task;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use tracing::{debug, info};

/// Owner of every project and task
///
/// The manager is the single entry point for the tracker: it generates ids,
/// keeps both registries, resolves user-supplied identifiers and runs all
/// queries (see `queries.rs`) and CSV operations (see `csv_io.rs`).
pub struct TaskManager {
    /// Projects by id, in creation order
    pub(crate) projects: IndexMap<String, Project>,

    /// Tasks by full id, in creation order
    ///
    /// Short-id lookups scan this map on demand; no secondary index is kept.
    pub(crate) tasks: IndexMap<String, Task>,

    pub(crate) reminders: ReminderTracker,

    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::with_sources(SystemClock, UuidIds)
    }
}

impl TaskManager {
    /// Create an empty manager using the wall clock and random UUIDs
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty manager with explicit time and id sources
    pub fn with_sources(clock: impl Clock + 'static, ids: impl IdSource + 'static) -> Self {
        Self {
            projects: IndexMap::new(),
            tasks: IndexMap::new(),
            reminders: ReminderTracker::new(),
            clock: Box::new(clock),
            ids: Box::new(ids),
        }
    }

    /// Current instant according to the manager's clock
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    // Creation

    /// Create and register a new project
    pub fn create_project(&mut self, name: &str) -> &Project {
        let id = self.ids.next_id();
        info!(project_id = %id, name, "created project");
        let (index, _) = self
            .projects
            .insert_full(id.clone(), Project::new(id, name));
        &self.projects[index]
    }

    /// Create and register a new task
    ///
    /// # Errors
    /// Returns a validation error if the title is blank
    pub fn create_task(
        &mut self,
        title: &str,
        description: Option<&str>,
        due: NaiveDateTime,
        priority: Priority,
    ) -> Result<&Task> {
        let task = Task::new(
            self.ids.next_id(),
            title,
            description.map(str::to_string),
            Deadline::new(due),
            priority,
        )?;
        Ok(self.register_task(task))
    }

    /// Create and register a new task with a start/end window
    ///
    /// # Errors
    /// Returns a validation error if the title is blank
    pub fn create_timed_task(
        &mut self,
        title: &str,
        description: Option<&str>,
        due: NaiveDateTime,
        priority: Priority,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<&Task> {
        let task = Task::new(
            self.ids.next_id(),
            title,
            description.map(str::to_string),
            Deadline::new(due),
            priority,
        )?
        .with_window(start, end);
        Ok(self.register_task(task))
    }

    /// Add a freshly built task to the global registry
    pub(crate) fn register_task(&mut self, task: Task) -> &Task {
        info!(task_id = task.id(), title = task.title(), "registered task");
        let (index, _) = self.tasks.insert_full(task.id().to_string(), task);
        &self.tasks[index]
    }

    /// Generate an id for a task built outside `create_task`
    pub(crate) fn next_id(&mut self) -> String {
        self.ids.next_id()
    }

    // Lookup

    /// All projects in creation order
    pub fn all_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    /// Find a project by its exact id
    ///
    /// # Errors
    /// Returns not-found if no project has this id
    pub fn project_by_id(&self, id: &str) -> Result<&Project> {
        self.projects
            .get(id)
            .ok_or_else(|| TrackerError::not_found(EntityKind::Project, id))
    }

    /// Find a task by its exact full id
    ///
    /// # Errors
    /// Returns not-found if no task has this id
    pub fn task_by_id(&self, id: &str) -> Result<&Task> {
        self.tasks
            .get(id)
            .ok_or_else(|| TrackerError::not_found(EntityKind::Task, id))
    }

    /// Resolve a task from its full id or its short id
    ///
    /// The full id is tried first, exactly as given. Otherwise the trimmed input is
    /// compared case-insensitively with every task's short id.
    ///
    /// # Errors
    /// - validation if the input is blank
    /// - not-found if nothing matches
    /// - ambiguous if the short id matches more than one task
    pub fn task_by_id_or_short_id(&self, id_or_short: &str) -> Result<&Task> {
        if id_or_short.trim().is_empty() {
            return Err(TrackerError::validation("Task id must not be blank"));
        }

        if let Some(task) = self.tasks.get(id_or_short) {
            return Ok(task);
        }

        let short = id_or_short.trim();
        let mut matches = self
            .tasks
            .values()
            .filter(|t| t.short_id().eq_ignore_ascii_case(short));

        match (matches.next(), matches.next()) {
            (None, _) => Err(TrackerError::not_found(EntityKind::Task, id_or_short)),
            (Some(_), Some(_)) => Err(TrackerError::ambiguous(EntityKind::Task, short)),
            (Some(task), None) => {
                debug!(short_id = short, task_id = task.id(), "resolved short id");
                Ok(task)
            }
        }
    }

    /// Resolve a project from its id or its name
    ///
    /// The trimmed input is tried as an id first, then compared case-insensitively
    /// with every trimmed project name.
    ///
    /// # Errors
    /// - validation if the input is blank
    /// - not-found if nothing matches
    /// - ambiguous if several projects share the name
    pub fn project_by_id_or_name(&self, id_or_name: &str) -> Result<&Project> {
        let input = id_or_name.trim();
        if input.is_empty() {
            return Err(TrackerError::validation(
                "Project id or name must not be blank",
            ));
        }

        if let Some(project) = self.projects.get(input) {
            return Ok(project);
        }

        let target = input.to_lowercase();
        let mut matches = self
            .projects
            .values()
            .filter(|p| p.name().trim().to_lowercase() == target);

        match (matches.next(), matches.next()) {
            (None, _) => Err(TrackerError::not_found(EntityKind::Project, input)),
            (Some(_), Some(_)) => Err(TrackerError::ambiguous(EntityKind::Project, input)),
            (Some(project), None) => Ok(project),
        }
    }

    /// Tasks referenced by `project`, in stored order
    pub fn project_tasks<'a>(&'a self, project: &'a Project) -> Vec<&'a Task> {
        project
            .task_ids()
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .collect()
    }

    pub(crate) fn resolve_task_id(&self, task_ref: &str) -> Result<String> {
        self.task_by_id_or_short_id(task_ref)
            .map(|t| t.id().to_string())
    }

    pub(crate) fn resolve_project_id(&self, project_ref: &str) -> Result<String> {
        self.project_by_id_or_name(project_ref)
            .map(|p| p.id().to_string())
    }

    fn task_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .get_mut(id)
            .ok_or_else(|| TrackerError::not_found(EntityKind::Task, id))
    }

    fn project_mut(&mut self, id: &str) -> Result<&mut Project> {
        self.projects
            .get_mut(id)
            .ok_or_else(|| TrackerError::not_found(EntityKind::Project, id))
    }

    // Mutation

    /// Append a task to a project
    ///
    /// Does not check whether the task already belongs to this or another project.
    pub fn assign_task_to_project(&mut self, task_ref: &str, project_ref: &str) -> Result<()> {
        let task_id = self.resolve_task_id(task_ref)?;
        let project_id = self.resolve_project_id(project_ref)?;

        let Self {
            tasks, projects, ..
        } = self;
        let task = tasks
            .get(&task_id)
            .ok_or_else(|| TrackerError::not_found(EntityKind::Task, task_ref))?;
        let project = projects
            .get_mut(&project_id)
            .ok_or_else(|| TrackerError::not_found(EntityKind::Project, project_ref))?;
        project.add_task(task);

        info!(%task_id, %project_id, "assigned task to project");
        Ok(())
    }

    /// Mark a task as completed
    pub fn complete_task(&mut self, task_ref: &str) -> Result<&Task> {
        let task_id = self.resolve_task_id(task_ref)?;
        let task = self.task_mut(&task_id)?;
        task.complete();
        info!(%task_id, "completed task");
        Ok(&*task)
    }

    /// Delete a task everywhere
    ///
    /// Removes the task from every project that references it and from the
    /// registry. Returns the full id of the deleted task.
    pub fn delete_task(&mut self, task_ref: &str) -> Result<String> {
        let task_id = self.resolve_task_id(task_ref)?;

        for project in self.projects.values_mut() {
            project.remove_task_by_id(&task_id);
        }
        self.tasks.shift_remove(&task_id);

        info!(%task_id, "deleted task");
        Ok(task_id)
    }

    /// Overwrite selected task fields
    ///
    /// - `title`: `None` or blank leaves the title unchanged; otherwise trimmed
    /// - `description`: `None` leaves it unchanged; `Some("")` clears it to empty
    /// - `priority` / `deadline`: `None` leaves them unchanged
    pub fn update_task(
        &mut self,
        task_ref: &str,
        title: Option<&str>,
        description: Option<&str>,
        priority: Option<Priority>,
        deadline: Option<NaiveDateTime>,
    ) -> Result<&Task> {
        let task_id = self.resolve_task_id(task_ref)?;
        let task = self.task_mut(&task_id)?;

        if let Some(new_title) = title
            && !new_title.trim().is_empty()
        {
            task.set_title(new_title.trim())?;
        }
        if let Some(new_description) = description {
            task.set_description(Some(new_description.to_string()));
        }
        if let Some(new_priority) = priority {
            task.set_priority(new_priority);
        }
        if let Some(new_due) = deadline {
            task.deadline_mut().set_due(new_due);
        }

        info!(%task_id, "updated task");
        Ok(&*task)
    }

    /// Rename a project
    pub fn rename_project(&mut self, project_ref: &str, name: &str) -> Result<&Project> {
        let project_id = self.resolve_project_id(project_ref)?;
        let project = self.project_mut(&project_id)?;
        project.set_name(name);
        info!(%project_id, name, "renamed project");
        Ok(&*project)
    }

    /// Forget every fired reminder
    pub fn reset_reminders(&mut self) {
        self.reminders.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{ManualClock, SequenceIds};
    use chrono::{Duration, NaiveDate};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn manager_with_ids(ids: &[&str]) -> TaskManager {
        TaskManager::with_sources(
            ManualClock::new(start()),
            SequenceIds::new(ids.iter().copied()),
        )
    }

    #[test]
    fn test_create_project_registers_it() {
        let mut manager = manager_with_ids(&["proj-0001"]);
        let id = manager.create_project("Launch").id().to_string();
        assert_eq!(id, "proj-0001");
        assert_eq!(manager.project_by_id(&id).unwrap().name(), "Launch");
    }

    #[test]
    fn test_create_task_rejects_blank_title() {
        let mut manager = manager_with_ids(&[]);
        let result = manager.create_task("  ", None, start(), Priority::Low);
        assert!(matches!(result, Err(TrackerError::Validation(_))));
        assert_eq!(manager.task_count(), 0);
    }

    #[test]
    fn test_create_timed_task_keeps_window() {
        let mut manager = manager_with_ids(&[]);
        let task = manager
            .create_timed_task(
                "Workshop",
                Some("room 4"),
                start() + Duration::hours(5),
                Priority::Medium,
                start() + Duration::hours(1),
                start() + Duration::hours(3),
            )
            .unwrap();
        assert!(task.is_timed());
        assert_eq!(task.description(), Some("room 4"));
    }

    #[test]
    fn test_short_id_lookup_is_case_insensitive_and_trimmed() {
        let mut manager = manager_with_ids(&["abcdef12-aaaa"]);
        manager
            .create_task("Task", None, start(), Priority::Low)
            .unwrap();

        let task = manager.task_by_id_or_short_id(" ABCDEF12 ").unwrap();
        assert_eq!(task.id(), "abcdef12-aaaa");
    }

    #[test]
    fn test_full_id_wins_over_short_id_collision() {
        let mut manager = manager_with_ids(&["abcdef12", "abcdef12-bbbb"]);
        manager
            .create_task("Exact", None, start(), Priority::Low)
            .unwrap();
        manager
            .create_task("Longer", None, start(), Priority::Low)
            .unwrap();

        // "abcdef12" is both a full id and the short id of both tasks
        let task = manager.task_by_id_or_short_id("abcdef12").unwrap();
        assert_eq!(task.title(), "Exact");
    }

    #[test]
    fn test_blank_task_id_is_validation_error() {
        let manager = manager_with_ids(&[]);
        let err = manager.task_by_id_or_short_id("   ").unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
    }

    #[test]
    fn test_project_lookup_by_name_trims_and_ignores_case() {
        let mut manager = manager_with_ids(&["p-1"]);
        manager.create_project("  Launch ");

        let project = manager.project_by_id_or_name("launch").unwrap();
        assert_eq!(project.id(), "p-1");
        let project = manager.project_by_id_or_name(" LAUNCH ").unwrap();
        assert_eq!(project.id(), "p-1");
    }

    #[test]
    fn test_duplicate_project_names_are_ambiguous() {
        let mut manager = manager_with_ids(&["p-1", "p-2"]);
        manager.create_project("Launch");
        manager.create_project("launch");

        let err = manager.project_by_id_or_name("Launch").unwrap_err();
        assert!(matches!(
            err,
            TrackerError::Ambiguous {
                kind: EntityKind::Project,
                ..
            }
        ));
        assert!(manager.project_by_id_or_name("p-2").is_ok());
    }

    #[test]
    fn test_blank_project_ref_is_validation_error() {
        let mut manager = manager_with_ids(&["p-1"]);
        manager.create_project("Launch");

        for input in ["", "   "] {
            let err = manager.project_by_id_or_name(input).unwrap_err();
            assert!(matches!(err, TrackerError::Validation(_)));
        }
    }

    #[test]
    fn test_project_id_wins_over_name_match() {
        let mut manager = manager_with_ids(&["p-1", "p-2"]);
        manager.create_project("Launch");
        // named after the first project's id
        manager.create_project("p-1");

        let project = manager.project_by_id_or_name("p-1").unwrap();
        assert_eq!(project.name(), "Launch");
        let project = manager.project_by_id_or_name(" p-1 ").unwrap();
        assert_eq!(project.id(), "p-1");
        let project = manager.project_by_id_or_name("P-1").unwrap();
        assert_eq!(project.id(), "p-2");
    }

    #[test]
    fn test_assign_allows_same_task_in_two_projects() {
        let mut manager = manager_with_ids(&["p-1", "p-2", "t-1"]);
        manager.create_project("A");
        manager.create_project("B");
        manager
            .create_task("Shared", None, start(), Priority::Low)
            .unwrap();

        manager.assign_task_to_project("t-1", "A").unwrap();
        manager.assign_task_to_project("t-1", "B").unwrap();

        assert_eq!(manager.project_by_id("p-1").unwrap().task_ids(), ["t-1"]);
        assert_eq!(manager.project_by_id("p-2").unwrap().task_ids(), ["t-1"]);
    }

    #[test]
    fn test_complete_task_by_short_id() {
        let mut manager = manager_with_ids(&["0123456789"]);
        manager
            .create_task("Task", None, start(), Priority::Low)
            .unwrap();

        manager.complete_task("01234567").unwrap();
        assert!(manager.task_by_id("0123456789").unwrap().is_completed());
    }

    #[test]
    fn test_rename_project() {
        let mut manager = manager_with_ids(&["p-1"]);
        manager.create_project("Draft");
        manager.rename_project("draft", "Final").unwrap();
        assert_eq!(manager.project_by_id("p-1").unwrap().name(), "Final");
    }

    #[test]
    fn test_update_task_trims_title_and_sets_fields() {
        let mut manager = manager_with_ids(&["t-1"]);
        manager
            .create_task("Old", Some("desc"), start(), Priority::Low)
            .unwrap();

        let new_due = start() + Duration::days(1);
        let task = manager
            .update_task(
                "t-1",
                Some("  New  "),
                None,
                Some(Priority::High),
                Some(new_due),
            )
            .unwrap();

        assert_eq!(task.title(), "New");
        assert_eq!(task.description(), Some("desc"));
        assert_eq!(task.priority(), Priority::High);
        assert_eq!(task.deadline().due(), new_due);
    }
}

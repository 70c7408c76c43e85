//! Task Tracker Library
//!
//! This library provides an in-process project and task tracker: projects,
//! plain and time-boxed tasks, priority and deadline aware listings, keyword
//! search, de-duplicated reminders and CSV export/import. It is exposed to
//! clients as a Model Context Protocol (MCP) server over stdio.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `TrackerServerHandler` and `handlers` - convert arguments, format replies
//! - **Domain Layer**: `tracker` module - registries, identifier resolution, queries, reminders
//! - **File Layer**: `csv` codec and `storage` - explicit CSV export/import only
//!
//! # Example
//!
//! ```
//! use task_tracker::tracker::{Priority, TaskManager};
//! use chrono::{Duration, Local};
//!
//! let mut manager = TaskManager::new();
//! manager.create_project("Launch");
//! let due = Local::now().naive_local() + Duration::hours(2);
//! let id = manager
//!     .create_task("Write spec", None, due, Priority::High)
//!     .unwrap()
//!     .id()
//!     .to_string();
//! manager.assign_task_to_project(&id, "Launch").unwrap();
//!
//! let upcoming = manager.list_upcoming_tasks("Launch", 24).unwrap();
//! assert_eq!(upcoming[0].title(), "Write spec");
//! ```

pub mod config;
pub mod csv;
pub mod error;
pub mod formatting;
pub mod handlers;
pub mod storage;
pub mod tracker;
pub mod validation;

use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::sync::{Mutex, MutexGuard, PoisonError};

// Re-export commonly used types
pub use config::Config;
pub use error::{EntityKind, Result, TrackerError};
pub use tracker::{ImportSummary, Priority, Project, Task, TaskManager};

/// Application name shown to MCP clients
pub const APP_NAME: &str = "Task & Project Tracker";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server handler for task tracking
///
/// Owns the single `TaskManager` of the process. Tool calls lock it for their
/// whole duration, so operations never interleave. Nothing is persisted
/// automatically; use `export_csv` / `import_csv`.
pub struct TrackerServerHandler {
    pub(crate) manager: Mutex<TaskManager>,
    pub(crate) config: Config,
}

impl TrackerServerHandler {
    /// Create a handler with an empty tracker using the wall clock
    pub fn new(config: Config) -> Self {
        Self::with_manager(TaskManager::new(), config)
    }

    /// Create a handler around an existing manager
    pub fn with_manager(manager: TaskManager, config: Config) -> Self {
        Self {
            manager: Mutex::new(manager),
            config,
        }
    }

    /// Lock the manager; a poisoned lock still yields the data
    pub(crate) fn manager(&self) -> MutexGuard<'_, TaskManager> {
        self.manager.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Task & Project Tracker: organize work into projects, track deadlines and priorities.
///
/// Key concepts:
/// - **project**: named list of tasks; refer to it by id or by name (case-insensitive)
/// - **task**: title, optional description, deadline, priority (LOW/MEDIUM/HIGH), completed flag
/// - **timed task**: a task that also has a start and end time
/// - **short id**: first 8 characters of a task id; accepted wherever a task id is
///
/// Date-times are typed as "YYYY-MM-DD HH:MM" unless configured otherwise.
/// Nothing is saved automatically: use export_csv / import_csv.
#[mcp_server]
impl McpServer for TrackerServerHandler {
    /// **Create project**: Start a new project. Returns its id.
    #[tool]
    async fn create_project(
        &self,
        /// Project name
        name: String,
    ) -> McpResult<String> {
        self.handle_create_project(name).await
    }

    /// **List projects**: All projects with ids and task counts.
    #[tool]
    async fn list_projects(&self) -> McpResult<String> {
        self.handle_list_projects().await
    }

    /// **Rename project**: Change a project's name.
    #[tool]
    async fn rename_project(
        &self,
        /// Project id or current name
        project: String,
        /// New name
        name: String,
    ) -> McpResult<String> {
        self.handle_rename_project(project, name).await
    }

    /// **Create task**: Add a task with deadline and priority. Give start+end for a timed task.
    /// **Tip**: Pass project to assign it immediately.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn create_task(
        &self,
        /// Title (must not be blank)
        title: String,
        /// Description (optional)
        description: Option<String>,
        /// Deadline, e.g. "2025-03-15 09:30"
        deadline: String,
        /// Priority: LOW/MEDIUM/HIGH
        priority: String,
        /// Start time for a timed task (optional, needs end)
        start: Option<String>,
        /// End time for a timed task (optional, needs start)
        end: Option<String>,
        /// Project id or name to assign to (optional)
        project: Option<String>,
    ) -> McpResult<String> {
        self.handle_create_task(title, description, deadline, priority, start, end, project)
            .await
    }

    /// **Show task**: All details of one task.
    #[tool]
    async fn show_task(
        &self,
        /// Task id or short id
        task: String,
    ) -> McpResult<String> {
        self.handle_show_task(task).await
    }

    /// **Assign task**: Add a task to a project.
    #[tool]
    async fn assign_task(
        &self,
        /// Task id or short id
        task: String,
        /// Project id or name
        project: String,
    ) -> McpResult<String> {
        self.handle_assign_task(task, project).await
    }

    /// **Complete task**: Mark a task done. Cannot be undone.
    #[tool]
    async fn complete_task(
        &self,
        /// Task id or short id
        task: String,
    ) -> McpResult<String> {
        self.handle_complete_task(task).await
    }

    /// **Delete task**: Remove a task from every project and forget it. Cannot be undone.
    #[tool]
    async fn delete_task(
        &self,
        /// Task id or short id
        task: String,
    ) -> McpResult<String> {
        self.handle_delete_task(task).await
    }

    /// **Update task**: Change title, description, priority or deadline.
    /// **Tip**: Omit a field (or leave title blank) to keep it; description "" clears it.
    #[tool]
    async fn update_task(
        &self,
        /// Task id or short id
        task: String,
        /// New title (optional)
        title: Option<String>,
        /// New description, ""=empty (optional)
        description: Option<String>,
        /// New priority LOW/MEDIUM/HIGH (optional)
        priority: Option<String>,
        /// New deadline, e.g. "2025-03-15 09:30" (optional)
        deadline: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_task(task, title, description, priority, deadline)
            .await
    }

    /// **Upcoming**: Open tasks due soon, most urgent first.
    #[tool]
    async fn list_upcoming(
        &self,
        /// Project id or name
        project: String,
        /// Window in hours (optional, default from config)
        within_hours: Option<i64>,
    ) -> McpResult<String> {
        self.handle_list_upcoming(project, within_hours).await
    }

    /// **List tasks**: Tasks of a project, open ones first.
    #[tool]
    async fn list_tasks(
        &self,
        /// Project id or name
        project: String,
        /// Filter: all/completed/pending (optional)
        filter: Option<String>,
    ) -> McpResult<String> {
        self.handle_list_tasks(project, filter).await
    }

    /// **Search tasks**: Keyword search in titles (and descriptions if asked).
    /// **Tip**: within_hours or limit switches to deadline ordering.
    #[tool]
    async fn search_tasks(
        &self,
        /// Project id or name
        project: String,
        /// Keyword (case-insensitive)
        keyword: String,
        /// Also search descriptions (optional, default false)
        in_description: Option<bool>,
        /// Filter: all/completed/pending (optional)
        filter: Option<String>,
        /// Only open tasks due within this many hours (optional)
        within_hours: Option<i64>,
        /// Maximum number of results, 0=unlimited (optional)
        limit: Option<i64>,
    ) -> McpResult<String> {
        self.handle_search_tasks(
            project,
            keyword,
            in_description,
            filter,
            within_hours,
            limit,
        )
        .await
    }

    /// **Reminders**: Tasks due within the window that were not reminded yet.
    #[tool]
    async fn run_reminders(
        &self,
        /// Project id or name
        project: String,
        /// Window in minutes (optional, default from config)
        within_minutes: Option<i64>,
    ) -> McpResult<String> {
        self.handle_run_reminders(project, within_minutes).await
    }

    /// **Reset reminders**: Allow every reminder to fire again.
    #[tool]
    async fn reset_reminders(&self) -> McpResult<String> {
        self.handle_reset_reminders().await
    }

    /// **Export CSV**: Project tasks as CSV text, or written to a file when path is given.
    #[tool]
    async fn export_csv(
        &self,
        /// Project id or name
        project: String,
        /// Output file path (optional)
        path: Option<String>,
    ) -> McpResult<String> {
        self.handle_export_csv(project, path).await
    }

    /// **Import CSV**: Load tasks from a CSV file (title,priority,deadline,completed).
    /// Rows already present (same title and deadline) are skipped.
    #[tool]
    async fn import_csv(
        &self,
        /// Project id or name
        project: String,
        /// CSV file path
        path: String,
    ) -> McpResult<String> {
        self.handle_import_csv(project, path).await
    }
}

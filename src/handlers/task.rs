//! Task handlers for the tracker MCP server

use crate::TrackerServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};
use tracing::warn;

impl TrackerServerHandler {
    /// Creates a task (timed when both `start` and `end` are given) and optionally
    /// assigns it to a project right away.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_create_task(
        &self,
        title: String,
        description: Option<String>,
        deadline: String,
        priority: String,
        start: Option<String>,
        end: Option<String>,
        project: Option<String>,
    ) -> McpResult<String> {
        let format = self.config.datetime_format.as_str();
        let due = validation::parse_datetime(&deadline, format)?;
        let priority = validation::parse_priority(&priority)?;
        let start = validation::parse_optional_datetime(start.as_deref(), format)?;
        let end = validation::parse_optional_datetime(end.as_deref(), format)?;

        let mut manager = self.manager();
        // a bad project reference must not leave an unassigned task behind
        let project_id = match project {
            Some(project) => Some(
                manager
                    .project_by_id_or_name(&project)
                    .map_err(validation::to_mcp_error)?
                    .id()
                    .to_string(),
            ),
            None => None,
        };

        let created = match (start, end) {
            (Some(start), Some(end)) => manager.create_timed_task(
                &title,
                description.as_deref(),
                due,
                priority,
                start,
                end,
            ),
            (None, None) => manager.create_task(&title, description.as_deref(), due, priority),
            _ => {
                drop(manager);
                bail_public!(
                    _,
                    "Timed tasks need both start and end. Provide both or neither."
                );
            }
        };
        let task = created.map_err(validation::to_mcp_error)?;
        let id = task.id().to_string();
        let short_id = task.short_id().to_string();

        if let Some(project_id) = project_id
            && let Err(e) = manager.assign_task_to_project(&id, &project_id)
        {
            warn!(task_id = %id, error = %e, "task could not be assigned");
            return Err(validation::to_mcp_error(e));
        }

        Ok(format!(
            "Task created with ID: {} (short: {})",
            id,
            short_id
        ))
    }

    /// Shows every field of one task.
    pub async fn handle_show_task(&self, task: String) -> McpResult<String> {
        let manager = self.manager();
        let task = manager
            .task_by_id_or_short_id(&task)
            .map_err(validation::to_mcp_error)?;
        Ok(formatting::format_task_details(task))
    }

    /// Appends a task to a project.
    pub async fn handle_assign_task(&self, task: String, project: String) -> McpResult<String> {
        let mut manager = self.manager();
        manager
            .assign_task_to_project(&task, &project)
            .map_err(validation::to_mcp_error)?;
        Ok(format!("Task {} assigned to project {}", task, project))
    }

    /// Marks a task completed.
    pub async fn handle_complete_task(&self, task: String) -> McpResult<String> {
        let mut manager = self.manager();
        let completed = manager
            .complete_task(&task)
            .map_err(validation::to_mcp_error)?;
        Ok(format!("Task {} completed", completed.id()))
    }

    /// Deletes a task from the registry and from every project.
    pub async fn handle_delete_task(&self, task: String) -> McpResult<String> {
        let mut manager = self.manager();
        let id = manager
            .delete_task(&task)
            .map_err(validation::to_mcp_error)?;
        Ok(format!("Task {} deleted", id))
    }

    /// Updates the given fields of a task; omitted fields are left alone.
    pub async fn handle_update_task(
        &self,
        task: String,
        title: Option<String>,
        description: Option<String>,
        priority: Option<String>,
        deadline: Option<String>,
    ) -> McpResult<String> {
        let priority = match priority.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => Some(validation::parse_priority(p)?),
            _ => None,
        };
        let deadline =
            validation::parse_optional_datetime(deadline.as_deref(), &self.config.datetime_format)?;

        let mut manager = self.manager();
        let updated = manager
            .update_task(
                &task,
                title.as_deref(),
                description.as_deref(),
                priority,
                deadline,
            )
            .map_err(validation::to_mcp_error)?;
        Ok(format!(
            "Task updated:\n{}",
            formatting::format_task_details(updated)
        ))
    }
}

//! Listing and search handlers for the tracker MCP server

use crate::TrackerServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TrackerServerHandler {
    /// Lists incomplete tasks due within the window (config default when omitted).
    pub async fn handle_list_upcoming(
        &self,
        project: String,
        within_hours: Option<i64>,
    ) -> McpResult<String> {
        let hours = validation::non_negative(
            within_hours.unwrap_or(self.config.upcoming_hours),
            "within_hours",
        )?;

        let manager = self.manager();
        let tasks = manager
            .list_upcoming_tasks(&project, hours)
            .map_err(validation::to_mcp_error)?;
        Ok(formatting::format_tasks(
            &tasks,
            &format!("No upcoming tasks in the next {} hour(s)", hours),
        ))
    }

    /// Lists a project's tasks with an optional completion filter.
    pub async fn handle_list_tasks(
        &self,
        project: String,
        filter: Option<String>,
    ) -> McpResult<String> {
        let completed = validation::parse_completed_filter(filter.as_deref())?;

        let manager = self.manager();
        let tasks = manager
            .list_project_tasks(&project, completed)
            .map_err(validation::to_mcp_error)?;
        Ok(formatting::format_tasks(&tasks, "No tasks found"))
    }

    /// Searches a project's tasks by keyword.
    ///
    /// Uses the advanced search (deadline ordering, window, limit) as soon as
    /// `within_hours` or `limit` is given; otherwise the priority-ordered search.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_search_tasks(
        &self,
        project: String,
        keyword: String,
        in_description: Option<bool>,
        filter: Option<String>,
        within_hours: Option<i64>,
        limit: Option<i64>,
    ) -> McpResult<String> {
        let completed = validation::parse_completed_filter(filter.as_deref())?;
        let in_description = in_description.unwrap_or(false);

        let manager = self.manager();
        let result = if within_hours.is_some() || limit.is_some() {
            let limit = usize::try_from(limit.unwrap_or(0)).unwrap_or(0);
            manager.search_project_tasks_advanced(
                &project,
                &keyword,
                in_description,
                completed,
                within_hours,
                limit,
            )
        } else {
            manager.search_project_tasks(&project, &keyword, in_description, completed)
        };
        let tasks = result.map_err(validation::to_mcp_error)?;

        Ok(formatting::format_tasks(&tasks, "No matching tasks"))
    }
}

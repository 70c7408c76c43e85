//! CSV export/import handlers for the tracker MCP server

use crate::TrackerServerHandler;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TrackerServerHandler {
    /// Returns the project's CSV text, or writes it to `path` when one is given.
    pub async fn handle_export_csv(
        &self,
        project: String,
        path: Option<String>,
    ) -> McpResult<String> {
        let manager = self.manager();
        match path {
            Some(path) => {
                let written = manager
                    .export_project_csv_to_file(&project, &path)
                    .map_err(validation::to_mcp_error)?;
                Ok(format!("CSV written to {}", written.display()))
            }
            None => manager
                .export_project_as_csv(&project)
                .map_err(validation::to_mcp_error),
        }
    }

    /// Imports tasks from a CSV file into a project.
    pub async fn handle_import_csv(&self, project: String, path: String) -> McpResult<String> {
        let mut manager = self.manager();
        let summary = manager
            .import_tasks_from_csv(&project, &path)
            .map_err(validation::to_mcp_error)?;
        Ok(format!(
            "Import finished: {} added, {} skipped",
            summary.added, summary.skipped
        ))
    }
}

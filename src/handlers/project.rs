//! Project handlers for the tracker MCP server

use crate::TrackerServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TrackerServerHandler {
    /// Creates a project and reports its generated id.
    pub async fn handle_create_project(&self, name: String) -> McpResult<String> {
        let mut manager = self.manager();
        let project = manager.create_project(name.trim());
        Ok(format!(
            "Project created with ID: {} (name: {})",
            project.id(),
            project.name()
        ))
    }

    /// Lists every project with its task count, in creation order.
    pub async fn handle_list_projects(&self) -> McpResult<String> {
        let manager = self.manager();
        Ok(formatting::format_projects(manager.all_projects()))
    }

    /// Renames a project found by id or name.
    pub async fn handle_rename_project(&self, project: String, name: String) -> McpResult<String> {
        if name.trim().is_empty() {
            bail_public!(_, "Project name must not be blank");
        }

        let mut manager = self.manager();
        let renamed = manager
            .rename_project(&project, name.trim())
            .map_err(validation::to_mcp_error)?;
        Ok(format!(
            "Project {} renamed to {}",
            renamed.id(),
            renamed.name()
        ))
    }
}

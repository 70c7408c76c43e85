//! Reminder handlers for the tracker MCP server

use crate::TrackerServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TrackerServerHandler {
    /// Produces reminders for tasks due within the window; each task is reminded
    /// once per window until reminders are reset.
    pub async fn handle_run_reminders(
        &self,
        project: String,
        within_minutes: Option<i64>,
    ) -> McpResult<String> {
        let minutes = within_minutes.unwrap_or(self.config.reminder_minutes);

        let mut manager = self.manager();
        let now = manager.now();
        let due = manager
            .run_reminders(&project, minutes)
            .map_err(validation::to_mcp_error)?;

        if due.is_empty() {
            return Ok("No reminders".to_string());
        }
        let lines: Vec<String> = due
            .iter()
            .map(|t| {
                format!(
                    "- [{}] {}",
                    t.short_id(),
                    formatting::format_reminder(t, now)
                )
            })
            .collect();
        Ok(format!(
            "{} reminder(s):\n{}\n",
            lines.len(),
            lines.join("\n")
        ))
    }

    /// Forgets all fired reminders so they can fire again.
    pub async fn handle_reset_reminders(&self) -> McpResult<String> {
        self.manager().reset_reminders();
        Ok("Reminders reset".to_string())
    }
}

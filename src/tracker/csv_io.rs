//! CSV export and import for TaskManager
//!
//! Format (one header line, then one row per task):
//!
//! ```text
//! title,priority,deadline,completed
//! "He said ""hi"", ok",HIGH,2025-03-15T09:00,false
//! ```

use super::deadline::{Deadline, format_timestamp, parse_timestamp};
use super::manager::TaskManager;
use super::priority::Priority;
use super::task::Task;
use crate::csv;
use crate::error::{EntityKind, Result, TrackerError};
use crate::storage::CsvFile;
use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};

/// Header line written on export and skipped on import
pub const CSV_HEADER: &str = "title,priority,deadline,completed";

/// Outcome of an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows turned into new tasks
    pub added: usize,
    /// Rows matching a task already in the project
    pub skipped: usize,
}

/// Duplicate detection key: normalized title plus canonical deadline text
fn dedup_key(title: &str, due: &NaiveDateTime) -> String {
    format!("{}||{}", title.trim().to_lowercase(), format_timestamp(due))
}

impl TaskManager {
    /// Render a project's tasks as CSV text, in stored order
    pub fn export_project_as_csv(&self, project_ref: &str) -> Result<String> {
        let project = self.project_by_id_or_name(project_ref)?;

        let mut out = String::from(CSV_HEADER);
        out.push('\n');
        for task in self.project_tasks(project) {
            let due = format_timestamp(&task.deadline().due());
            let completed = if task.is_completed() { "true" } else { "false" };
            out.push_str(&csv::join_row([
                task.title(),
                task.priority().name(),
                due.as_str(),
                completed,
            ]));
            out.push('\n');
        }
        Ok(out)
    }

    /// Write a project's CSV export to `path`, overwriting any existing file
    ///
    /// Missing parent directories are created. Returns the written path.
    ///
    /// # Errors
    /// - validation if the path is blank
    /// - I/O errors from creating directories or writing the file
    pub fn export_project_csv_to_file(&self, project_ref: &str, path: &str) -> Result<PathBuf> {
        if path.trim().is_empty() {
            return Err(TrackerError::validation("File path must not be blank"));
        }

        let content = self.export_project_as_csv(project_ref)?;
        let file = CsvFile::new(path);
        file.write(&content)?;

        info!(path = %file.path().display(), "exported project CSV");
        Ok(file.path().to_path_buf())
    }

    /// Import tasks from a CSV file into a project
    ///
    /// The first line is treated as the header. Blank lines, rows with fewer
    /// than four fields and rows with a blank title are skipped without being
    /// counted. Rows whose title and deadline match a task already in the project
    /// (or a row imported earlier in the same call) are counted as skipped.
    ///
    /// # Errors
    /// - validation if the path is blank
    /// - missing-file if the path does not exist
    /// - malformed-data on an unknown priority name or an unparseable deadline;
    ///   rows imported before the bad row stay imported
    pub fn import_tasks_from_csv(
        &mut self,
        project_ref: &str,
        path: &str,
    ) -> Result<ImportSummary> {
        if path.trim().is_empty() {
            return Err(TrackerError::validation("CSV file path must not be blank"));
        }

        let project_id = self.resolve_project_id(project_ref)?;
        let file = CsvFile::new(path);
        if !file.exists() {
            return Err(TrackerError::MissingFile(file.path().to_path_buf()));
        }

        let mut existing: HashSet<String> = {
            let project = self.project_by_id(&project_id)?;
            self.project_tasks(project)
                .into_iter()
                .map(|t| dedup_key(t.title(), &t.deadline().due()))
                .collect()
        };

        let lines = file.read_lines()?;
        let mut summary = ImportSummary::default();

        for (index, raw) in lines.iter().enumerate().skip(1) {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let fields = csv::parse_line(Some(line));
            if fields.len() < 4 {
                warn!(line = line_no, "skipping CSV row with fewer than 4 fields");
                continue;
            }

            let title = fields[0].as_str();
            if title.trim().is_empty() {
                warn!(line = line_no, "skipping CSV row with a blank title");
                continue;
            }
            let priority: Priority = fields[1]
                .parse()
                .map_err(|reason| TrackerError::MalformedData {
                    line: line_no,
                    reason,
                })?;
            let due = parse_timestamp(&fields[2]).ok_or_else(|| TrackerError::MalformedData {
                line: line_no,
                reason: format!("invalid deadline '{}'", fields[2]),
            })?;
            let completed = fields[3].eq_ignore_ascii_case("true");

            let key = dedup_key(title, &due);
            if existing.contains(&key) {
                summary.skipped += 1;
                continue;
            }

            let mut task = Task::new(self.next_id(), title, None, Deadline::new(due), priority)?;
            if completed {
                task.complete();
            }

            self.projects
                .get_mut(&project_id)
                .ok_or_else(|| TrackerError::not_found(EntityKind::Project, &project_id))?
                .add_task(&task);
            self.register_task(task);

            existing.insert(key);
            summary.added += 1;
        }

        info!(
            path = %file.path().display(),
            added = summary.added,
            skipped = summary.skipped,
            "imported tasks from CSV"
        );
        Ok(summary)
    }
}

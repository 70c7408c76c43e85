//! Validation helper functions for the tracker MCP server
//!
//! This module converts raw tool arguments (priority names, date-times, filter
//! words) into core types and maps core errors onto MCP errors.

use crate::error::TrackerError;
use crate::tracker::Priority;
use chrono::NaiveDateTime;
use mcp_attr::Result as McpResult;

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Convert a core error into an MCP error carrying the same message
pub fn to_mcp_error(err: TrackerError) -> mcp_attr::Error {
    invalid_params(err.to_string())
}

/// Parse a priority name
///
/// Tool callers may use any letter case (`high`, `High`, `HIGH`); CSV import
/// stays strict and goes through `Priority::from_str` directly.
pub fn parse_priority(priority_str: &str) -> McpResult<Priority> {
    priority_str
        .trim()
        .to_uppercase()
        .parse::<Priority>()
        .map_err(|_| {
            invalid_params(format!(
                "Invalid priority '{}'. Valid priorities: LOW, MEDIUM, HIGH",
                priority_str
            ))
        })
}

/// Parse a user-typed date-time with the configured format
///
/// # Arguments
/// * `value` - Date-time text (e.g., "2025-03-15 09:30")
/// * `format` - chrono format string (e.g., "%Y-%m-%d %H:%M")
pub fn parse_datetime(value: &str, format: &str) -> McpResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), format).map_err(|_| {
        invalid_params(format!(
            "Invalid date-time '{}'. Expected format '{}'",
            value, format
        ))
    })
}

/// Parse an optional date-time; `None` and blank text both mean "not given"
pub fn parse_optional_datetime(
    value: Option<&str>,
    format: &str,
) -> McpResult<Option<NaiveDateTime>> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_datetime(v, format).map(Some),
        _ => Ok(None),
    }
}

/// Parse a completion filter word
///
/// `all` (or nothing) means no filter, `completed`/`done` and `pending`/`open`
/// select one side.
pub fn parse_completed_filter(filter: Option<&str>) -> McpResult<Option<bool>> {
    let Some(filter) = filter else {
        return Ok(None);
    };
    match filter.trim().to_lowercase().as_str() {
        "" | "all" => Ok(None),
        "completed" | "done" => Ok(Some(true)),
        "pending" | "open" => Ok(Some(false)),
        other => Err(invalid_params(format!(
            "Invalid filter '{}'. Valid filters: all, completed, pending",
            other
        ))),
    }
}

/// Reject negative window sizes before they reach the core
pub fn non_negative(value: i64, name: &str) -> McpResult<i64> {
    if value < 0 {
        return Err(invalid_params(format!("{} must not be negative", name)));
    }
    Ok(value)
}

//! MCP tool handlers for the tracker server
//!
//! This module contains the implementation of all MCP tool handlers.
//! Each group of related tools is in a separate file.

pub mod csv;
pub mod list;
pub mod project;
pub mod reminders;
pub mod task;

use crate::error::{Result, TrackerError};
use chrono::{NaiveDateTime, Timelike};
use std::fmt;

const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";
const SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const FRACTION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Render a timestamp as canonical ISO-8601 local date-time text
///
/// Seconds are only written when non-zero (or when a fraction is present), so
/// minute-precision deadlines render as `2025-03-15T09:30`.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    let format = if ts.nanosecond() != 0 {
        FRACTION_FORMAT
    } else if ts.second() != 0 {
        SECOND_FORMAT
    } else {
        MINUTE_FORMAT
    };
    ts.format(format).to_string()
}

/// Parse canonical timestamp text produced by [`format_timestamp`]
///
/// Accepts both the minute form and the second form with an optional fraction.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, FRACTION_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, MINUTE_FORMAT))
        .ok()
}

/// Due date of a task
///
/// Past timestamps are accepted. All time-dependent questions take the
/// evaluation instant explicitly so callers decide which clock is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deadline {
    due: NaiveDateTime,
}

impl Deadline {
    pub fn new(due: NaiveDateTime) -> Self {
        Self { due }
    }

    pub fn due(&self) -> NaiveDateTime {
        self.due
    }

    /// Replace the due timestamp in place
    pub fn set_due(&mut self, due: NaiveDateTime) {
        self.due = due;
    }

    /// True when the due timestamp is strictly before `now`
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        now > self.due
    }

    /// Whole minutes from `now` until due, truncated toward zero
    pub fn minutes_left(&self, now: NaiveDateTime) -> i64 {
        (self.due - now).num_minutes()
    }

    /// Whole hours from `now` until due, truncated toward zero
    pub fn hours_left(&self, now: NaiveDateTime) -> i64 {
        (self.due - now).num_hours()
    }

    /// Check whether the deadline falls within the next `hours` hours
    ///
    /// Compares whole remaining minutes against `hours * 60`, so a deadline
    /// 2h59m away is inside a 3 hour window. Overdue deadlines are never within
    /// any window.
    ///
    /// # Errors
    /// Returns a validation error if `hours` is negative
    pub fn is_within_hours(&self, hours: i64, now: NaiveDateTime) -> Result<bool> {
        if hours < 0 {
            return Err(TrackerError::validation("hours must not be negative"));
        }
        if self.is_overdue(now) {
            return Ok(false);
        }
        Ok(self.minutes_left(now) <= hours.saturating_mul(60))
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_timestamp(&self.due))
    }
}

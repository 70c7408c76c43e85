use std::collections::VecDeque;
use uuid::Uuid;

/// Generator of unique entity ids
pub trait IdSource: Send {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs in hyphenated lower-case form
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Hands out ids from a fixed script, then falls back to a counter
///
/// Used to force short-id collisions in tests.
#[derive(Debug, Default)]
pub struct SequenceIds {
    scripted: VecDeque<String>,
    counter: u64,
}

impl SequenceIds {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scripted: ids.into_iter().map(Into::into).collect(),
            counter: 0,
        }
    }
}

impl IdSource for SequenceIds {
    fn next_id(&mut self) -> String {
        if let Some(id) = self.scripted.pop_front() {
            return id;
        }
        self.counter += 1;
        format!("{:08x}-0000-4000-8000-{:012x}", self.counter, self.counter)
    }
}

//! Entry ID generation.

use uuid::Uuid;

use crate::models::EntryId;

/// Source of entry IDs. Must never repeat an ID during a store's lifetime.
pub trait IdGenerator {
    fn next_id(&mut self) -> EntryId;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> EntryId {
        EntryId::new(Uuid::new_v4().to_string())
    }
}

/// `"{prefix}{n}"` with an increasing counter. Deterministic, for tests and
/// scripted sessions.
#[derive(Debug, Clone)]
pub struct SequentialGenerator {
    prefix: String,
    next: u64,
}

impl SequentialGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialGenerator {
    fn default() -> Self {
        Self::new("e")
    }
}

impl IdGenerator for SequentialGenerator {
    fn next_id(&mut self) -> EntryId {
        let id = EntryId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

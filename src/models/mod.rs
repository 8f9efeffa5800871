//! Data models for entries, direction, fill scenarios and summaries.

mod direction;
mod entry;
mod scenario;

pub use direction::{Direction, SortOrder};
pub use entry::{Entry, EntryField, EntryId};
pub use scenario::{Computed, FillMetrics, PartialScenario, PositionSummary, UndefinedReason};

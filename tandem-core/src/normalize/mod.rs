//! Normalization of raw store payloads into [`UniversalRecord`]s.
//!
//! Normalizers are pure and total: a record failing required-field
//! validation is dropped with a log line instead of raising into the
//! engine.
//!
//! [`UniversalRecord`]: crate::record::UniversalRecord

pub mod event;
pub mod task;

pub use event::{normalize_event, EventDateTime, RawEvent};
pub use task::{normalize_task, PropertyValue, RawTask, TaskFilter, TaskSchema};

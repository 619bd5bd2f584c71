//! Store contracts the engine depends on.
//!
//! The engine never talks to a real store directly; it goes through these
//! traits. Production implementations live in `remote::stores` and speak
//! the provider subprocess protocol; tests substitute recording fakes.

use async_trait::async_trait;

use crate::error::TandemResult;
use crate::normalize::{RawEvent, RawTask};
use crate::record::UniversalRecord;
use crate::window::SyncWindow;

/// Task store ("A" side) operations.
///
/// `create` returns the newly assigned identifier. None of these calls are
/// idempotent; the engine must never create the same logical pair twice,
/// which the back-link rule in the reconciler guarantees. `update` receives
/// the full record, counterpart reference included, and overwrites the
/// stored record wholesale.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All raw tasks whose relevant date falls inside the window, inclusive.
    /// Pagination is the store's concern.
    async fn fetch(&self, window: &SyncWindow) -> TandemResult<Vec<RawTask>>;

    async fn create(&self, record: &UniversalRecord) -> TandemResult<String>;

    async fn update(&self, task_ref: &str, record: &UniversalRecord) -> TandemResult<()>;

    async fn delete(&self, task_ref: &str) -> TandemResult<()>;
}

/// Calendar-event store ("B" side) operations. Same contract as
/// [`TaskStore`], addressed by event identifiers.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn fetch(&self, window: &SyncWindow) -> TandemResult<Vec<RawEvent>>;

    async fn create(&self, record: &UniversalRecord) -> TandemResult<String>;

    async fn update(&self, event_ref: &str, record: &UniversalRecord) -> TandemResult<()>;

    async fn delete(&self, event_ref: &str) -> TandemResult<()>;
}

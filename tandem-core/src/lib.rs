//! Core engine for tandem.
//!
//! tandem keeps two independently-owned record stores, a task store and a
//! calendar-event store, in eventual agreement: every record that should
//! exist on both sides exists on both, with matching title, description and
//! date, and records deleted on one side are removed on the other.
//!
//! This crate provides the reconciliation engine (pair matching, snapshot
//! diffing, conflict resolution, back-link bookkeeping, scheduling) together
//! with the provider-subprocess transport the daemon uses to reach real
//! stores.

pub mod baseline;
pub mod config;
pub mod constants;
pub mod diff;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod pair;
pub mod reconcile;
pub mod record;
pub mod remote;
pub mod scheduler;
pub mod store;
pub mod sync;
pub mod tag;
pub mod window;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{TandemError, TandemResult};
pub use record::{RecordTime, UniversalRecord};

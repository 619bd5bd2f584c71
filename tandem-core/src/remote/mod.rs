//! Communication with external store provider binaries.

pub mod protocol;
pub mod provider;
pub mod stores;

pub use provider::Provider;
pub use stores::{EventRemote, StoreParams, TaskRemote};

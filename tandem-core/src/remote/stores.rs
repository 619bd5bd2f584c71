//! Provider-backed implementations of the store traits.
//!
//! These adapt the typed protocol commands to the [`TaskStore`] and
//! [`EventStore`] seams the engine works against. The event side embeds
//! the counterpart task reference into outgoing descriptions, since
//! calendar stores have no dedicated field for it.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{TandemError, TandemResult};
use crate::normalize::{RawEvent, RawTask};
use crate::record::UniversalRecord;
use crate::remote::protocol::{
    CreateEvent, CreateTask, DeleteEvent, DeleteTask, FetchEvents, FetchTasks, UpdateEvent,
    UpdateTask,
};
use crate::remote::provider::Provider;
use crate::store::{EventStore, TaskStore};
use crate::tag;
use crate::window::SyncWindow;

/// Provider-specific parameters from the config file, passed through to
/// the provider verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreParams(pub HashMap<String, toml::Value>);

impl StoreParams {
    fn to_json(&self) -> TandemResult<serde_json::Map<String, serde_json::Value>> {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.0 {
            let value = serde_json::to_value(value)
                .map_err(|e| TandemError::Serialization(e.to_string()))?;
            map.insert(key.clone(), value);
        }
        Ok(map)
    }
}

pub struct TaskRemote {
    provider: Provider,
    params: StoreParams,
}

impl TaskRemote {
    pub fn new(provider: Provider, params: StoreParams) -> Self {
        TaskRemote { provider, params }
    }
}

#[async_trait]
impl TaskStore for TaskRemote {
    async fn fetch(&self, window: &SyncWindow) -> TandemResult<Vec<RawTask>> {
        self.provider
            .call(FetchTasks {
                store_config: self.params.to_json()?,
                from: window.from_rfc3339(),
                to: window.to_rfc3339(),
            })
            .await
    }

    async fn create(&self, record: &UniversalRecord) -> TandemResult<String> {
        self.provider
            .call(CreateTask {
                store_config: self.params.to_json()?,
                record: record.clone(),
            })
            .await
    }

    async fn update(&self, task_ref: &str, record: &UniversalRecord) -> TandemResult<()> {
        self.provider
            .call(UpdateTask {
                store_config: self.params.to_json()?,
                task_ref: task_ref.to_string(),
                record: record.clone(),
            })
            .await
    }

    async fn delete(&self, task_ref: &str) -> TandemResult<()> {
        self.provider
            .call(DeleteTask {
                store_config: self.params.to_json()?,
                task_ref: task_ref.to_string(),
            })
            .await
    }
}

pub struct EventRemote {
    provider: Provider,
    params: StoreParams,
}

impl EventRemote {
    pub fn new(provider: Provider, params: StoreParams) -> Self {
        EventRemote { provider, params }
    }

    /// Outgoing records carry the task reference inside the description
    /// tag, so a later fetch can re-pair the event.
    fn with_tag(record: &UniversalRecord) -> UniversalRecord {
        let mut outgoing = record.clone();
        if let Some(task_ref) = &outgoing.task_ref {
            outgoing.description = tag::embed(&outgoing.description, task_ref);
        }
        outgoing
    }
}

#[async_trait]
impl EventStore for EventRemote {
    async fn fetch(&self, window: &SyncWindow) -> TandemResult<Vec<RawEvent>> {
        self.provider
            .call(FetchEvents {
                store_config: self.params.to_json()?,
                from: window.from_rfc3339(),
                to: window.to_rfc3339(),
            })
            .await
    }

    async fn create(&self, record: &UniversalRecord) -> TandemResult<String> {
        self.provider
            .call(CreateEvent {
                store_config: self.params.to_json()?,
                record: Self::with_tag(record),
            })
            .await
    }

    async fn update(&self, event_ref: &str, record: &UniversalRecord) -> TandemResult<()> {
        self.provider
            .call(UpdateEvent {
                store_config: self.params.to_json()?,
                event_ref: event_ref.to_string(),
                record: Self::with_tag(record),
            })
            .await
    }

    async fn delete(&self, event_ref: &str) -> TandemResult<()> {
        self.provider
            .call(DeleteEvent {
                store_config: self.params.to_json()?,
                event_ref: event_ref.to_string(),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::task_record;

    #[test]
    fn store_params_convert_to_json() {
        let mut params = HashMap::new();
        params.insert(
            "database_id".to_string(),
            toml::Value::String("db-1".to_string()),
        );
        params.insert("page_size".to_string(), toml::Value::Integer(50));

        let json = StoreParams(params).to_json().unwrap();
        assert_eq!(json["database_id"], "db-1");
        assert_eq!(json["page_size"], 50);
    }

    #[test]
    fn outgoing_event_description_carries_the_tag() {
        let mut record = task_record("t-1", None, "Review", 9);
        record.description = "Bring notes".to_string();

        let outgoing = EventRemote::with_tag(&record);
        assert_eq!(outgoing.description, "Bring notes\n\n[tandem:t-1]");
    }

    #[test]
    fn untagged_record_passes_through_unchanged() {
        let record = crate::testutil::event_record("e-1", None, "Untracked", 9);
        let outgoing = EventRemote::with_tag(&record);
        assert_eq!(outgoing.description, record.description);
    }
}

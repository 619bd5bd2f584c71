//! The JSON protocol spoken between the daemon and provider binaries
//! over stdin/stdout.
//!
//! The protocol is language-agnostic: any executable that reads one
//! request line and writes one response line can be a provider. Providers
//! manage their own credentials; the daemon just forwards the
//! provider-specific parameters from its config.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::normalize::{RawEvent, RawTask};
use crate::record::UniversalRecord;

pub trait StoreCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    FetchTasks,
    CreateTask,
    UpdateTask,
    DeleteTask,
    FetchEvents,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
}

/// Request sent from the daemon to a provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from a provider to the daemon.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::to_string(&Response::<()>::Error {
            error: msg.to_string(),
        })
        .unwrap()
    }
}

/// Fetch tasks within a time window.
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchTasks {
    /// Provider-specific config (e.g., database id, account).
    #[serde(flatten)]
    pub store_config: serde_json::Map<String, serde_json::Value>,
    pub from: String,
    pub to: String,
}

impl StoreCommand for FetchTasks {
    type Response = Vec<RawTask>;
    fn command() -> Command {
        Command::FetchTasks
    }
}

/// Create a task; the response is the new task's identifier.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTask {
    #[serde(flatten)]
    pub store_config: serde_json::Map<String, serde_json::Value>,
    pub record: UniversalRecord,
}

impl StoreCommand for CreateTask {
    type Response = String;
    fn command() -> Command {
        Command::CreateTask
    }
}

/// Overwrite an existing task with the record's content.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(flatten)]
    pub store_config: serde_json::Map<String, serde_json::Value>,
    pub task_ref: String,
    pub record: UniversalRecord,
}

impl StoreCommand for UpdateTask {
    type Response = ();
    fn command() -> Command {
        Command::UpdateTask
    }
}

/// Delete a task by identifier.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTask {
    #[serde(flatten)]
    pub store_config: serde_json::Map<String, serde_json::Value>,
    pub task_ref: String,
}

impl StoreCommand for DeleteTask {
    type Response = ();
    fn command() -> Command {
        Command::DeleteTask
    }
}

/// Fetch events within a time window.
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchEvents {
    #[serde(flatten)]
    pub store_config: serde_json::Map<String, serde_json::Value>,
    pub from: String,
    pub to: String,
}

impl StoreCommand for FetchEvents {
    type Response = Vec<RawEvent>;
    fn command() -> Command {
        Command::FetchEvents
    }
}

/// Create an event; the response is the new event's identifier.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEvent {
    #[serde(flatten)]
    pub store_config: serde_json::Map<String, serde_json::Value>,
    pub record: UniversalRecord,
}

impl StoreCommand for CreateEvent {
    type Response = String;
    fn command() -> Command {
        Command::CreateEvent
    }
}

/// Overwrite an existing event with the record's content.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateEvent {
    #[serde(flatten)]
    pub store_config: serde_json::Map<String, serde_json::Value>,
    pub event_ref: String,
    pub record: UniversalRecord,
}

impl StoreCommand for UpdateEvent {
    type Response = ();
    fn command() -> Command {
        Command::UpdateEvent
    }
}

/// Delete an event by identifier.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteEvent {
    #[serde(flatten)]
    pub store_config: serde_json::Map<String, serde_json::Value>,
    pub event_ref: String,
}

impl StoreCommand for DeleteEvent {
    type Response = ();
    fn command() -> Command {
        Command::DeleteEvent
    }
}

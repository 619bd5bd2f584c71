//! Shared test fixtures: record builders and recording fake stores.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};

use crate::error::{TandemError, TandemResult};
use crate::normalize::{EventDateTime, PropertyValue, RawEvent, RawTask};
use crate::record::{RecordTime, UniversalRecord};
use crate::store::{EventStore, TaskStore};
use crate::window::SyncWindow;

pub fn task_record(
    id: &str,
    event_ref: Option<&str>,
    title: &str,
    modified_hour: u32,
) -> UniversalRecord {
    UniversalRecord {
        task_ref: Some(id.to_string()),
        event_ref: event_ref.map(str::to_string),
        title: title.to_string(),
        description: String::new(),
        occurs_at: RecordTime::Date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
        duration_minutes: 60,
        last_modified: Utc.with_ymd_and_hms(2025, 6, 1, modified_hour, 0, 0).unwrap(),
    }
}

pub fn event_record(
    id: &str,
    task_ref: Option<&str>,
    title: &str,
    modified_hour: u32,
) -> UniversalRecord {
    UniversalRecord {
        task_ref: task_ref.map(str::to_string),
        event_ref: Some(id.to_string()),
        title: title.to_string(),
        description: String::new(),
        occurs_at: RecordTime::Date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
        duration_minutes: 60,
        last_modified: Utc.with_ymd_and_hms(2025, 6, 1, modified_hour, 0, 0).unwrap(),
    }
}

/// Raw task shaped like the default schema expects (Name/Description/Date,
/// counterpart under "Event ID").
pub fn raw_task(id: &str, title: &str, date: &str, event_ref: Option<&str>) -> RawTask {
    let mut properties = HashMap::new();
    properties.insert(
        "Name".to_string(),
        PropertyValue::Title {
            text: title.to_string(),
        },
    );
    properties.insert(
        "Date".to_string(),
        PropertyValue::Date {
            start: date.to_string(),
            end: None,
        },
    );
    if let Some(event_ref) = event_ref {
        properties.insert(
            "Event ID".to_string(),
            PropertyValue::RichText {
                text: event_ref.to_string(),
            },
        );
    }
    RawTask {
        id: id.to_string(),
        last_edited: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
        properties,
    }
}

pub fn raw_event(id: &str, summary: &str, date: &str, description: Option<&str>) -> RawEvent {
    RawEvent {
        id: id.to_string(),
        summary: Some(summary.to_string()),
        description: description.map(str::to_string),
        start: Some(EventDateTime {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            date_time: None,
        }),
        end: None,
        updated: Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()),
        status: None,
    }
}

/// What a fake store was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(UniversalRecord),
    Update(String, UniversalRecord),
    Delete(String),
}

#[derive(Default)]
pub struct FakeTasks {
    pub raw: Vec<RawTask>,
    pub calls: Mutex<Vec<Call>>,
    pub create_id: Option<String>,
    pub fail_fetch: bool,
    pub fail_update: bool,
}

impl FakeTasks {
    pub fn new() -> Self {
        FakeTasks {
            raw: Vec::new(),
            calls: Mutex::new(Vec::new()),
            create_id: Some("task-new".to_string()),
            fail_fetch: false,
            fail_update: false,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskStore for FakeTasks {
    async fn fetch(&self, _window: &SyncWindow) -> TandemResult<Vec<RawTask>> {
        if self.fail_fetch {
            return Err(TandemError::Store("task fetch failed".into()));
        }
        Ok(self.raw.clone())
    }

    async fn create(&self, record: &UniversalRecord) -> TandemResult<String> {
        self.calls.lock().unwrap().push(Call::Create(record.clone()));
        self.create_id
            .clone()
            .ok_or_else(|| TandemError::Store("task create failed".into()))
    }

    async fn update(&self, task_ref: &str, record: &UniversalRecord) -> TandemResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Update(task_ref.to_string(), record.clone()));
        if self.fail_update {
            return Err(TandemError::Store("task update failed".into()));
        }
        Ok(())
    }

    async fn delete(&self, task_ref: &str) -> TandemResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Delete(task_ref.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeEvents {
    pub raw: Vec<RawEvent>,
    pub calls: Mutex<Vec<Call>>,
    pub create_id: Option<String>,
    pub fail_fetch: bool,
    pub fail_update: bool,
}

impl FakeEvents {
    pub fn new() -> Self {
        FakeEvents {
            raw: Vec::new(),
            calls: Mutex::new(Vec::new()),
            create_id: Some("event-new".to_string()),
            fail_fetch: false,
            fail_update: false,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventStore for FakeEvents {
    async fn fetch(&self, _window: &SyncWindow) -> TandemResult<Vec<RawEvent>> {
        if self.fail_fetch {
            return Err(TandemError::Store("event fetch failed".into()));
        }
        Ok(self.raw.clone())
    }

    async fn create(&self, record: &UniversalRecord) -> TandemResult<String> {
        self.calls.lock().unwrap().push(Call::Create(record.clone()));
        self.create_id
            .clone()
            .ok_or_else(|| TandemError::Store("event create failed".into()))
    }

    async fn update(&self, event_ref: &str, record: &UniversalRecord) -> TandemResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Update(event_ref.to_string(), record.clone()));
        if self.fail_update {
            return Err(TandemError::Store("event update failed".into()));
        }
        Ok(())
    }

    async fn delete(&self, event_ref: &str) -> TandemResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Delete(event_ref.to_string()));
        Ok(())
    }
}

//! Normalization of raw task-store records.
//!
//! The task store exposes loosely-typed property bags. Each property is a
//! tagged variant, and the conversion functions are total: an absent or
//! wrongly-typed property yields a sentinel instead of an error, so one bad
//! record can never abort a pass.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::DEFAULT_DURATION_MINUTES;
use crate::record::{RecordTime, UniversalRecord};

/// A task record as returned by the task store, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTask {
    pub id: String,
    pub last_edited: DateTime<Utc>,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

/// A loosely-typed task property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        text: String,
    },
    RichText {
        text: String,
    },
    Date {
        start: String,
        #[serde(default)]
        end: Option<String>,
    },
    Select {
        name: Option<String>,
    },
    Status {
        name: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

impl PropertyValue {
    /// Text content of a title or rich-text property; empty otherwise.
    pub fn as_text(&self) -> &str {
        match self {
            PropertyValue::Title { text } | PropertyValue::RichText { text } => text,
            _ => "",
        }
    }

    /// Option name of a select or status property.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            PropertyValue::Select { name } | PropertyValue::Status { name } => name.as_deref(),
            _ => None,
        }
    }

    /// Start of a date property, as a date or date-time.
    pub fn as_time(&self) -> Option<RecordTime> {
        match self {
            PropertyValue::Date { start, .. } => parse_time(start),
            _ => None,
        }
    }

    /// End of a date property, if any.
    pub fn as_end_time(&self) -> Option<RecordTime> {
        match self {
            PropertyValue::Date { end: Some(end), .. } => parse_time(end),
            _ => None,
        }
    }
}

/// Parse an ISO-8601 date or date-time string.
fn parse_time(s: &str) -> Option<RecordTime> {
    if s.contains('T') {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| RecordTime::DateTime(dt.with_timezone(&Utc)))
    } else {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .map(RecordTime::Date)
    }
}

/// Property names the task normalizer reads, plus an optional select/status
/// filter restricting which tasks take part in synchronization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSchema {
    #[serde(default = "default_title_property")]
    pub title_property: String,
    #[serde(default = "default_description_property")]
    pub description_property: String,
    #[serde(default = "default_date_property")]
    pub date_property: String,
    /// Property holding the counterpart event identifier.
    #[serde(default = "default_counterpart_property")]
    pub counterpart_property: String,
    #[serde(default)]
    pub filter: Option<TaskFilter>,
}

/// Only tasks whose select/status property equals the given option name are
/// synchronized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskFilter {
    pub property: String,
    pub equals: String,
}

fn default_title_property() -> String {
    "Name".to_string()
}

fn default_description_property() -> String {
    "Description".to_string()
}

fn default_date_property() -> String {
    "Date".to_string()
}

fn default_counterpart_property() -> String {
    "Event ID".to_string()
}

impl Default for TaskSchema {
    fn default() -> Self {
        TaskSchema {
            title_property: default_title_property(),
            description_property: default_description_property(),
            date_property: default_date_property(),
            counterpart_property: default_counterpart_property(),
            filter: None,
        }
    }
}

/// Normalize one raw task. Returns None, with a log line, when required
/// fields are missing or the filter excludes the task.
pub fn normalize_task(raw: &RawTask, schema: &TaskSchema) -> Option<UniversalRecord> {
    if let Some(filter) = &schema.filter {
        let matches = raw
            .properties
            .get(&filter.property)
            .and_then(PropertyValue::as_name)
            == Some(filter.equals.as_str());
        if !matches {
            debug!(id = %raw.id, property = %filter.property, "task excluded by filter");
            return None;
        }
    }

    let title = raw
        .properties
        .get(&schema.title_property)
        .map(PropertyValue::as_text)
        .unwrap_or("");
    if title.is_empty() {
        warn!(id = %raw.id, "task has no title, dropping");
        return None;
    }

    let date_property = raw.properties.get(&schema.date_property);
    let Some(occurs_at) = date_property.and_then(PropertyValue::as_time) else {
        warn!(id = %raw.id, "task has no valid date, dropping");
        return None;
    };

    let description = raw
        .properties
        .get(&schema.description_property)
        .map(PropertyValue::as_text)
        .unwrap_or("")
        .to_string();

    let event_ref = raw
        .properties
        .get(&schema.counterpart_property)
        .map(PropertyValue::as_text)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let duration_minutes = date_property
        .and_then(PropertyValue::as_end_time)
        .and_then(|end| occurs_at.minutes_until(&end))
        .unwrap_or(DEFAULT_DURATION_MINUTES);

    Some(UniversalRecord {
        task_ref: Some(raw.id.clone()),
        event_ref,
        title: title.to_string(),
        description,
        occurs_at,
        duration_minutes,
        last_modified: raw.last_edited,
    })
}

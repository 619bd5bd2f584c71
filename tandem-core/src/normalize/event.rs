//! Normalization of raw calendar events.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::DEFAULT_DURATION_MINUTES;
use crate::record::{RecordTime, UniversalRecord};
use crate::tag;

/// A calendar event as returned by the event store, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start: Option<EventDateTime>,
    #[serde(default)]
    pub end: Option<EventDateTime>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Either an all-day date or a timed instant. Exactly one field is expected
/// to be set; when both are, the timed one wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDateTime {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub date_time: Option<DateTime<Utc>>,
}

impl EventDateTime {
    pub fn as_time(&self) -> Option<RecordTime> {
        if let Some(dt) = self.date_time {
            return Some(RecordTime::DateTime(dt));
        }
        self.date.map(RecordTime::Date)
    }
}

/// Normalize one raw event. Cancelled events and events missing a title or
/// start are dropped with a log line. The counterpart task reference comes
/// out of the description tag, which is stripped from the stored text.
pub fn normalize_event(raw: &RawEvent) -> Option<UniversalRecord> {
    if raw.status.as_deref() == Some("cancelled") {
        debug!(id = %raw.id, "event is cancelled, skipping");
        return None;
    }

    let title = raw.summary.as_deref().unwrap_or("");
    if title.is_empty() {
        warn!(id = %raw.id, "event has no title, dropping");
        return None;
    }

    let Some(occurs_at) = raw.start.as_ref().and_then(EventDateTime::as_time) else {
        warn!(id = %raw.id, "event has no valid start, dropping");
        return None;
    };

    let (task_ref, description) = tag::extract(raw.description.as_deref().unwrap_or(""));

    let duration_minutes = raw
        .end
        .as_ref()
        .and_then(EventDateTime::as_time)
        .and_then(|end| occurs_at.minutes_until(&end))
        .unwrap_or(DEFAULT_DURATION_MINUTES);

    Some(UniversalRecord {
        task_ref,
        event_ref: Some(raw.id.clone()),
        title: title.to_string(),
        description,
        occurs_at,
        duration_minutes,
        last_modified: raw.updated.unwrap_or(DateTime::UNIX_EPOCH),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::raw_event;
    use chrono::TimeZone;

    #[test]
    fn normalizes_an_all_day_event() {
        let raw = raw_event("e-1", "Dentist", "2025-06-01", None);
        let record = normalize_event(&raw).unwrap();

        assert_eq!(record.event_ref.as_deref(), Some("e-1"));
        assert_eq!(record.task_ref, None);
        assert_eq!(record.title, "Dentist");
        assert!(!record.occurs_at.has_time());
        assert_eq!(record.duration_minutes, DEFAULT_DURATION_MINUTES);
    }

    #[test]
    fn timed_event_with_end_gets_its_duration() {
        let mut raw = raw_event("e-1", "Standup", "2025-06-01", None);
        raw.start = Some(EventDateTime {
            date: None,
            date_time: Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()),
        });
        raw.end = Some(EventDateTime {
            date: None,
            date_time: Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, 15, 0).unwrap()),
        });

        let record = normalize_event(&raw).unwrap();
        assert!(record.occurs_at.has_time());
        assert_eq!(record.duration_minutes, 15);
    }

    #[test]
    fn tagged_description_yields_task_ref_and_clean_text() {
        let raw = raw_event(
            "e-1",
            "Review",
            "2025-06-01",
            Some(&tag::embed("Bring notes", "t-42")),
        );

        let record = normalize_event(&raw).unwrap();
        assert_eq!(record.task_ref.as_deref(), Some("t-42"));
        assert_eq!(record.description, "Bring notes");
    }

    #[test]
    fn cancelled_event_is_skipped() {
        let mut raw = raw_event("e-1", "Gone", "2025-06-01", None);
        raw.status = Some("cancelled".to_string());
        assert!(normalize_event(&raw).is_none());
    }

    #[test]
    fn missing_title_or_start_drops_the_event() {
        let mut untitled = raw_event("e-1", "", "2025-06-01", None);
        untitled.summary = None;
        assert!(normalize_event(&untitled).is_none());

        let mut no_start = raw_event("e-2", "Has title", "2025-06-01", None);
        no_start.start = None;
        assert!(normalize_event(&no_start).is_none());
    }

    #[test]
    fn missing_updated_defaults_to_the_epoch() {
        let mut raw = raw_event("e-1", "Old", "2025-06-01", None);
        raw.updated = None;
        let record = normalize_event(&raw).unwrap();
        assert_eq!(record.last_modified, DateTime::UNIX_EPOCH);
    }
}

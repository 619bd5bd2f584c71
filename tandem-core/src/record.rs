//! Store-neutral record types.
//!
//! Normalizers convert raw store payloads into these types, and the engine
//! works exclusively with them for matching, diffing and reconciliation.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One task/event as seen from either store, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversalRecord {
    /// Identifier of the pair's record in the task store, if known.
    pub task_ref: Option<String>,
    /// Identifier of the pair's record in the event store, if known.
    pub event_ref: Option<String>,
    pub title: String,
    pub description: String,
    pub occurs_at: RecordTime,
    pub duration_minutes: i64,
    pub last_modified: DateTime<Utc>,
}

/// When a record occurs: a bare calendar date (all-day) or a full date-time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RecordTime {
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl RecordTime {
    /// The calendar date, regardless of whether a time component is present.
    pub fn date(&self) -> NaiveDate {
        match self {
            RecordTime::Date(d) => *d,
            RecordTime::DateTime(dt) => dt.date_naive(),
        }
    }

    pub fn has_time(&self) -> bool {
        matches!(self, RecordTime::DateTime(_))
    }

    /// Minutes between two date-times. None unless both carry a time
    /// component and `end` is strictly later.
    pub fn minutes_until(&self, end: &RecordTime) -> Option<i64> {
        match (self, end) {
            (RecordTime::DateTime(s), RecordTime::DateTime(e)) if e > s => {
                Some((*e - *s).num_minutes())
            }
            _ => None,
        }
    }
}

impl fmt::Display for RecordTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordTime::Date(d) => write!(f, "{}", d),
            RecordTime::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn date_of_datetime_is_its_calendar_date() {
        let dt = Utc.with_ymd_and_hms(2025, 6, 1, 23, 30, 0).unwrap();
        assert_eq!(
            RecordTime::DateTime(dt).date(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn minutes_until_requires_both_timed() {
        let start = RecordTime::DateTime(Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap());
        let end = RecordTime::DateTime(Utc.with_ymd_and_hms(2025, 6, 1, 11, 30, 0).unwrap());
        assert_eq!(start.minutes_until(&end), Some(90));

        let all_day = RecordTime::Date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(all_day.minutes_until(&end), None);
        assert_eq!(end.minutes_until(&start), None);
    }
}

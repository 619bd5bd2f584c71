//! Sliding fetch window.
//!
//! Every pass re-fetches the same bounded date range from both stores. The
//! window is also the deletion-visibility boundary: a record whose date has
//! rolled out of the window is never observed again, so a deletion made on
//! it goes unseen.

use chrono::{DateTime, Duration, Utc};

use crate::constants::{DEFAULT_LOOKAHEAD_DAYS, DEFAULT_LOOKBACK_DAYS};

/// Inclusive date range fetched from both stores each pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Default for SyncWindow {
    /// Default range: yesterday start-of-day to +DEFAULT_LOOKAHEAD_DAYS.
    fn default() -> Self {
        SyncWindow::around_now(DEFAULT_LOOKBACK_DAYS, DEFAULT_LOOKAHEAD_DAYS)
    }
}

impl SyncWindow {
    /// Window reaching `lookback_days` back (clamped to start-of-day) and
    /// `lookahead_days` ahead of now.
    pub fn around_now(lookback_days: i64, lookahead_days: i64) -> Self {
        let now = Utc::now();
        let from = (now - Duration::days(lookback_days))
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();

        SyncWindow {
            from,
            to: now + Duration::days(lookahead_days),
        }
    }

    pub fn from_rfc3339(&self) -> String {
        self.from.to_rfc3339()
    }

    pub fn to_rfc3339(&self) -> String {
        self.to.to_rfc3339()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn lookback_is_clamped_to_start_of_day() {
        let window = SyncWindow::around_now(1, 3);
        assert_eq!(window.from.hour(), 0);
        assert_eq!(window.from.minute(), 0);
        assert!(window.from < Utc::now());
    }

    #[test]
    fn lookahead_reaches_past_now() {
        let window = SyncWindow::around_now(1, 3);
        let expected = Utc::now() + Duration::days(3);
        assert!((expected - window.to).num_seconds().abs() < 5);
    }
}

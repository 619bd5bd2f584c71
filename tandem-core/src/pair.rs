//! Pairs and the pair map.

use std::collections::HashMap;

use crate::constants::PAIR_KEY_SEPARATOR;
use crate::record::UniversalRecord;

/// The logical unit of synchronization: one task/event as seen from up to
/// two stores.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pair {
    pub task: Option<UniversalRecord>,
    pub event: Option<UniversalRecord>,
}

/// One map per reconciliation pass, keyed by the composite pair key.
pub type PairMap = HashMap<String, Pair>;

impl Pair {
    pub fn from_task(record: UniversalRecord) -> Self {
        Pair {
            task: Some(record),
            event: None,
        }
    }

    pub fn from_event(record: UniversalRecord) -> Self {
        Pair {
            task: None,
            event: Some(record),
        }
    }

    /// Both sides present.
    pub fn is_matched(&self) -> bool {
        self.task.is_some() && self.event.is_some()
    }

    /// Exactly one side present.
    pub fn is_one_sided(&self) -> bool {
        self.task.is_some() != self.event.is_some()
    }
}

/// Composite pair key: solely a function of the two cross-reference
/// identifiers, never of content, so a pair's key survives title and date
/// edits. A task record and an event record that cross-reference each other
/// consistently synthesize the same key.
pub fn pair_key(record: &UniversalRecord) -> String {
    format!(
        "{}{}{}",
        record.event_ref.as_deref().unwrap_or(""),
        PAIR_KEY_SEPARATOR,
        record.task_ref.as_deref().unwrap_or("")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{event_record, task_record};

    #[test]
    fn key_is_stable_under_content_edits() {
        let before = task_record("t-1", Some("e-1"), "Original title", 9);
        let mut after = before.clone();
        after.title = "Edited title".to_string();
        after.description = "Edited body".to_string();
        assert_eq!(pair_key(&before), pair_key(&after));
    }

    #[test]
    fn matched_records_synthesize_the_same_key() {
        let task = task_record("t-1", Some("e-1"), "Standup", 9);
        let event = event_record("e-1", Some("t-1"), "Standup", 9);
        assert_eq!(pair_key(&task), pair_key(&event));
        assert_eq!(pair_key(&task), "e-1::t-1");
    }

    #[test]
    fn missing_refs_leave_their_half_empty() {
        let task = task_record("t-1", None, "Solo", 9);
        assert_eq!(pair_key(&task), "::t-1");
    }

    #[test]
    fn pair_state_predicates() {
        let task = task_record("t-1", None, "Solo", 9);
        let one_sided = Pair::from_task(task.clone());
        assert!(one_sided.is_one_sided());
        assert!(!one_sided.is_matched());

        let matched = Pair {
            task: Some(task),
            event: Some(event_record("e-1", Some("t-1"), "Solo", 9)),
        };
        assert!(matched.is_matched());
        assert!(!matched.is_one_sided());
    }
}

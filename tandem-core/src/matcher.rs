//! Pair matching: joins normalized records from both stores into pairs.

use std::collections::hash_map::Entry;

use tracing::warn;

use crate::pair::{pair_key, Pair, PairMap};
use crate::record::UniversalRecord;

/// Build the pass's pair map from the two normalized snapshots.
///
/// Task records are inserted first, each opening a task-only pair. An event
/// record whose key is already present attaches to that pair's event slot;
/// otherwise it opens an event-only pair.
///
/// Two task records sharing a key indicate a data-integrity problem in the
/// task store (two records cross-referencing the same counterpart); the
/// later one is dropped for this pass with a warning, never an abort. The
/// same applies to a second event record under an already-filled key.
pub fn build_pair_map(tasks: Vec<UniversalRecord>, events: Vec<UniversalRecord>) -> PairMap {
    let mut map = PairMap::new();

    for record in tasks {
        let key = pair_key(&record);
        match map.entry(key) {
            Entry::Occupied(entry) => {
                warn!(
                    key = %entry.key(),
                    title = %record.title,
                    "duplicate task pair key, dropping later record"
                );
            }
            Entry::Vacant(entry) => {
                entry.insert(Pair::from_task(record));
            }
        }
    }

    for record in events {
        let key = pair_key(&record);
        match map.entry(key) {
            Entry::Occupied(mut entry) => {
                if entry.get().event.is_some() {
                    warn!(
                        key = %entry.key(),
                        title = %record.title,
                        "duplicate event pair key, dropping later record"
                    );
                } else {
                    entry.get_mut().event = Some(record);
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(Pair::from_event(record));
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{event_record, task_record};

    #[test]
    fn event_attaches_to_the_matching_task_pair() {
        let tasks = vec![task_record("t-1", Some("e-1"), "Standup", 9)];
        let events = vec![event_record("e-1", Some("t-1"), "Standup", 9)];

        let map = build_pair_map(tasks, events);

        assert_eq!(map.len(), 1);
        let pair = &map["e-1::t-1"];
        assert!(pair.is_matched());
    }

    #[test]
    fn unrelated_records_open_separate_pairs() {
        let tasks = vec![task_record("t-1", None, "Write report", 9)];
        let events = vec![event_record("e-9", None, "Dentist", 9)];

        let map = build_pair_map(tasks, events);

        assert_eq!(map.len(), 2);
        assert!(map["::t-1"].is_one_sided());
        assert!(map["e-9::"].is_one_sided());
    }

    #[test]
    fn duplicate_task_key_keeps_the_first_record() {
        let first = task_record("t-1", Some("e-1"), "First", 9);
        let second = task_record("t-1", Some("e-1"), "Second", 10);

        let map = build_pair_map(vec![first, second], vec![]);

        assert_eq!(map.len(), 1);
        assert_eq!(map["e-1::t-1"].task.as_ref().unwrap().title, "First");
    }

    #[test]
    fn duplicate_event_key_keeps_the_first_record() {
        let tasks = vec![task_record("t-1", Some("e-1"), "Standup", 9)];
        let events = vec![
            event_record("e-1", Some("t-1"), "Standup", 9),
            event_record("e-1", Some("t-1"), "Imposter", 9),
        ];

        let map = build_pair_map(tasks, events);

        assert_eq!(map.len(), 1);
        assert_eq!(map["e-1::t-1"].event.as_ref().unwrap().title, "Standup");
    }

    #[test]
    fn matching_is_idempotent() {
        let tasks = vec![
            task_record("t-1", Some("e-1"), "Standup", 9),
            task_record("t-2", None, "Solo task", 9),
        ];
        let events = vec![
            event_record("e-1", Some("t-1"), "Standup", 9),
            event_record("e-2", None, "Solo event", 9),
        ];

        let once = build_pair_map(tasks.clone(), events.clone());
        let twice = build_pair_map(tasks, events);

        assert_eq!(once, twice);
    }
}

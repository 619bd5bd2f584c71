//! Snapshot diffing: classifies each pair in the new map against the
//! baseline without applying any changes.

use tracing::debug;

use crate::baseline::Baseline;
use crate::pair::Pair;
use crate::record::UniversalRecord;

/// One field-level mismatch between two snapshots of a pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Discrepancy {
    /// Which record of the pair differs ("task", "event" or "pair").
    pub side: &'static str,
    pub field: &'static str,
    pub previous: String,
    pub current: String,
}

/// How a key in the new map relates to the baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum PairClass {
    /// Present in both maps and semantically equal.
    Unchanged,
    /// Present in both maps but differing; routed to conflict handling.
    Changed(Vec<Discrepancy>),
    /// Absent from the baseline; routed to the creation path.
    Appeared,
}

/// Classify the new pair for `key` against the baseline. All discrepancies
/// found for a changed pair are logged before it is routed onward.
pub fn classify(key: &str, new_pair: &Pair, baseline: &Baseline) -> PairClass {
    let Some(old_pair) = baseline.get(key) else {
        return PairClass::Appeared;
    };

    let discrepancies = pair_discrepancies(old_pair, new_pair);
    if discrepancies.is_empty() {
        return PairClass::Unchanged;
    }

    for d in &discrepancies {
        debug!(
            key,
            side = d.side,
            field = d.field,
            previous = %d.previous,
            current = %d.current,
            "pair discrepancy"
        );
    }
    PairClass::Changed(discrepancies)
}

/// Pair equality requires both sides present in both snapshots and each
/// side's record unchanged from its prior snapshot. Anything else is a list
/// of discrepancies.
pub fn pair_discrepancies(old: &Pair, new: &Pair) -> Vec<Discrepancy> {
    match (
        old.task.as_ref(),
        old.event.as_ref(),
        new.task.as_ref(),
        new.event.as_ref(),
    ) {
        (Some(old_task), Some(old_event), Some(new_task), Some(new_event)) => {
            let mut out = record_discrepancies("task", old_task, new_task);
            out.extend(record_discrepancies("event", old_event, new_event));
            out
        }
        _ => vec![Discrepancy {
            side: "pair",
            field: "presence",
            previous: sides(old).to_string(),
            current: sides(new).to_string(),
        }],
    }
}

/// Compare two snapshots of the same record.
///
/// Titles must match exactly, trimmed descriptions must match exactly and
/// calendar dates must match. Full date-times are compared only when both
/// snapshots carry a time component: an all-day record matches a timed
/// record on date alone.
pub fn record_discrepancies(
    side: &'static str,
    prev: &UniversalRecord,
    curr: &UniversalRecord,
) -> Vec<Discrepancy> {
    let mut out = Vec::new();

    if prev.title != curr.title {
        out.push(Discrepancy {
            side,
            field: "title",
            previous: prev.title.clone(),
            current: curr.title.clone(),
        });
    }

    if prev.description.trim() != curr.description.trim() {
        out.push(Discrepancy {
            side,
            field: "description",
            previous: prev.description.trim().to_string(),
            current: curr.description.trim().to_string(),
        });
    }

    if prev.occurs_at.date() != curr.occurs_at.date() {
        out.push(Discrepancy {
            side,
            field: "date",
            previous: prev.occurs_at.date().to_string(),
            current: curr.occurs_at.date().to_string(),
        });
    } else if prev.occurs_at.has_time()
        && curr.occurs_at.has_time()
        && prev.occurs_at != curr.occurs_at
    {
        out.push(Discrepancy {
            side,
            field: "time",
            previous: prev.occurs_at.to_string(),
            current: curr.occurs_at.to_string(),
        });
    }

    out
}

fn sides(pair: &Pair) -> &'static str {
    match (pair.task.is_some(), pair.event.is_some()) {
        (true, true) => "task+event",
        (true, false) => "task",
        (false, true) => "event",
        (false, false) => "none",
    }
}

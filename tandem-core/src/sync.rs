//! One reconciliation pass: fetch → normalize → match → diff/reconcile →
//! baseline replacement.

use tracing::debug;

use crate::baseline::Baseline;
use crate::error::TandemResult;
use crate::matcher::build_pair_map;
use crate::normalize::{normalize_event, normalize_task, TaskSchema};
use crate::reconcile::{PassStats, Reconciler};
use crate::store::{EventStore, TaskStore};
use crate::window::SyncWindow;

/// Run one full pass and replace the baseline with the map it produced.
///
/// The two fetches run concurrently; everything after them is sequential,
/// since the reconciler mutates the shared pair map. A failed fetch aborts
/// the pass before matching and leaves the baseline untouched; reconciling
/// against a half-empty snapshot would read as a mass deletion. Action-level
/// failures inside the pass are logged by the reconciler and never abort it.
pub async fn run_pass(
    tasks: &dyn TaskStore,
    events: &dyn EventStore,
    schema: &TaskSchema,
    window: &SyncWindow,
    baseline: &mut Baseline,
) -> TandemResult<PassStats> {
    let (raw_tasks, raw_events) = tokio::join!(tasks.fetch(window), events.fetch(window));
    let raw_tasks = raw_tasks?;
    let raw_events = raw_events?;
    debug!(
        tasks = raw_tasks.len(),
        events = raw_events.len(),
        "fetched snapshots"
    );

    let task_records: Vec<_> = raw_tasks
        .iter()
        .filter_map(|raw| normalize_task(raw, schema))
        .collect();
    let event_records: Vec<_> = raw_events.iter().filter_map(normalize_event).collect();

    let mut new_map = build_pair_map(task_records, event_records);

    let stats = Reconciler::new(tasks, events).run(&mut new_map, baseline).await;

    baseline.replace(new_map);

    Ok(stats)
}

//! Fixed-interval drive of reconciliation passes.
//!
//! One pass runs to completion before the next tick is honored, and missed
//! ticks are skipped, so passes never overlap. The scheduler owns the
//! baseline for the lifetime of the process; there is no cancellation of an
//! in-flight pass, a slow pass simply delays the next firing.

use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::baseline::Baseline;
use crate::normalize::TaskSchema;
use crate::store::{EventStore, TaskStore};
use crate::sync::run_pass;
use crate::window::SyncWindow;

pub struct Scheduler {
    pub interval: Duration,
    pub lookback_days: i64,
    pub lookahead_days: i64,
    pub schema: TaskSchema,
}

impl Scheduler {
    /// Loop forever, running one pass per tick.
    pub async fn run(&self, tasks: &dyn TaskStore, events: &dyn EventStore) {
        let mut baseline = Baseline::new();
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let window = SyncWindow::around_now(self.lookback_days, self.lookahead_days);

            match run_pass(tasks, events, &self.schema, &window, &mut baseline).await {
                Ok(stats) => info!(
                    pairs = stats.pairs,
                    created_tasks = stats.created_tasks,
                    created_events = stats.created_events,
                    updated_tasks = stats.updated_tasks,
                    updated_events = stats.updated_events,
                    deleted_tasks = stats.deleted_tasks,
                    deleted_events = stats.deleted_events,
                    failed = stats.failed,
                    "pass complete"
                ),
                Err(err) => warn!(%err, "pass aborted, baseline unchanged"),
            }
        }
    }
}

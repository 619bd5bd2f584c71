//! Per-pair action selection and execution.
//!
//! For each classified key the reconciler picks one of: no-op, create on
//! the missing side (with cross-reference back-linking), conflict
//! resolution, or deletion. Action failures are logged and never abort the
//! pass; the timer-driven loop is self-healing across passes.

use tracing::{debug, info, warn};

use crate::baseline::Baseline;
use crate::diff::{classify, Discrepancy, PairClass};
use crate::pair::{Pair, PairMap};
use crate::record::UniversalRecord;
use crate::store::{EventStore, TaskStore};

/// Counters from one reconciliation pass.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PassStats {
    pub pairs: usize,
    pub created_tasks: usize,
    pub created_events: usize,
    pub updated_tasks: usize,
    pub updated_events: usize,
    pub deleted_tasks: usize,
    pub deleted_events: usize,
    pub failed: usize,
}

pub struct Reconciler<'a> {
    tasks: &'a dyn TaskStore,
    events: &'a dyn EventStore,
}

impl<'a> Reconciler<'a> {
    pub fn new(tasks: &'a dyn TaskStore, events: &'a dyn EventStore) -> Self {
        Reconciler { tasks, events }
    }

    /// Run all key-level actions for one pass, mutating `new_map` in place
    /// so it can become the next baseline.
    pub async fn run(&self, new_map: &mut PairMap, baseline: &Baseline) -> PassStats {
        let mut stats = PassStats {
            pairs: new_map.len(),
            ..PassStats::default()
        };

        let keys: Vec<String> = new_map.keys().cloned().collect();
        for key in keys {
            let Some(pair) = new_map.get(&key).cloned() else {
                continue;
            };
            match classify(&key, &pair, baseline) {
                PairClass::Unchanged => {}
                PairClass::Appeared => {
                    self.handle_appeared(&key, pair, baseline, new_map, &mut stats)
                        .await;
                }
                PairClass::Changed(discrepancies) => {
                    self.handle_changed(&key, pair, discrepancies, new_map, &mut stats)
                        .await;
                }
            }
        }

        self.apply_deletions(new_map, baseline, &mut stats).await;

        stats
    }

    /// Creation path for keys absent from the baseline.
    ///
    /// On the first-ever pass there is no ground truth to create from, so
    /// appeared pairs are absorbed into the baseline untouched. A one-sided
    /// pair whose record already references a counterpart is also left
    /// alone: the counterpart exists somewhere (out of window, or its
    /// back-link is damaged) and creating again would duplicate it.
    async fn handle_appeared(
        &self,
        key: &str,
        pair: Pair,
        baseline: &Baseline,
        new_map: &mut PairMap,
        stats: &mut PassStats,
    ) {
        if baseline.is_initial() {
            debug!(key, "initial pass, absorbing pair without creation");
            return;
        }
        if pair.is_matched() {
            return;
        }

        match (pair.task, pair.event) {
            (Some(task), None) => {
                if task.event_ref.is_some() {
                    debug!(key, "task already references an event, skipping creation");
                    return;
                }
                self.create_event_from_task(key, task, new_map, stats).await;
            }
            (None, Some(event)) => {
                if event.task_ref.is_some() {
                    debug!(key, "event already references a task, skipping creation");
                    return;
                }
                self.create_task_from_event(key, event, new_map, stats).await;
            }
            _ => {}
        }
    }

    async fn create_event_from_task(
        &self,
        key: &str,
        task: UniversalRecord,
        new_map: &mut PairMap,
        stats: &mut PassStats,
    ) {
        let Some(task_ref) = task.task_ref.clone() else {
            warn!(key, "task-only pair without a task reference, skipping");
            return;
        };

        let event_ref = match self.events.create(&task).await {
            Ok(event_ref) => event_ref,
            Err(err) => {
                // Dropping the key lets the next pass see it as appeared
                // again and retry the creation.
                stats.failed += 1;
                warn!(key, %err, "event creation failed, retrying next pass");
                new_map.remove(key);
                return;
            }
        };
        info!(key, event_ref, title = %task.title, "created event from task");
        stats.created_events += 1;

        let mut linked = task;
        linked.event_ref = Some(event_ref.clone());

        // Back-link the new event id into the task store. Without it the
        // next pass would see the pair as still one-sided and create a
        // duplicate.
        match self.tasks.update(&task_ref, &linked).await {
            Ok(()) => {
                let event_side = linked.clone();
                new_map.insert(
                    key.to_string(),
                    Pair {
                        task: Some(linked),
                        event: Some(event_side),
                    },
                );
            }
            Err(err) => {
                stats.failed += 1;
                warn!(key, %err, "back-link write to task store failed, pair stays one-sided");
            }
        }
    }

    async fn create_task_from_event(
        &self,
        key: &str,
        event: UniversalRecord,
        new_map: &mut PairMap,
        stats: &mut PassStats,
    ) {
        let Some(event_ref) = event.event_ref.clone() else {
            warn!(key, "event-only pair without an event reference, skipping");
            return;
        };

        let task_ref = match self.tasks.create(&event).await {
            Ok(task_ref) => task_ref,
            Err(err) => {
                stats.failed += 1;
                warn!(key, %err, "task creation failed, retrying next pass");
                new_map.remove(key);
                return;
            }
        };
        info!(key, task_ref, title = %event.title, "created task from event");
        stats.created_tasks += 1;

        let mut linked = event;
        linked.task_ref = Some(task_ref);

        match self.events.update(&event_ref, &linked).await {
            Ok(()) => {
                let task_side = linked.clone();
                new_map.insert(
                    key.to_string(),
                    Pair {
                        task: Some(task_side),
                        event: Some(linked),
                    },
                );
            }
            Err(err) => {
                stats.failed += 1;
                warn!(key, %err, "back-link write to event store failed, pair stays one-sided");
            }
        }
    }

    /// Conflict path: last-write-wins on modification timestamps,
    /// content-agnostic. The entire losing-side record is overwritten; ties
    /// treat the task store as truth.
    ///
    /// The merged content is written into the new map whether or not the
    /// update call succeeds: while the stores still differ, the next pass
    /// re-detects the divergence against the baseline and retries.
    async fn handle_changed(
        &self,
        key: &str,
        pair: Pair,
        discrepancies: Vec<Discrepancy>,
        new_map: &mut PairMap,
        stats: &mut PassStats,
    ) {
        let (Some(task), Some(event)) = (pair.task, pair.event) else {
            // One-sided pairs have nothing to reconcile here: creation only
            // applies to appeared keys and deletion is computed from the
            // baseline scan.
            debug!(key, "pair differs from baseline but is one-sided, no action");
            return;
        };

        info!(
            key,
            discrepancies = discrepancies.len(),
            "conflict detected, resolving by last write"
        );

        if event.last_modified > task.last_modified {
            let merged = UniversalRecord {
                task_ref: task.task_ref.clone(),
                ..event.clone()
            };
            let Some(task_ref) = task.task_ref else {
                warn!(key, "conflicting pair without a task reference, skipping");
                return;
            };
            match self.tasks.update(&task_ref, &merged).await {
                Ok(()) => {
                    info!(key, title = %merged.title, "updated task from event");
                    stats.updated_tasks += 1;
                }
                Err(err) => {
                    stats.failed += 1;
                    warn!(key, %err, "task update failed");
                }
            }
            new_map.insert(
                key.to_string(),
                Pair {
                    task: Some(merged),
                    event: Some(event),
                },
            );
        } else {
            let merged = UniversalRecord {
                event_ref: event.event_ref.clone(),
                ..task.clone()
            };
            let Some(event_ref) = event.event_ref else {
                warn!(key, "conflicting pair without an event reference, skipping");
                return;
            };
            match self.events.update(&event_ref, &merged).await {
                Ok(()) => {
                    info!(key, title = %merged.title, "updated event from task");
                    stats.updated_events += 1;
                }
                Err(err) => {
                    stats.failed += 1;
                    warn!(key, %err, "event update failed");
                }
            }
            new_map.insert(
                key.to_string(),
                Pair {
                    task: Some(task),
                    event: Some(merged),
                },
            );
        }
    }

    /// Deletion is computed from the baseline, not from the new map: a
    /// baseline pair that had both sides but now has exactly one means the
    /// missing side was deleted upstream, so the surviving record is
    /// deleted too. A key entirely absent from the new map is already gone
    /// from both sides. Runs exactly once per pass over the whole baseline.
    async fn apply_deletions(
        &self,
        new_map: &mut PairMap,
        baseline: &Baseline,
        stats: &mut PassStats,
    ) {
        let mut deleted_keys = Vec::new();

        for (key, old_pair) in baseline.iter() {
            if !old_pair.is_matched() {
                continue;
            }
            let Some(new_pair) = new_map.get(key) else {
                continue;
            };
            if !new_pair.is_one_sided() {
                continue;
            }

            if let Some(task) = &new_pair.task {
                let Some(task_ref) = task.task_ref.as_deref() else {
                    continue;
                };
                match self.tasks.delete(task_ref).await {
                    Ok(()) => {
                        info!(key, title = %task.title, "deleted task after upstream event deletion");
                        stats.deleted_tasks += 1;
                        deleted_keys.push(key.clone());
                    }
                    Err(err) => {
                        stats.failed += 1;
                        warn!(key, %err, "task deletion failed");
                    }
                }
            } else if let Some(event) = &new_pair.event {
                let Some(event_ref) = event.event_ref.as_deref() else {
                    continue;
                };
                match self.events.delete(event_ref).await {
                    Ok(()) => {
                        info!(key, title = %event.title, "deleted event after upstream task deletion");
                        stats.deleted_events += 1;
                        deleted_keys.push(key.clone());
                    }
                    Err(err) => {
                        stats.failed += 1;
                        warn!(key, %err, "event deletion failed");
                    }
                }
            }
        }

        for key in deleted_keys {
            new_map.remove(&key);
        }
    }
}

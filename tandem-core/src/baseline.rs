//! Previous-pass state.
//!
//! The baseline holds the pair map produced by the previous pass and is the
//! ground truth for change detection. It lives for the process lifetime
//! only: it starts empty, is replaced wholesale at the end of every pass
//! and is never persisted. The first pass after a start therefore sees
//! every pair as newly appeared; creations are suppressed for that pass so
//! a restart cannot trigger a duplicate-creation storm.

use crate::pair::{Pair, PairMap};

#[derive(Debug)]
pub struct Baseline {
    map: PairMap,
    initial: bool,
}

impl Default for Baseline {
    fn default() -> Self {
        Baseline::new()
    }
}

impl Baseline {
    pub fn new() -> Self {
        Baseline {
            map: PairMap::new(),
            initial: true,
        }
    }

    /// True until the first pass has completed.
    pub fn is_initial(&self) -> bool {
        self.initial
    }

    pub fn get(&self, key: &str) -> Option<&Pair> {
        self.map.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Pair)> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Replace the baseline with the map produced by the pass that just
    /// finished. Called exactly once per pass, after all actions ran.
    pub fn replace(&mut self, map: PairMap) {
        self.map = map;
        self.initial = false;
    }
}

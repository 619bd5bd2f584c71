//! Shared defaults.

/// Days before today (clamped to start-of-day) that the fetch window reaches back.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 1;

/// Days ahead of now that the fetch window reaches.
pub const DEFAULT_LOOKAHEAD_DAYS: i64 = 3;

/// Event length assumed for records that carry no explicit end.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Separator between the event and task halves of a pair key.
pub const PAIR_KEY_SEPARATOR: &str = "::";

/// Default poll interval between reconciliation passes.
pub const DEFAULT_INTERVAL: &str = "5m";

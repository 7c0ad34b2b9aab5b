//! Application-level events surfaced to sinks.

use serde::Serialize;

use crate::clock::Timestamp;

/// Everything noteworthy the monitor does, as data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AppEvent {
    /// Monitor finished initialization.
    Started,
    /// Water level crossed the flood threshold.
    FloodStarted { at: Timestamp, level_cm: f32 },
    /// Water level dropped back below the threshold.
    FloodEnded {
        at: Timestamp,
        level_cm: f32,
        duration_min: u16,
    },
    /// Periodic reminder while the flood persists.
    StillFlooded { level_cm: f32 },
    /// The event log ran out of space; no further records will be kept.
    LogFull,
}

//! Shared mutable context threaded through every FSM handler.
//!
//! `FloodContext` is the single struct state handlers read from and write
//! to: the latest water-level estimate, the wall-clock instant of the
//! current sampling tick, the recorded flood start time, configuration,
//! and a one-slot mailbox for the log entry a transition produces. It
//! replaces the legacy firmware's file-scope globals; the service owns it
//! for the process lifetime.

use crate::clock::{Timestamp, POWER_LOSS_REFERENCE};
use crate::config::MonitorConfig;

// ---------------------------------------------------------------------------
// Pending log entry (written by state handlers; consumed by the service)
// ---------------------------------------------------------------------------

/// A log entry produced by a threshold-crossing edge.
///
/// Handlers only *pend* the entry; the service drains it and writes the
/// record to persistent storage BEFORE any actuator-visible effect of the
/// transition (log-then-flip ordering).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogEntry {
    /// Flood onset.
    Start { at: Timestamp, level_cm: f32 },
    /// Flood cleared.
    End {
        at: Timestamp,
        level_cm: f32,
        duration_min: u16,
    },
}

// ---------------------------------------------------------------------------
// FloodContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FloodContext {
    /// Water level estimated from the latest sample (cm, clamped >= 0).
    /// Updated by the service before each FSM tick.
    pub level_cm: f32,

    /// Wall-clock instant of the current sampling tick.
    pub now: Timestamp,

    /// When the ongoing flood started. `Some` iff the flood is active;
    /// consumed exactly once (to compute the duration) when it clears.
    pub started_at: Option<Timestamp>,

    /// Log entry pended by the most recent transition, if any.
    pub pending_log: Option<LogEntry>,

    /// Monitor configuration (thresholds, intervals).
    pub config: MonitorConfig,
}

impl FloodContext {
    /// Create a new context with the given configuration.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            level_cm: 0.0,
            now: POWER_LOSS_REFERENCE,
            started_at: None,
            pending_log: None,
            config,
        }
    }

    /// True when the measured level satisfies the flood condition.
    /// The threshold is a closed lower bound: exactly 30.0 cm floods.
    pub fn level_is_flooding(&self) -> bool {
        self.level_cm >= self.config.flood_threshold_cm
    }
}

//! State handlers for the flood monitor FSM.
//!
//! Two states, one guard condition. `Idle` means the water level is below
//! the flood threshold; `Active` means it is at or above it. Entry
//! handlers pend the corresponding log entry; update handlers evaluate
//! the guard and request the transition.

use log::info;

use super::context::{FloodContext, LogEntry};
use super::{StateDescriptor, StateId};

/// Build the descriptor table indexed by `StateId`.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        StateDescriptor {
            id: StateId::Idle,
            name: "idle",
            on_enter: Some(idle_enter),
            on_update: idle_update,
        },
        StateDescriptor {
            id: StateId::Active,
            name: "active",
            on_enter: Some(active_enter),
            on_update: active_update,
        },
    ]
}

/// Entering Idle closes out an ongoing flood, if there is one.
///
/// On boot `started_at` is `None` and this is a no-op, so starting the
/// FSM never emits a spurious end record.
fn idle_enter(ctx: &mut FloodContext) {
    if let Some(started) = ctx.started_at.take() {
        let duration_min = ctx.now.minutes_since(&started);
        info!(
            "flood cleared at {}, lasted {} min (level {:.1} cm)",
            ctx.now, duration_min, ctx.level_cm
        );
        ctx.pending_log = Some(LogEntry::End {
            at: ctx.now,
            level_cm: ctx.level_cm,
            duration_min,
        });
    }
}

fn idle_update(ctx: &mut FloodContext) -> Option<StateId> {
    if ctx.level_is_flooding() {
        Some(StateId::Active)
    } else {
        None
    }
}

/// Entering Active records the onset time and pends a start entry.
fn active_enter(ctx: &mut FloodContext) {
    info!(
        "flood detected at {}, level {:.1} cm",
        ctx.now, ctx.level_cm
    );
    ctx.started_at = Some(ctx.now);
    ctx.pending_log = Some(LogEntry::Start {
        at: ctx.now,
        level_cm: ctx.level_cm,
    });
}

fn active_update(ctx: &mut FloodContext) -> Option<StateId> {
    if ctx.level_is_flooding() {
        None
    } else {
        Some(StateId::Idle)
    }
}

//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern:
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │  StateTable                                        │
//! │  ┌────────┬───────────┬──────────────────────┐     │
//! │  │ StateId │ on_enter  │ on_update            │     │
//! │  ├────────┼───────────┼──────────────────────┤     │
//! │  │ Idle    │ fn(ctx)   │ fn(ctx)->Option<Id>  │     │
//! │  │ Active  │ fn(ctx)   │ fn(ctx)->Option<Id>  │     │
//! │  └────────┴───────────┴──────────────────────┘     │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! Each sampling tick the engine calls `on_update` for the **current**
//! state. If it returns `Some(next_id)`, the engine runs `on_enter` for the
//! next state and updates the current pointer. All handlers receive
//! `&mut FloodContext`, which carries the latest sample, wall-clock now,
//! the recorded flood start time, and the pending log entry slot.

pub mod context;
pub mod states;

use context::FloodContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all flood-monitor states.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    /// No flood detected. Initial state, re-entered when a flood clears.
    Idle = 0,
    /// Water level at or above the flood threshold.
    Active = 1,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 2;

    /// Convert a `u8` index back to `StateId`. Panics on out-of-range in
    /// debug builds; returns `Idle` in release (safe fallback).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Active,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Idle
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` actions. These run exactly once per transition.
pub type StateActionFn = fn(&mut FloodContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut FloodContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table (array of [`StateDescriptor`]) and is driven once
/// per sampling tick with a mutable [`FloodContext`].
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FloodContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one sampling tick.
    ///
    /// 1. Call `on_update` for the current state.
    /// 2. If it returns `Some(next)`, update the pointer and run
    ///    `on_enter(next)`.
    pub fn tick(&mut self, ctx: &mut FloodContext) {
        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut FloodContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::context::{FloodContext, LogEntry};
    use super::*;
    use crate::clock::Timestamp;
    use crate::config::MonitorConfig;

    fn ts(hour: u8, minute: u8, second: u8) -> Timestamp {
        Timestamp {
            year: 2025,
            month: 6,
            day: 6,
            hour,
            minute,
            second,
        }
    }

    fn make_ctx() -> FloodContext {
        FloodContext::new(MonitorConfig::default())
    }

    fn make_fsm() -> Fsm {
        Fsm::new(states::build_state_table(), StateId::Idle)
    }

    fn feed(fsm: &mut Fsm, ctx: &mut FloodContext, level: f32, now: Timestamp) {
        ctx.level_cm = level;
        ctx.now = now;
        fsm.tick(ctx);
    }

    #[test]
    fn starts_in_idle() {
        let fsm = make_fsm();
        assert_eq!(fsm.current_state(), StateId::Idle);
    }

    #[test]
    fn boot_enter_emits_no_record() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        assert!(ctx.pending_log.is_none());
        assert!(ctx.started_at.is_none());
    }

    #[test]
    fn idle_stays_below_threshold() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);

        feed(&mut fsm, &mut ctx, 29.9, ts(10, 0, 0));
        assert_eq!(fsm.current_state(), StateId::Idle);
        assert!(ctx.pending_log.is_none());
    }

    #[test]
    fn threshold_is_a_closed_lower_bound() {
        // Exactly 30.0 cm triggers; the threshold is inclusive.
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);

        feed(&mut fsm, &mut ctx, 30.0, ts(10, 0, 0));
        assert_eq!(fsm.current_state(), StateId::Active);
    }

    #[test]
    fn activation_records_start_time_and_pends_a_start_entry() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);

        feed(&mut fsm, &mut ctx, 42.7, ts(21, 25, 20));
        assert_eq!(fsm.current_state(), StateId::Active);
        assert_eq!(ctx.started_at, Some(ts(21, 25, 20)));
        match ctx.pending_log.take() {
            Some(LogEntry::Start { at, level_cm }) => {
                assert_eq!(at, ts(21, 25, 20));
                assert!((level_cm - 42.7).abs() < 0.001);
            }
            other => panic!("expected Start entry, got {other:?}"),
        }
    }

    #[test]
    fn staying_flooded_never_re_emits() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);

        feed(&mut fsm, &mut ctx, 50.0, ts(10, 0, 0));
        ctx.pending_log.take();

        for i in 0..5 {
            feed(&mut fsm, &mut ctx, 45.0, ts(10, i + 1, 0));
            assert_eq!(fsm.current_state(), StateId::Active);
            assert!(ctx.pending_log.is_none());
        }
    }

    #[test]
    fn clearing_consumes_start_time_and_pends_an_end_entry() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);

        feed(&mut fsm, &mut ctx, 35.0, ts(21, 25, 20));
        ctx.pending_log.take();

        // 125 s later the water recedes: duration floors to 2 minutes.
        feed(&mut fsm, &mut ctx, 10.0, ts(21, 27, 25));
        assert_eq!(fsm.current_state(), StateId::Idle);
        assert!(ctx.started_at.is_none(), "start time must be consumed");
        match ctx.pending_log.take() {
            Some(LogEntry::End {
                at,
                level_cm,
                duration_min,
            }) => {
                assert_eq!(at, ts(21, 27, 25));
                assert!((level_cm - 10.0).abs() < 0.001);
                assert_eq!(duration_min, 2);
            }
            other => panic!("expected End entry, got {other:?}"),
        }
    }

    #[test]
    fn exact_threshold_oscillation_toggles_every_tick() {
        // Documented behavior: no hysteresis band, so a level pinned at
        // exactly 30.0 cm alternating with 29.99 logs a pair per cycle.
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);

        for i in 0..4 {
            feed(&mut fsm, &mut ctx, 30.0, ts(10, i, 0));
            assert_eq!(fsm.current_state(), StateId::Active);
            assert!(matches!(ctx.pending_log.take(), Some(LogEntry::Start { .. })));

            feed(&mut fsm, &mut ctx, 29.99, ts(10, i, 30));
            assert_eq!(fsm.current_state(), StateId::Idle);
            assert!(matches!(ctx.pending_log.take(), Some(LogEntry::End { .. })));
        }
    }
}

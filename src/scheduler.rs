//! Cooperative single-thread scheduler.
//!
//! The main loop calls [`Scheduler::tick`] as fast as it can; the
//! scheduler decides what is due and calls back into the delegate. No
//! sleeping, no threads. Timers compare wrapping millisecond counters
//! with `wrapping_sub`, so a counter rollover is just another elapsed
//! interval.

use crate::config::MonitorConfig;

/// A periodic timer over a wrapping `u32` millisecond clock.
pub struct IntervalTimer {
    interval_ms: u32,
    last_fired: u32,
}

impl IntervalTimer {
    pub fn new(interval_ms: u32, now_ms: u32) -> Self {
        Self {
            interval_ms,
            last_fired: now_ms,
        }
    }

    /// True when a full interval has elapsed since the last firing.
    /// Firing re-anchors at `now_ms`, so late polls do not backlog.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_fired) >= self.interval_ms {
            self.last_fired = now_ms;
            true
        } else {
            false
        }
    }
}

/// Work the scheduler dispatches each pass of the main loop.
pub trait LoopDelegate {
    /// A sampling interval elapsed; take a measurement.
    fn sample_due(&mut self, now_ms: u32);

    /// Called every pass; advance the alert cadence.
    fn alert_due(&mut self, now_ms: u32);
}

/// Drives the delegate from a single busy loop.
pub struct Scheduler {
    sample: IntervalTimer,
}

impl Scheduler {
    pub fn new(config: &MonitorConfig, now_ms: u32) -> Self {
        Self {
            sample: IntervalTimer::new(config.sampling_interval_ms, now_ms),
        }
    }

    /// One cooperative pass. Sampling runs before the alert update so a
    /// fresh threshold crossing is reflected in the same pass's outputs.
    pub fn tick<D: LoopDelegate>(&mut self, now_ms: u32, delegate: &mut D) {
        if self.sample.poll(now_ms) {
            delegate.sample_due(now_ms);
        }
        delegate.alert_due(now_ms);
    }
}

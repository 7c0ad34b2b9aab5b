//! Ports: the traits the application core talks to hardware through.
//!
//! Adapters and drivers implement these against real peripherals; tests
//! implement them against in-memory fakes. The core never names a chip.

use crate::alert::AlertOutput;
use crate::app::events::AppEvent;
use crate::clock::Timestamp;
use crate::error::{ClockError, SensorError, StorageError};

/// Battery-backed wall clock.
pub trait ClockPort {
    fn now(&mut self) -> Result<Timestamp, ClockError>;

    /// True when the clock lost power since it was last set and its
    /// time can no longer be trusted.
    fn lost_power(&mut self) -> Result<bool, ClockError>;

    fn set(&mut self, at: &Timestamp) -> Result<(), ClockError>;
}

/// Byte-addressed persistent storage for the event log.
pub trait StoragePort {
    /// Usable size in bytes.
    fn capacity(&self) -> usize;

    fn write_byte(&mut self, address: u16, value: u8) -> Result<(), StorageError>;
}

/// Distance-ranging sensor pointed at the water surface.
pub trait RangeSensorPort {
    /// Measured distance in cm.
    fn measure(&mut self) -> Result<f32, SensorError>;
}

/// LED and buzzer outputs.
pub trait AlertPort {
    fn apply(&mut self, output: AlertOutput) -> Result<(), SensorError>;
}

/// Monotonic uptime source.
pub trait MonotonicPort {
    fn uptime_us(&mut self) -> u64;

    /// Uptime truncated to a wrapping millisecond counter, the unit all
    /// loop timers work in.
    fn uptime_ms(&mut self) -> u32 {
        (self.uptime_us() / 1_000) as u32
    }
}

/// Consumer of application-level events (console, telemetry, tests).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

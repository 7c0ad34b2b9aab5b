//! Monotonic uptime source, one per build flavor.

use crate::app::ports::MonotonicPort;

/// Microsecond uptime backed by the ESP high-resolution timer.
#[cfg(feature = "espidf")]
#[derive(Clone, Copy, Default)]
pub struct Uptime;

#[cfg(feature = "espidf")]
impl Uptime {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "espidf")]
impl MonotonicPort for Uptime {
    fn uptime_us(&mut self) -> u64 {
        // Monotonic since boot, 64-bit, never negative.
        unsafe { esp_idf_sys::esp_timer_get_time() as u64 }
    }
}

/// Host stand-in measured from construction.
#[cfg(not(feature = "espidf"))]
#[derive(Clone)]
pub struct Uptime {
    origin: std::time::Instant,
}

#[cfg(not(feature = "espidf"))]
impl Uptime {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(feature = "espidf"))]
impl Default for Uptime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(feature = "espidf"))]
impl MonotonicPort for Uptime {
    fn uptime_us(&mut self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }
}

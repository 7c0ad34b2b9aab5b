//! Error types for the floodwatch firmware.
//!
//! One small enum per subsystem, matching the port boundaries. All
//! variants are `Copy` so they pass through the service and FSM without
//! allocation; `main` wraps them in `anyhow` at the very top.

use core::fmt;

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// No echo within the measurement timeout window (30 ms).
    /// Legacy policy collapses this to distance 0 at the service boundary,
    /// which the estimator turns into a maximal water level.
    EchoTimeout,
    /// GPIO read returned an error.
    GpioReadFailed,
    /// GPIO write returned an error.
    GpioWriteFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EchoTimeout => write!(f, "echo timeout"),
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Clock errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// The RTC did not respond on the bus. Fatal at boot: the system halts.
    NotFound,
    /// An I2C transfer to the RTC failed after it had been detected.
    BusError,
    /// The requested time falls outside the RTC's representable range.
    InvalidTime,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "RTC not found"),
            Self::BusError => write!(f, "RTC bus error"),
            Self::InvalidTime => write!(f, "time out of RTC range"),
        }
    }
}

// ---------------------------------------------------------------------------
// Storage errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The next record would run past the end of the storage array.
    /// The log writer latches this and stops appending permanently.
    Full,
    /// A byte write to the storage device failed.
    WriteFailed,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "event log full"),
            Self::WriteFailed => write!(f, "byte write failed"),
        }
    }
}

// std::error::Error impls let `anyhow` and `?` pick these up in `main`.
impl core::error::Error for SensorError {}
impl core::error::Error for ClockError {}
impl core::error::Error for StorageError {}

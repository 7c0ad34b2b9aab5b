//! Floodwatch firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. ESP-IDF-specific code is guarded by the `espidf` feature
//! within each module; the firmware entry point in `main.rs` only builds
//! with that feature enabled.

#![deny(unused_must_use)]

pub mod alert;
pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod eventlog;
pub mod fsm;
pub mod scheduler;

pub mod pins;

pub mod adapters;
pub mod drivers;
pub mod sensors;

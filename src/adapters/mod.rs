//! Adapters: concrete implementations of the application ports.

pub mod console;
pub mod rtc_module;
pub mod uptime;

pub use console::ConsoleSink;
pub use rtc_module::RtcModule;
pub use uptime::Uptime;

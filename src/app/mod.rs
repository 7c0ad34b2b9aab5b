//! Application layer: ports, events and the monitor service.

pub mod events;
pub mod ports;
pub mod service;

pub use events::AppEvent;
pub use service::MonitorService;

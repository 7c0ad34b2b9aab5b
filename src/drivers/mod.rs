//! GPIO output drivers.

pub mod alert_outputs;

pub use alert_outputs::AlertOutputs;

//! Water-level sensing: the ultrasonic driver and the level formula.

pub mod level;
pub mod ultrasonic;

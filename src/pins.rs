//! GPIO / peripheral pin assignments for the floodwatch board.
//!
//! Single source of truth — the wiring in `main.rs` follows this module.
//! Change a pin here and update the matching `peripherals.pins.gpioN`
//! binding in `main.rs`.

// ---------------------------------------------------------------------------
// HC-SR04 ultrasonic distance sensor
// ---------------------------------------------------------------------------

/// Digital output: 10 us trigger pulse.
pub const TRIG_GPIO: i32 = 9;
/// Digital input: echo pulse, HIGH for the round-trip duration.
pub const ECHO_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// Alert outputs
// ---------------------------------------------------------------------------

/// Digital output: flood alert LED (active HIGH).
pub const LED_GPIO: i32 = 11;
/// Digital output: piezo buzzer (active HIGH).
pub const BUZZER_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// I2C bus — DS3231 RTC breakout (carries the AT24C32 log EEPROM)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;

/// I2C bus frequency. The DS3231 and AT24C32 are both happy at 100 kHz.
pub const I2C_FREQ_HZ: u32 = 100_000;

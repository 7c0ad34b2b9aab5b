//! System configuration parameters
//!
//! All tunable parameters for the flood monitor. The firmware ships with
//! the fixed values below; the struct exists so tests and bench rigs can
//! override individual fields without touching code.

use serde::{Deserialize, Serialize};

/// Core monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Level estimation ---
    /// Sensor mount height above the floor/riverbed (cm)
    pub sensor_height_cm: f32,
    /// Water level at or above which a flood is considered active (cm)
    pub flood_threshold_cm: f32,

    // --- Distance sampling ---
    /// Time between full sampling cycles (milliseconds)
    pub sampling_interval_ms: u32,
    /// Echo timeout for a single ultrasonic measurement (microseconds)
    pub echo_timeout_us: u32,

    // --- Alerting ---
    /// LED toggle interval while flooded (milliseconds)
    pub blink_interval_ms: u32,
    /// Buzzer on-duration per pulse (milliseconds)
    pub buzzer_on_ms: u32,
    /// Buzzer pulse repeat period, measured on-time to on-time (milliseconds)
    pub buzzer_repeat_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            // Level estimation
            sensor_height_cm: 100.0,
            flood_threshold_cm: 30.0,

            // Sampling
            sampling_interval_ms: 10_000, // one cycle per 10 s
            echo_timeout_us: 30_000,      // HC-SR04 no-echo bound

            // Alerting
            blink_interval_ms: 500,
            buzzer_on_ms: 5_000,
            buzzer_repeat_ms: 15_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = MonitorConfig::default();
        assert!(c.sensor_height_cm > 0.0);
        assert!(c.flood_threshold_cm > 0.0);
        assert!(c.flood_threshold_cm < c.sensor_height_cm);
        assert!(c.sampling_interval_ms > 0);
        assert!(c.echo_timeout_us > 0);
        assert!(c.blink_interval_ms > 0);
    }

    #[test]
    fn alert_timing_ratios_make_sense() {
        let c = MonitorConfig::default();
        assert!(
            c.buzzer_on_ms < c.buzzer_repeat_ms,
            "buzzer duty must be shorter than its repeat period"
        );
        assert!(
            c.blink_interval_ms < c.sampling_interval_ms,
            "LED cadence must be finer than the sampling interval"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let c = MonitorConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: MonitorConfig = serde_json::from_str(&json).unwrap();
        assert!((c.sensor_height_cm - c2.sensor_height_cm).abs() < 0.001);
        assert!((c.flood_threshold_cm - c2.flood_threshold_cm).abs() < 0.001);
        assert_eq!(c.sampling_interval_ms, c2.sampling_interval_ms);
    }

    #[test]
    fn postcard_roundtrip() {
        let c = MonitorConfig::default();
        let bytes = postcard::to_allocvec(&c).unwrap();
        let c2: MonitorConfig = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(c.buzzer_repeat_ms, c2.buzzer_repeat_ms);
        assert!((c.flood_threshold_cm - c2.flood_threshold_cm).abs() < 0.001);
    }
}

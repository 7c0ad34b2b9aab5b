//! Alert cadence engine: LED blink and buzzer duty cycle while flooded.
//!
//! Pure timer arithmetic over a monotonic millisecond counter. All
//! comparisons use `wrapping_sub`, so the cadence survives the counter
//! rolling over. Hardware pins are driven elsewhere from the
//! [`AlertOutput`] this engine returns.

use crate::config::MonitorConfig;

/// Desired actuator levels for the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlertOutput {
    pub led_on: bool,
    pub buzzer_on: bool,
}

impl AlertOutput {
    pub const OFF: Self = Self {
        led_on: false,
        buzzer_on: false,
    };
}

/// Tracks blink and buzzer phase against a wrapping millisecond clock.
pub struct AlertEngine {
    blink_interval_ms: u32,
    buzzer_on_ms: u32,
    buzzer_repeat_ms: u32,
    led_on: bool,
    buzzer_on: bool,
    /// Last LED toggle instant.
    led_ref: u32,
    /// Last buzzer switch-on instant. The repeat period is measured
    /// on-time to on-time, so switching the buzzer off keeps this ref.
    buzzer_ref: u32,
}

impl AlertEngine {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            blink_interval_ms: config.blink_interval_ms,
            buzzer_on_ms: config.buzzer_on_ms,
            buzzer_repeat_ms: config.buzzer_repeat_ms,
            led_on: false,
            buzzer_on: false,
            led_ref: 0,
            buzzer_ref: 0,
        }
    }

    /// Re-phase the cadence at flood onset.
    ///
    /// The LED comes on at once and the buzzer ref is backdated a full
    /// repeat period, so the very next [`tick`](Self::tick) sounds the
    /// buzzer immediately instead of waiting out the first period.
    pub fn arm(&mut self, now_ms: u32) {
        self.led_on = true;
        self.led_ref = now_ms;
        self.buzzer_on = false;
        self.buzzer_ref = now_ms.wrapping_sub(self.buzzer_repeat_ms);
    }

    /// Advance the cadence to `now_ms` and return the desired levels.
    ///
    /// While the flood is inactive this forces both outputs off and
    /// resets the phase refs, so the output is idempotent off.
    pub fn tick(&mut self, now_ms: u32, flood_active: bool) -> AlertOutput {
        if !flood_active {
            self.led_on = false;
            self.buzzer_on = false;
            self.led_ref = now_ms;
            self.buzzer_ref = now_ms;
            return AlertOutput::OFF;
        }

        if now_ms.wrapping_sub(self.led_ref) >= self.blink_interval_ms {
            self.led_on = !self.led_on;
            self.led_ref = now_ms;
        }

        if self.buzzer_on {
            if now_ms.wrapping_sub(self.buzzer_ref) >= self.buzzer_on_ms {
                self.buzzer_on = false;
            }
        } else if now_ms.wrapping_sub(self.buzzer_ref) >= self.buzzer_repeat_ms {
            self.buzzer_on = true;
            self.buzzer_ref = now_ms;
        }

        AlertOutput {
            led_on: self.led_on,
            buzzer_on: self.buzzer_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> AlertEngine {
        AlertEngine::new(&MonitorConfig::default())
    }

    #[test]
    fn inactive_output_stays_off() {
        let mut eng = engine();
        for t in (0..60_000).step_by(100) {
            assert_eq!(eng.tick(t, false), AlertOutput::OFF);
        }
    }

    #[test]
    fn buzzer_fires_immediately_on_arm() {
        let mut eng = engine();
        eng.arm(1_000);
        let out = eng.tick(1_000, true);
        assert!(out.buzzer_on);
        assert!(out.led_on);
    }

    #[test]
    fn buzzer_cadence_is_5s_on_15s_period() {
        let mut eng = engine();
        eng.arm(0);
        let mut transitions = Vec::new();
        let mut last = false;
        for t in (0..=40_000).step_by(10) {
            let out = eng.tick(t, true);
            if out.buzzer_on != last {
                transitions.push((t, out.buzzer_on));
                last = out.buzzer_on;
            }
        }
        assert_eq!(
            transitions,
            vec![
                (0, true),
                (5_000, false),
                (15_000, true),
                (20_000, false),
                (30_000, true),
                (35_000, false),
            ]
        );
    }

    #[test]
    fn led_toggles_every_500ms() {
        let mut eng = engine();
        eng.arm(0);
        assert!(eng.tick(0, true).led_on);
        assert!(eng.tick(499, true).led_on);
        assert!(!eng.tick(500, true).led_on);
        assert!(eng.tick(1_000, true).led_on);
        assert!(!eng.tick(1_500, true).led_on);
    }

    #[test]
    fn deactivation_forces_both_outputs_off() {
        let mut eng = engine();
        eng.arm(0);
        assert!(eng.tick(0, true).buzzer_on);
        assert_eq!(eng.tick(100, false), AlertOutput::OFF);
        assert_eq!(eng.tick(200, false), AlertOutput::OFF);
    }

    #[test]
    fn cadence_survives_counter_wraparound() {
        let mut eng = engine();
        let start = u32::MAX - 2_000;
        eng.arm(start);
        assert!(eng.tick(start, true).buzzer_on);
        // 5 s after arming the counter has wrapped past zero.
        let out = eng.tick(start.wrapping_add(5_000), true);
        assert!(!out.buzzer_on);
        let out = eng.tick(start.wrapping_add(15_000), true);
        assert!(out.buzzer_on);
    }

    #[test]
    fn rearming_restarts_the_phase() {
        let mut eng = engine();
        eng.arm(0);
        eng.tick(0, true);
        eng.tick(6_000, true);
        eng.tick(7_000, false);
        eng.arm(100_000);
        assert!(eng.tick(100_000, true).buzzer_on);
    }
}

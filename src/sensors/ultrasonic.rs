//! HC-SR04 style ultrasonic ranging driver.
//!
//! Generic over `embedded-hal` pins and delay plus a monotonic clock,
//! so the pulse timing logic is host-testable with fakes. The driver
//! fires a 10 us trigger pulse, times the echo pulse width and converts
//! it to a one-way distance.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{MonotonicPort, RangeSensorPort};
use crate::config::MonitorConfig;
use crate::error::SensorError;

/// Speed of sound at room temperature, in cm per microsecond.
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.034;

pub struct Ultrasonic<TRIG, ECHO, D, C> {
    trig: TRIG,
    echo: ECHO,
    delay: D,
    clock: C,
    timeout_us: u32,
}

impl<TRIG, ECHO, D, C> Ultrasonic<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: MonotonicPort,
{
    pub fn new(trig: TRIG, echo: ECHO, delay: D, clock: C, config: &MonitorConfig) -> Self {
        Self {
            trig,
            echo,
            delay,
            clock,
            timeout_us: config.echo_timeout_us,
        }
    }

    /// Busy-wait until the echo pin reaches `target`, returning the
    /// uptime at which it did. Gives up after the configured timeout.
    fn wait_for_level(&mut self, target: bool) -> Result<u64, SensorError> {
        let start = self.clock.uptime_us();
        loop {
            let high = self
                .echo
                .is_high()
                .map_err(|_| SensorError::GpioReadFailed)?;
            if high == target {
                return Ok(self.clock.uptime_us());
            }
            if self.clock.uptime_us().saturating_sub(start) >= u64::from(self.timeout_us) {
                return Err(SensorError::EchoTimeout);
            }
        }
    }
}

impl<TRIG, ECHO, D, C> RangeSensorPort for Ultrasonic<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: MonotonicPort,
{
    fn measure(&mut self) -> Result<f32, SensorError> {
        // Settle, then a 10 us trigger pulse.
        self.trig
            .set_low()
            .map_err(|_| SensorError::GpioWriteFailed)?;
        self.delay.delay_us(2);
        self.trig
            .set_high()
            .map_err(|_| SensorError::GpioWriteFailed)?;
        self.delay.delay_us(10);
        self.trig
            .set_low()
            .map_err(|_| SensorError::GpioWriteFailed)?;

        let rise = self.wait_for_level(true)?;
        let fall = self.wait_for_level(false)?;

        // Round trip time halves into a one-way distance.
        let pulse_us = fall.saturating_sub(rise) as f32;
        Ok(pulse_us * SPEED_OF_SOUND_CM_PER_US / 2.0)
    }
}

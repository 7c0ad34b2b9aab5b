//! LED and buzzer pin driver.

use embedded_hal::digital::OutputPin;

use crate::alert::AlertOutput;
use crate::app::ports::AlertPort;
use crate::error::SensorError;

/// Drives the two alert pins from an [`AlertOutput`]. Levels are
/// applied unconditionally; the pins are cheap and idempotent.
pub struct AlertOutputs<LED, BUZ> {
    led: LED,
    buzzer: BUZ,
}

impl<LED: OutputPin, BUZ: OutputPin> AlertOutputs<LED, BUZ> {
    pub fn new(led: LED, buzzer: BUZ) -> Self {
        Self { led, buzzer }
    }
}

impl<LED: OutputPin, BUZ: OutputPin> AlertPort for AlertOutputs<LED, BUZ> {
    fn apply(&mut self, output: AlertOutput) -> Result<(), SensorError> {
        set(&mut self.led, output.led_on)?;
        set(&mut self.buzzer, output.buzzer_on)
    }
}

fn set<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), SensorError> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| SensorError::GpioWriteFailed)
}

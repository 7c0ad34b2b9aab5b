//! Floodwatch firmware entry point.
//!
//! Single cooperative loop, no threads. Hardware is wired up once,
//! wrapped in the port adapters, and handed to the scheduler; from
//! then on everything happens inside [`LoopDelegate`] callbacks.

use anyhow::{anyhow, Result};
use log::{error, info, warn};

use esp_idf_hal::delay::Delay;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;

use floodwatch::adapters::{ConsoleSink, RtcModule, Uptime};
use floodwatch::app::ports::{
    AlertPort, ClockPort, EventSink, MonotonicPort, RangeSensorPort, StoragePort,
};
use floodwatch::app::MonitorService;
use floodwatch::clock::POWER_LOSS_REFERENCE;
use floodwatch::config::MonitorConfig;
use floodwatch::drivers::AlertOutputs;
use floodwatch::pins;
use floodwatch::scheduler::{LoopDelegate, Scheduler};
use floodwatch::sensors::ultrasonic::Ultrasonic;

/// Everything the loop touches, behind the ports.
struct Rig<SEN, RTC, ALR, SNK> {
    service: MonitorService,
    sensor: SEN,
    rtc: RTC,
    alert: ALR,
    sink: SNK,
}

impl<SEN, RTC, ALR, SNK> LoopDelegate for Rig<SEN, RTC, ALR, SNK>
where
    SEN: RangeSensorPort,
    RTC: ClockPort + StoragePort,
    ALR: AlertPort,
    SNK: EventSink,
{
    fn sample_due(&mut self, now_ms: u32) {
        let now = match self.rtc.now() {
            Ok(t) => t,
            Err(e) => {
                warn!("RTC read failed ({e}), skipping sample");
                return;
            }
        };
        let distance = self.sensor.measure();
        self.service
            .process_sample(distance, now, now_ms, &mut self.rtc, &mut self.sink);
    }

    fn alert_due(&mut self, now_ms: u32) {
        let output = self.service.alert_tick(now_ms);
        if let Err(e) = self.alert.apply(output) {
            warn!("alert pin write failed: {e}");
        }
    }
}

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("floodwatch v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "pins: trig={} echo={} led={} buzzer={} sda={} scl={}",
        pins::TRIG_GPIO,
        pins::ECHO_GPIO,
        pins::LED_GPIO,
        pins::BUZZER_GPIO,
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO,
    );

    let peripherals = Peripherals::take().map_err(|e| anyhow!("peripherals: {e}"))?;

    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio14,
        peripherals.pins.gpio15,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ)),
    )?;
    let mut rtc = RtcModule::new(i2c, Delay::new_default());

    // Without a trusted clock the event log would be garbage.
    if rtc.probe().is_err() {
        error!("RTC not found on I2C bus, halting");
        #[allow(clippy::empty_loop)]
        loop {}
    }
    match rtc.lost_power() {
        Ok(true) => {
            warn!(
                "RTC lost power, resetting clock to {}",
                POWER_LOSS_REFERENCE
            );
            if let Err(e) = rtc.set(&POWER_LOSS_REFERENCE) {
                warn!("RTC reset failed: {e}");
            }
        }
        Ok(false) => {}
        Err(e) => warn!("RTC status read failed: {e}"),
    }

    let config = MonitorConfig::default();
    let mut uptime = Uptime::new();

    let mut sensor = Ultrasonic::new(
        PinDriver::output(peripherals.pins.gpio9)?,
        PinDriver::input(peripherals.pins.gpio10)?,
        Delay::new_default(),
        Uptime::new(),
        &config,
    );
    let alert = AlertOutputs::new(
        PinDriver::output(peripherals.pins.gpio11)?,
        PinDriver::output(peripherals.pins.gpio12)?,
    );
    let mut sink = ConsoleSink;

    // Boot sample runs through the normal edge logic, so a tank that
    // is already flooded at power-on is logged right away.
    let mut service = MonitorService::new(config.clone());
    let boot_ms = uptime.uptime_ms();
    let boot_now = rtc.now().map_err(|e| anyhow!("RTC read: {e}"))?;
    let boot_distance = sensor.measure();
    service.start(boot_distance, boot_now, boot_ms, &mut rtc, &mut sink);

    let mut scheduler = Scheduler::new(&config, boot_ms);
    let mut rig = Rig {
        service,
        sensor,
        rtc,
        alert,
        sink,
    };

    info!("entering monitor loop");
    loop {
        let now_ms = uptime.uptime_ms();
        scheduler.tick(now_ms, &mut rig);
    }
}

//! Application core: wires samples, the FSM, the log and the alert
//! cadence together behind the ports.
//!
//! The service is pure with respect to hardware. Callers hand it the
//! measured distance, the wall-clock instant and the uptime counter;
//! it hands back nothing but events through the sink and alert levels
//! through [`alert_tick`](MonitorService::alert_tick).

use log::warn;

use crate::alert::{AlertEngine, AlertOutput};
use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, StoragePort};
use crate::clock::Timestamp;
use crate::config::MonitorConfig;
use crate::error::SensorError;
use crate::eventlog::{EventLogWriter, LogRecord};
use crate::fsm::context::{FloodContext, LogEntry};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::sensors::level::level_from_distance;

pub struct MonitorService {
    fsm: Fsm,
    ctx: FloodContext,
    log: EventLogWriter,
    alert: AlertEngine,
    log_full_reported: bool,
}

impl MonitorService {
    pub fn new(config: MonitorConfig) -> Self {
        let alert = AlertEngine::new(&config);
        Self {
            fsm: Fsm::new(build_state_table(), StateId::Idle),
            ctx: FloodContext::new(config),
            log: EventLogWriter::new(),
            alert,
            log_full_reported: false,
        }
    }

    /// Run the boot sequence: announce the monitor and evaluate the
    /// first sample. A tank already flooded at power-on takes the
    /// normal Idle -> Active edge here and gets its start record.
    pub fn start<S: StoragePort, K: EventSink>(
        &mut self,
        distance: Result<f32, SensorError>,
        now: Timestamp,
        now_ms: u32,
        storage: &mut S,
        sink: &mut K,
    ) {
        sink.emit(&AppEvent::Started);
        self.fsm.start(&mut self.ctx);
        self.process_sample(distance, now, now_ms, storage, sink);
    }

    /// Evaluate one distance sample.
    ///
    /// An echo timeout reads as distance zero, which the level formula
    /// turns into a full tank. The legacy sensor wiring cannot tell
    /// "no echo" from "surface at the transducer", so the monitor errs
    /// toward alarming; the warning log is the only trace.
    pub fn process_sample<S: StoragePort, K: EventSink>(
        &mut self,
        distance: Result<f32, SensorError>,
        now: Timestamp,
        now_ms: u32,
        storage: &mut S,
        sink: &mut K,
    ) {
        let distance_cm = match distance {
            Ok(d) => d,
            Err(SensorError::EchoTimeout) => {
                warn!("echo timeout, treating distance as 0 cm");
                0.0
            }
            Err(err) => {
                warn!("sensor read failed ({err}), skipping sample");
                return;
            }
        };

        self.ctx.level_cm = level_from_distance(distance_cm, self.ctx.config.sensor_height_cm);
        self.ctx.now = now;
        self.fsm.tick(&mut self.ctx);

        if let Some(entry) = self.ctx.pending_log.take() {
            self.write_record(entry, storage, sink);
            match entry {
                LogEntry::Start { at, level_cm } => {
                    self.alert.arm(now_ms);
                    sink.emit(&AppEvent::FloodStarted { at, level_cm });
                }
                LogEntry::End {
                    at,
                    level_cm,
                    duration_min,
                } => {
                    sink.emit(&AppEvent::FloodEnded {
                        at,
                        level_cm,
                        duration_min,
                    });
                }
            }
        } else if self.flood_active() {
            sink.emit(&AppEvent::StillFlooded {
                level_cm: self.ctx.level_cm,
            });
        }
    }

    /// Advance the alert cadence to `now_ms`.
    pub fn alert_tick(&mut self, now_ms: u32) -> AlertOutput {
        self.alert.tick(now_ms, self.flood_active())
    }

    pub fn flood_active(&self) -> bool {
        self.fsm.current_state() == StateId::Active
    }

    /// Persist a transition record before any of its visible effects.
    /// A full log is reported once and the monitor keeps running.
    fn write_record<S: StoragePort, K: EventSink>(
        &mut self,
        entry: LogEntry,
        storage: &mut S,
        sink: &mut K,
    ) {
        let record = LogRecord::from(entry);
        match self.log.append(storage, &record) {
            Ok(()) => {}
            Err(crate::error::StorageError::Full) => {
                if !self.log_full_reported {
                    self.log_full_reported = true;
                    warn!("event log full after {} bytes", self.log.bytes_used());
                    sink.emit(&AppEvent::LogFull);
                }
            }
            Err(err) => {
                warn!("event log write failed: {err}");
            }
        }
    }
}

//! Console event sink: renders application events as log lines.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Emits every event through the `log` facade; on target that is the
/// serial console, on the host whatever logger the test sets up.
#[derive(Default)]
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("flood monitor started"),
            AppEvent::FloodStarted { at, level_cm } => {
                warn!("FLOOD at {at}, level {level_cm:.1} cm")
            }
            AppEvent::FloodEnded {
                at,
                level_cm,
                duration_min,
            } => {
                info!("flood over at {at}, level {level_cm:.1} cm, lasted {duration_min} min")
            }
            AppEvent::StillFlooded { level_cm } => {
                warn!("still flooded, level={level_cm:.1} cm")
            }
            AppEvent::LogFull => warn!("event log is full, history disabled"),
        }
    }
}

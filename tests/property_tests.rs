//! Property tests for the pure arithmetic at the core of the monitor.

#![cfg(not(target_os = "espidf"))]

use proptest::prelude::*;

use floodwatch::alert::AlertEngine;
use floodwatch::clock::Timestamp;
use floodwatch::config::MonitorConfig;
use floodwatch::eventlog::{LogRecord, END_LEN, START_LEN};
use floodwatch::scheduler::IntervalTimer;
use floodwatch::sensors::level::level_from_distance;

fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
    (2000u16..2200, 1u8..=12, 1u8..=28, 0u8..24, 0u8..60, 0u8..60).prop_map(
        |(year, month, day, hour, minute, second)| Timestamp {
            year,
            month,
            day,
            hour,
            minute,
            second,
        },
    )
}

proptest! {
    #[test]
    fn level_is_bounded(distance in 0.0f32..1000.0, height in 1.0f32..500.0) {
        let level = level_from_distance(distance, height);
        prop_assert!(level >= 0.0);
        prop_assert!(level <= height);
    }

    #[test]
    fn record_widths_are_fixed(at in arb_timestamp(), level in -100.0f32..1000.0, duration in any::<u16>()) {
        let start = LogRecord::Start { at, level_cm: level };
        prop_assert_eq!(start.encode().len(), START_LEN);
        let end = LogRecord::End { at, level_cm: level, duration_min: duration };
        let bytes = end.encode();
        prop_assert_eq!(bytes.len(), END_LEN);
        // The end record is the start header plus the duration.
        let start_bytes = start.encode();
        prop_assert_eq!(&bytes[..START_LEN], start_bytes.as_slice());
        prop_assert_eq!(u16::from_be_bytes([bytes[7], bytes[8]]), duration);
    }

    #[test]
    fn duration_between_instants_is_never_negative(a in arb_timestamp(), b in arb_timestamp()) {
        let minutes = b.minutes_since(&a);
        if b.epoch_secs() >= a.epoch_secs() {
            prop_assert_eq!(
                u32::from(minutes),
                (((b.epoch_secs() - a.epoch_secs()) / 60) as u64).min(u64::from(u16::MAX)) as u32
            );
        } else {
            prop_assert_eq!(minutes, 0);
        }
    }

    #[test]
    fn interval_timer_fires_exactly_at_the_boundary(start in any::<u32>(), interval in 1u32..1_000_000) {
        let mut timer = IntervalTimer::new(interval, start);
        prop_assert!(!timer.poll(start.wrapping_add(interval - 1)));
        prop_assert!(timer.poll(start.wrapping_add(interval)));
    }

    #[test]
    fn armed_buzzer_sounds_immediately(arm_at in any::<u32>()) {
        let mut engine = AlertEngine::new(&MonitorConfig::default());
        engine.arm(arm_at);
        let out = engine.tick(arm_at, true);
        prop_assert!(out.buzzer_on);
        prop_assert!(out.led_on);
    }

    #[test]
    fn inactive_engine_is_silent(t in any::<u32>()) {
        let mut engine = AlertEngine::new(&MonitorConfig::default());
        let out = engine.tick(t, false);
        prop_assert!(!out.led_on);
        prop_assert!(!out.buzzer_on);
    }
}

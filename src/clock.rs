//! Wall-clock timestamps and calendar arithmetic.
//!
//! [`Timestamp`] is the broken-down civil time read from the external RTC.
//! It is immutable once read; flood durations are computed by converting
//! two timestamps to epoch seconds (days-from-civil algorithm) and
//! subtracting.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A wall-clock instant from the RTC. Immutable once read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Known-good reference time applied once at boot when the RTC reports a
/// power loss. Stands in for the build timestamp the legacy firmware used.
pub const POWER_LOSS_REFERENCE: Timestamp = Timestamp {
    year: 2025,
    month: 1,
    day: 1,
    hour: 0,
    minute: 0,
    second: 0,
};

impl Timestamp {
    /// Seconds since the Unix epoch for this civil time (UTC assumed).
    ///
    /// Uses the days-from-civil algorithm; exact for the RTC's supported
    /// range (2000–2099 on the DS3231, proleptic Gregorian otherwise).
    pub fn epoch_secs(&self) -> i64 {
        let y = i64::from(self.year) - i64::from(self.month <= 2);
        let era = y.div_euclid(400);
        let yoe = y - era * 400;
        let m = i64::from(self.month);
        let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + i64::from(self.day) - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        let days = era * 146_097 + doe - 719_468;

        days * 86_400
            + i64::from(self.hour) * 3_600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    /// Whole seconds elapsed since `earlier`. Negative if `earlier` is
    /// actually later (e.g. the RTC was adjusted backwards mid-flood).
    pub fn seconds_since(&self, earlier: &Timestamp) -> i64 {
        self.epoch_secs() - earlier.epoch_secs()
    }

    /// Whole minutes elapsed since `earlier`, floored, clamped to
    /// `0..=u16::MAX` for the event-log encoding.
    pub fn minutes_since(&self, earlier: &Timestamp) -> u16 {
        let mins = self.seconds_since(earlier).max(0) / 60;
        mins.min(i64::from(u16::MAX)) as u16
    }
}

impl fmt::Display for Timestamp {
    /// Renders `D/M/YYYY H:MM:SS`, matching the console status lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} {}:{:02}:{:02}",
            self.day, self.month, self.year, self.hour, self.minute, self.second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Timestamp {
        Timestamp {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    #[test]
    fn epoch_of_unix_origin() {
        assert_eq!(ts(1970, 1, 1, 0, 0, 0).epoch_secs(), 0);
    }

    #[test]
    fn epoch_of_known_instant() {
        // 2025-06-06 21:25:20 UTC
        assert_eq!(ts(2025, 6, 6, 21, 25, 20).epoch_secs(), 1_749_245_120);
    }

    #[test]
    fn duration_floors_to_whole_minutes() {
        let start = ts(2025, 6, 6, 21, 25, 20);
        let end = ts(2025, 6, 6, 21, 27, 25); // 125 s later
        assert_eq!(end.seconds_since(&start), 125);
        assert_eq!(end.minutes_since(&start), 2);
    }

    #[test]
    fn duration_across_midnight_and_leap_day() {
        let start = ts(2024, 2, 28, 23, 50, 0);
        let end = ts(2024, 2, 29, 0, 10, 0);
        assert_eq!(end.seconds_since(&start), 20 * 60);
        assert_eq!(end.minutes_since(&start), 20);
    }

    #[test]
    fn backwards_clock_clamps_to_zero_minutes() {
        let start = ts(2025, 6, 6, 21, 25, 20);
        let end = ts(2025, 6, 6, 21, 0, 0);
        assert!(end.seconds_since(&start) < 0);
        assert_eq!(end.minutes_since(&start), 0);
    }

    #[test]
    fn very_long_floods_saturate_the_minute_counter() {
        let start = ts(2025, 1, 1, 0, 0, 0);
        let end = ts(2150, 1, 1, 0, 0, 0);
        assert_eq!(end.minutes_since(&start), u16::MAX);
    }

    #[test]
    fn display_format() {
        let t = ts(2025, 6, 6, 21, 5, 9);
        assert_eq!(t.to_string(), "6/6/2025 21:05:09");
    }
}

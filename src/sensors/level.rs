//! Distance-to-level conversion.

/// Water level from a downward-facing range measurement.
///
/// The sensor is mounted `sensor_height_cm` above the tank floor, so
/// the level is the mounting height minus the measured distance.
/// Readings past the floor (distance above the mounting height) clamp
/// to zero rather than going negative.
pub fn level_from_distance(distance_cm: f32, sensor_height_cm: f32) -> f32 {
    (sensor_height_cm - distance_cm).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_height_minus_distance() {
        assert_eq!(level_from_distance(65.0, 100.0), 35.0);
    }

    #[test]
    fn readings_past_the_floor_clamp_to_zero() {
        assert_eq!(level_from_distance(120.0, 100.0), 0.0);
        assert_eq!(level_from_distance(100.0, 100.0), 0.0);
    }

    #[test]
    fn zero_distance_reads_as_a_full_tank() {
        // An echo timeout is collapsed to distance 0 upstream, which
        // lands here as the maximum level.
        assert_eq!(level_from_distance(0.0, 100.0), 100.0);
    }
}

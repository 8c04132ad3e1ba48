//! Battery level normalization.

/// Highest canonical battery level.
pub const BATTERY_LEVEL_MAX: u8 = 4;

/// Rescale a native battery reading `0..=native_max` onto `0..=4`.
///
/// Readings above `native_max` count as full.
pub fn rescale_battery(level: u8, native_max: u8) -> u8 {
    if native_max == 0 {
        return 0;
    }
    let level = u16::from(level.min(native_max));
    // Fits: level <= native_max, so the quotient is at most 4.
    (level * u16::from(BATTERY_LEVEL_MAX) / u16::from(native_max)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescale_battery() {
        assert_eq!(rescale_battery(0, 10), 0);
        assert_eq!(rescale_battery(5, 10), 2);
        assert_eq!(rescale_battery(10, 10), 4);
        assert_eq!(rescale_battery(15, 10), 4);
        assert_eq!(rescale_battery(5, 5), 4);
        assert_eq!(rescale_battery(3, 3), 4);
        assert_eq!(rescale_battery(1, 0), 0);
    }
}

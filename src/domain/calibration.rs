//! Calibration domain service
//!
//! This module provides the linear mapping from raw analog readings to
//! 0-100 percentages, plus the physical plausibility ranges used to
//! validate climate values.

/// Linear calibration bounds for one analog channel.
///
/// `at_zero` is the raw reading that maps to 0% and `at_full` the raw
/// reading that maps to 100%. Either ordering is valid: a soil probe
/// typically reads *higher* when dry (`at_zero > at_full`), a light
/// sensor *lower* when dark (`at_zero < at_full`). Readings outside the
/// bounds are clamped, never wrapped - sensor drift past the calibrated
/// range is common.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogCal {
    /// Raw reading mapped to 0%
    pub at_zero: u16,
    /// Raw reading mapped to 100%
    pub at_full: u16,
}

impl AnalogCal {
    /// Create a new calibration from its two anchor points
    pub const fn new(at_zero: u16, at_full: u16) -> Self {
        Self { at_zero, at_full }
    }

    /// Map a raw reading to a percentage in 0-100.
    ///
    /// The map is monotonic in the direction implied by the bound order
    /// and saturates at the edges. Degenerate bounds (`at_zero ==
    /// at_full`) always yield 0.
    pub fn percent(&self, raw: u16) -> u8 {
        let zero = self.at_zero as f32;
        let full = self.at_full as f32;
        let span = full - zero;
        if span == 0.0 {
            return 0;
        }

        let pct = (raw as f32 - zero) * 100.0 / span;
        let clamped = pct.clamp(0.0, 100.0);
        // Round half-up; clamped is in [0, 100] so the cast cannot wrap.
        (clamped + 0.5) as u8
    }
}

/// Inclusive physical plausibility range for a climate value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValidRange {
    /// Lower bound (inclusive)
    pub min: f32,
    /// Upper bound (inclusive)
    pub max: f32,
}

impl ValidRange {
    /// Create a new range
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Validation policy: clamp to the nearest bound.
    ///
    /// Out-of-range values are pulled back to the closest limit instead
    /// of being replaced by a sentinel; non-finite input is handled one
    /// level up, before this is called.
    pub fn admit(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Whether the value lies inside the range
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Static calibration profile for the whole node.
///
/// Fixed at startup, never mutated at runtime. When calibration is
/// enabled it transforms a frame's raw soil/light values into
/// percentages before emission; it does not alter temperature or
/// humidity, which only pass through the validity ranges.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationProfile {
    /// Soil moisture bounds (dry -> 0%, wet -> 100%)
    pub soil: AnalogCal,
    /// Ambient light bounds (dark -> 0%, bright -> 100%)
    pub light: AnalogCal,
    /// Plausible temperature range in Celsius
    pub temperature: ValidRange,
    /// Plausible relative humidity range in percent
    pub humidity: ValidRange,
}

impl CalibrationProfile {
    /// Bench calibration for the reference capacitive soil probe and LDR.
    ///
    /// Soil reads ~850 in dry air and ~400 submerged; the LDR divider
    /// reads ~50 in darkness and ~900 in bright light. Measure and adjust
    /// for the specific sensors actually fitted.
    pub const DEFAULT: Self = Self {
        soil: AnalogCal::new(850, 400),
        light: AnalogCal::new(50, 900),
        temperature: ValidRange::new(-40.0, 80.0),
        humidity: ValidRange::new(0.0, 100.0),
    };

    /// Create a profile with custom analog bounds and climate ranges
    pub const fn new(
        soil: AnalogCal,
        light: AnalogCal,
        temperature: ValidRange,
        humidity: ValidRange,
    ) -> Self {
        Self {
            soil,
            light,
            temperature,
            humidity,
        }
    }

    /// Calibrated soil moisture percentage for a raw reading
    pub fn soil_percent(&self, raw: u16) -> u8 {
        self.soil.percent(raw)
    }

    /// Calibrated ambient light percentage for a raw reading
    pub fn light_percent(&self, raw: u16) -> u8 {
        self.light.percent(raw)
    }
}

impl Default for CalibrationProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soil_bounds_map_to_endpoints() {
        // dry=850, wet=400: wet end is 100%, dry end is 0%
        let cal = AnalogCal::new(850, 400);
        assert_eq!(cal.percent(400), 100);
        assert_eq!(cal.percent(850), 0);
    }

    #[test]
    fn soil_reading_beyond_dry_bound_clamps_to_zero() {
        let cal = AnalogCal::new(850, 400);
        assert_eq!(cal.percent(1000), 0);
    }

    #[test]
    fn light_bounds_map_to_endpoints() {
        // dark=50, bright=900
        let cal = AnalogCal::new(50, 900);
        assert_eq!(cal.percent(50), 0);
        assert_eq!(cal.percent(900), 100);
    }

    #[test]
    fn light_reading_below_dark_bound_clamps_to_zero() {
        let cal = AnalogCal::new(50, 900);
        assert_eq!(cal.percent(0), 0);
    }

    #[test]
    fn percent_always_in_range() {
        let increasing = AnalogCal::new(50, 900);
        let decreasing = AnalogCal::new(850, 400);
        for raw in (0..=4095).step_by(17) {
            assert!(increasing.percent(raw) <= 100);
            assert!(decreasing.percent(raw) <= 100);
        }
    }

    #[test]
    fn increasing_bounds_give_non_decreasing_map() {
        let cal = AnalogCal::new(50, 900);
        let mut last = cal.percent(0);
        for raw in 1..=1024 {
            let pct = cal.percent(raw);
            assert!(pct >= last, "regressed at raw={raw}");
            last = pct;
        }
    }

    #[test]
    fn decreasing_bounds_give_non_increasing_map() {
        let cal = AnalogCal::new(850, 400);
        let mut last = cal.percent(0);
        for raw in 1..=1024 {
            let pct = cal.percent(raw);
            assert!(pct <= last, "regressed at raw={raw}");
            last = pct;
        }
    }

    #[test]
    fn degenerate_bounds_yield_zero() {
        let cal = AnalogCal::new(512, 512);
        assert_eq!(cal.percent(0), 0);
        assert_eq!(cal.percent(512), 0);
        assert_eq!(cal.percent(4095), 0);
    }

    #[test]
    fn midpoint_maps_to_half() {
        let cal = AnalogCal::new(0, 1000);
        assert_eq!(cal.percent(500), 50);
    }

    #[test]
    fn valid_range_clamps_to_nearest_bound() {
        let range = ValidRange::new(-40.0, 80.0);
        assert_eq!(range.admit(120.0), 80.0);
        assert_eq!(range.admit(-55.5), -40.0);
        assert_eq!(range.admit(21.25), 21.25);
    }

    #[test]
    fn valid_range_contains() {
        let range = ValidRange::new(0.0, 100.0);
        assert!(range.contains(0.0));
        assert!(range.contains(100.0));
        assert!(!range.contains(100.1));
    }

    #[test]
    fn default_profile_uses_bench_bounds() {
        let profile = CalibrationProfile::default();
        assert_eq!(profile.soil_percent(400), 100);
        assert_eq!(profile.light_percent(900), 100);
    }
}

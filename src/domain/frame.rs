//! Sensor frame domain entity
//!
//! This module defines the raw measurement snapshot for one cycle.
//! It has no knowledge of how frames are calibrated or transmitted.

/// One cycle's raw measurement snapshot.
///
/// A frame lives for exactly one loop iteration: it is produced by
/// acquisition, optionally normalized, serialized, and dropped. Climate
/// values are `None` when the sensor could not be read this cycle; the
/// frame is emitted either way, with no retry and no stale substitution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorFrame {
    /// Temperature in Celsius, `None` on acquisition failure
    pub temperature_c: Option<f32>,
    /// Relative humidity in percent, `None` on acquisition failure
    pub humidity_pct: Option<f32>,
    /// Raw soil moisture ADC value
    pub soil_raw: u16,
    /// Raw ambient light ADC value
    pub light_raw: u16,
}

impl SensorFrame {
    /// Create a fully populated frame
    pub const fn new(temperature_c: f32, humidity_pct: f32, soil_raw: u16, light_raw: u16) -> Self {
        Self {
            temperature_c: Some(temperature_c),
            humidity_pct: Some(humidity_pct),
            soil_raw,
            light_raw,
        }
    }

    /// Create a frame whose climate acquisition failed this cycle
    pub const fn without_climate(soil_raw: u16, light_raw: u16) -> Self {
        Self {
            temperature_c: None,
            humidity_pct: None,
            soil_raw,
            light_raw,
        }
    }

    /// Whether the climate sensor produced values this cycle
    pub const fn has_climate(&self) -> bool {
        self.temperature_c.is_some() && self.humidity_pct.is_some()
    }
}

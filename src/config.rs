//! Node configuration
//!
//! One immutable structure built at startup and handed to the sampler by
//! value; nothing reconfigures the node at runtime. Pin assignment and
//! the serial baud rate live with the adapters in the firmware entry,
//! not here.

/// Configuration for the sampling loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeConfig {
    /// Cycle period in milliseconds
    pub read_interval_ms: u64,
    /// Analog conversions averaged per channel per cycle (min 1)
    pub samples_per_cycle: u8,
    /// Whether to map soil/light raw values to percentages
    pub calibrate: bool,
    /// Whether to clamp climate values to their plausibility ranges
    pub validate: bool,
    /// Whether to drive the activity LED around each cycle
    pub led_indicator: bool,
    /// Whether to log raw pre-calibration values each cycle
    pub debug: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            read_interval_ms: 2000,
            samples_per_cycle: 5,
            calibrate: true,
            validate: true,
            led_indicator: false,
            debug: false,
        }
    }
}

impl NodeConfig {
    /// Config for battery operation: slow cadence, single conversions
    pub const fn low_power() -> Self {
        Self {
            read_interval_ms: 60_000,
            samples_per_cycle: 1,
            calibrate: true,
            validate: true,
            led_indicator: false,
            debug: false,
        }
    }

    /// Config for bench bring-up: raw values, LED and diagnostics on
    pub const fn bench() -> Self {
        Self {
            read_interval_ms: 2000,
            samples_per_cycle: 1,
            calibrate: false,
            validate: false,
            led_indicator: true,
            debug: true,
        }
    }
}

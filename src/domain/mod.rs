//! Domain layer - pure business logic independent of infrastructure
//!
//! This module contains the core domain entities and services that
//! represent the measurement logic of the sensor node.

pub mod calibration;
pub mod frame;

pub use calibration::{AnalogCal, CalibrationProfile, ValidRange};
pub use frame::SensorFrame;

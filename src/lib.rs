//! Agrinode — greenhouse telemetry node firmware
//!
//! This library provides a hexagonal architecture for a small sensor node
//! that samples a DHT22-class climate sensor plus two analog channels
//! (soil moisture, ambient light) and emits one line-delimited JSON
//! record per cycle over a serial link.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - SensorFrame entity                                            │
//! │  - CalibrationProfile service                                    │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - ClimatePort: temperature + humidity acquisition               │
//! │  - AnalogPort: raw ADC channel reads                             │
//! │  - LinkPort: serial byte-sink for telemetry lines                │
//! │  - ClockPort: time source (virtualizable in tests)               │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters (feature `rp2350`)                  │
//! │  - Dht22Sensor: bit-banged single-wire climate sensor            │
//! │  - RpAnalogInputs: RP2350 ADC soil/light channels                │
//! │  - UartLink: UART TX serial link                                 │
//! │  - EmbassyClock / LedIndicator                                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Benefits
//!
//! - **Testable** - The sampler runs against mock ports and a virtual
//!   clock, so the whole pipeline is exercised on the host.
//! - **Extensible** - Swapping the climate sensor or the transport means
//!   implementing one trait, not touching the loop.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

// ============================================================================
// Wire format (shared between node and any host-side reader)
// ============================================================================

pub mod telemetry;

pub use telemetry::{AnalogValue, RecordFrame, TelemetryRecord, LINE_CAPACITY};

// ============================================================================
// Hexagonal Architecture
// ============================================================================

/// Domain layer - pure business logic
pub mod domain;

/// Ports - traits defining boundaries
pub mod ports;

/// Node configuration, fixed for the process lifetime
pub mod config;

/// Sampler engine - the acquire/calibrate/validate/serialize/wait cycle
pub mod sampler;

/// Adapters - RP2350 hardware implementations
#[cfg(feature = "rp2350")]
pub mod adapters;

// Re-export key domain types
pub use domain::{AnalogCal, CalibrationProfile, SensorFrame, ValidRange};

// Re-export key port traits
pub use ports::{AnalogChannel, AnalogPort, ClimatePort, ClockPort, IndicatorPort, LinkPort};

// Re-export the engine and its configuration
pub use config::NodeConfig;
pub use sampler::Sampler;

// Re-export adapters
#[cfg(feature = "rp2350")]
pub use adapters::{Dht22Sensor, EmbassyClock, LedIndicator, RpAnalogInputs, UartLink};

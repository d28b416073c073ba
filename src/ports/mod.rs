//! Ports (interfaces) defining the boundaries of the application
//!
//! Ports are traits that define how the sampling loop interacts with the
//! outside world. They allow the domain and the engine to remain
//! independent of specific hardware.
//!
//! # Hexagonal Architecture
//!
//! In hexagonal architecture, ports define the "holes" in the hexagon
//! where adapters plug in:
//!
//! - **ClimatePort**: how we read temperature and humidity (DHT22, mock)
//! - **AnalogPort**: how we read raw analog channels (ADC, mock)
//! - **LinkPort**: how telemetry lines leave the node (UART, mock)
//! - **ClockPort**: how the loop waits between cycles (embassy, virtual)
//! - **IndicatorPort**: the cosmetic activity LED

pub mod analog;
pub mod climate;
pub mod clock;
pub mod indicator;
pub mod link;

pub use analog::{AnalogChannel, AnalogError, AnalogPort};
pub use climate::{ClimateError, ClimatePort, ClimateReading};
pub use clock::ClockPort;
pub use indicator::{IndicatorPort, NoIndicator};
pub use link::{LinkError, LinkPort};

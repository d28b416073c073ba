//! Adapters - concrete implementations of ports
//!
//! Adapters connect the sampling loop to the outside world by
//! implementing the port traits. Each adapter knows how to work with a
//! specific piece of hardware.
//!
//! # Available Adapters
//!
//! - **dht22**: bit-banged DHT22 climate sensor on a GPIO pin
//! - **rp_adc**: RP2350 ADC soil/light channels
//! - **uart_link**: UART TX serial link for telemetry lines
//! - **clock**: embassy-time clock source
//! - **led**: GPIO activity LED

pub mod clock;
pub mod dht22;
pub mod led;
pub mod rp_adc;
pub mod uart_link;

pub use clock::EmbassyClock;
pub use dht22::Dht22Sensor;
pub use led::LedIndicator;
pub use rp_adc::RpAnalogInputs;
pub use uart_link::UartLink;

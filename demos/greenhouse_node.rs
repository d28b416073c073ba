//! Greenhouse Telemetry Node
//!
//! Samples a DHT22 climate sensor plus soil moisture and ambient light
//! channels, and emits one JSON line per cycle over UART0:
//!
//! ```text
//! {"temp":24.60,"hum":61.20,"soil":73,"light":41}
//! ```
//!
//! # Wiring
//!
//! - DHT22 data on GPIO 2 (pull-up enabled internally)
//! - Soil moisture probe on GPIO 26 (ADC0)
//! - LDR divider on GPIO 27 (ADC1)
//! - Telemetry out on GPIO 0 (UART0 TX, 9600 baud)
//! - Activity LED on GPIO 25

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::gpio::{Flex, Level, Output, Pull};
use embassy_rp::uart::{Config as UartConfig, UartTx};
use {defmt_rtt as _, panic_probe as _};

use agrinode::adapters::{Dht22Sensor, EmbassyClock, LedIndicator, RpAnalogInputs, UartLink};
use agrinode::domain::CalibrationProfile;
use agrinode::{NodeConfig, Sampler};

// ============================================================================
// Node Configuration
// ============================================================================

/// Serial transport speed toward the host
const BAUD_RATE: u32 = 9600;

// ============================================================================
// Main Entry Point
// ============================================================================

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("=== Greenhouse Telemetry Node ===");
    info!("Architecture: Domain -> Ports -> Adapters");

    // Initialize peripherals
    let p = embassy_rp::init(Default::default());

    // ========================================================================
    // Create Adapters
    // ========================================================================

    // Climate adapter: DHT22 on GPIO 2
    let climate = Dht22Sensor::new(Flex::new(p.PIN_2));
    info!("Climate adapter created (DHT22)");

    // Analog adapter: soil on ADC0, light on ADC1
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let soil = AdcChannel::new_pin(p.PIN_26, Pull::None);
    let light = AdcChannel::new_pin(p.PIN_27, Pull::None);
    let analog = RpAnalogInputs::new(adc, soil, light);
    info!("Analog adapter created (ADC0/ADC1)");

    // Link adapter: UART0 TX with DMA
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BAUD_RATE;
    let tx = UartTx::new(p.UART0, p.PIN_0, p.DMA_CH0, uart_config);
    let link = UartLink::new(tx);
    info!("Link adapter created (UART0 @ {} baud)", BAUD_RATE);

    // Activity LED on GPIO 25
    let led = LedIndicator::new(Output::new(p.PIN_25, Level::Low));

    // ========================================================================
    // Run the Sampler
    // ========================================================================

    let config = NodeConfig {
        led_indicator: true,
        ..NodeConfig::default()
    };
    let profile = CalibrationProfile::DEFAULT;

    let mut sampler =
        Sampler::new(climate, analog, link, EmbassyClock, config, profile).with_indicator(led);

    info!(
        "Sampling every {} ms, {} conversions per channel",
        config.read_interval_ms, config.samples_per_cycle
    );

    sampler.run().await;
}

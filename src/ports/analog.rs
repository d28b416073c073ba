//! Analog port - abstraction for raw analog input channels
//!
//! This trait exposes `read(channel) -> raw` so the calibration and
//! serialization logic can be tested without physical hardware.

/// Logical analog channels sampled by the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogChannel {
    /// Soil moisture probe
    Soil,
    /// Ambient light sensor (LDR divider)
    Light,
}

/// Error type for analog conversions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogError {
    /// The ADC conversion failed
    ConversionFailed,
}

/// Port for reading raw analog values
pub trait AnalogPort {
    /// Perform one conversion on the given channel.
    ///
    /// Returns the raw ADC value in device-specific units; range depends
    /// on the converter's resolution.
    fn read(
        &mut self,
        channel: AnalogChannel,
    ) -> impl core::future::Future<Output = Result<u16, AnalogError>>;
}

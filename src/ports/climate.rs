//! Climate port - abstraction for the temperature/humidity sensor
//!
//! This trait allows the sampling loop to acquire climate values without
//! knowing the specific sensor protocol (DHT22 single-wire, I2C, mock).

/// Error type for climate sensor operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClimateError {
    /// The sensor did not answer within the protocol timing budget
    Timeout,
    /// The 40-bit payload failed its checksum
    ChecksumMismatch,
    /// Decoded values are outside what the sensor can physically report
    InvalidData,
    /// The sensor was polled faster than its minimum sampling period
    TooSoon,
}

/// One successful climate acquisition.
///
/// Both values come from the same sensor transaction; there is no frame
/// where one of the two is missing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateReading {
    /// Temperature in Celsius
    pub temperature_c: f32,
    /// Relative humidity in percent
    pub humidity_pct: f32,
}

/// Port for reading the climate sensor
///
/// # Example Implementation
///
/// ```ignore
/// struct Dht22Sensor<'a> {
///     pin: Flex<'a>,
/// }
///
/// impl ClimatePort for Dht22Sensor<'_> {
///     async fn read(&mut self) -> Result<ClimateReading, ClimateError> {
///         let payload = self.transfer().await?;
///         decode(payload)
///     }
/// }
/// ```
pub trait ClimatePort {
    /// Acquire one temperature/humidity pair.
    ///
    /// Acquisition is synchronous from the loop's point of view; a slow
    /// or stuck sensor delays the cycle rather than being raced.
    fn read(&mut self)
        -> impl core::future::Future<Output = Result<ClimateReading, ClimateError>>;
}

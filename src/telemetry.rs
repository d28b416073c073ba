//! Telemetry wire format shared between the node and host-side readers
//!
//! One record per cycle, serialized as a single JSON object with a fixed
//! key order and terminated by a line break:
//!
//! ```text
//! {"temp":24.60,"hum":61.20,"soil":73,"light":41}
//! ```
//!
//! `temp`/`hum` carry two decimals; a failed climate acquisition - or
//! any non-finite value that reaches the encoder - is serialized as
//! JSON `null`, so every emitted line stays valid JSON no matter what
//! the ports produced. `soil`/`light` are raw ADC integers, or 0-100
//! integer percentages when calibration ran.

use core::fmt::Write;

use heapless::String;
use serde::Deserialize;
use serde_json_core::de;

/// Capacity of the line buffer for one encoded record.
///
/// Sized against the worst admissible record: two extreme finite floats
/// (`-f32::MAX` prints 43 characters under `{:.2}`), two five-digit
/// analog values, and the fixed keys come to under 140 bytes.
pub const LINE_CAPACITY: usize = 192;

/// An analog channel value as it appears on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogValue {
    /// Raw ADC units, emitted when calibration is disabled.
    Raw(u16),
    /// Calibrated percentage in 0-100, emitted when calibration ran.
    Percent(u8),
}

/// One cycle's telemetry record, ready for serialization.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryRecord {
    /// Temperature in Celsius; `None` when acquisition failed.
    pub temp: Option<f32>,
    /// Relative humidity in percent; `None` when acquisition failed.
    pub hum: Option<f32>,
    /// Soil moisture channel value.
    pub soil: AnalogValue,
    /// Ambient light channel value.
    pub light: AnalogValue,
}

/// Error type for record encoding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// The encoded record did not fit the line buffer
    BufferOverflow,
}

impl From<core::fmt::Error> for EncodeError {
    fn from(_: core::fmt::Error) -> Self {
        EncodeError::BufferOverflow
    }
}

impl TelemetryRecord {
    /// Encode the record as one JSON object, without the line terminator.
    ///
    /// Key order is fixed (`temp`, `hum`, `soil`, `light`) and the output
    /// is byte-deterministic for a given record.
    pub fn encode(&self) -> Result<String<LINE_CAPACITY>, EncodeError> {
        let mut out: String<LINE_CAPACITY> = String::new();

        out.push_str("{\"temp\":")
            .map_err(|_| EncodeError::BufferOverflow)?;
        write_climate(&mut out, self.temp)?;
        out.push_str(",\"hum\":")
            .map_err(|_| EncodeError::BufferOverflow)?;
        write_climate(&mut out, self.hum)?;
        out.push_str(",\"soil\":")
            .map_err(|_| EncodeError::BufferOverflow)?;
        write_analog(&mut out, self.soil)?;
        out.push_str(",\"light\":")
            .map_err(|_| EncodeError::BufferOverflow)?;
        write_analog(&mut out, self.light)?;
        out.push('}').map_err(|_| EncodeError::BufferOverflow)?;

        Ok(out)
    }
}

/// Write one climate value, or `null` for the failure sentinel.
///
/// Non-finite values are also emitted as `null`: `{:.2}` would print
/// `NaN`/`inf`, which is not JSON, and the encoder is the last gate
/// before the wire.
fn write_climate(buf: &mut String<LINE_CAPACITY>, value: Option<f32>) -> Result<(), EncodeError> {
    match value {
        Some(v) if v.is_finite() => write!(buf, "{:.2}", v)?,
        _ => buf
            .push_str("null")
            .map_err(|_| EncodeError::BufferOverflow)?,
    }
    Ok(())
}

fn write_analog(buf: &mut String<LINE_CAPACITY>, value: AnalogValue) -> Result<(), EncodeError> {
    match value {
        AnalogValue::Raw(raw) => write!(buf, "{}", raw)?,
        AnalogValue::Percent(pct) => write!(buf, "{}", pct)?,
    }
    Ok(())
}

/// A telemetry record as parsed back from one wire line.
///
/// Used by host-side readers and by loopback tests; analog channels come
/// back as numbers regardless of whether calibration ran on the node.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct RecordFrame {
    /// Temperature in Celsius, `None` when the node emitted `null`.
    pub temp: Option<f32>,
    /// Relative humidity in percent, `None` when the node emitted `null`.
    pub hum: Option<f32>,
    /// Soil channel value (raw units or percent).
    pub soil: f32,
    /// Light channel value (raw units or percent).
    pub light: f32,
}

/// Parse one wire line back into a [`RecordFrame`].
pub fn parse_line(line: &str) -> Result<RecordFrame, de::Error> {
    de::from_str::<RecordFrame>(line).map(|(frame, _)| frame)
}

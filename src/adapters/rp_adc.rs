//! RP2350 analog input adapter
//!
//! Reads the soil moisture and ambient light channels through the ADC
//! in blocking mode and exposes them through the AnalogPort interface.

use core::sync::atomic::{AtomicU16, Ordering};

use embassy_rp::adc::{Adc, Blocking, Channel};

use crate::ports::analog::{AnalogChannel, AnalogError, AnalogPort};

/// RP2350 ADC adapter for the two analog sensor channels
pub struct RpAnalogInputs<'a> {
    /// ADC peripheral (blocking mode; conversions take ~2us)
    adc: Adc<'a, Blocking>,
    soil: Channel<'a>,
    light: Channel<'a>,
    /// Last raw values per channel (for diagnostics)
    last_soil: AtomicU16,
    last_light: AtomicU16,
}

impl<'a> RpAnalogInputs<'a> {
    /// Create a new adapter from the ADC and its two configured channels
    pub fn new(adc: Adc<'a, Blocking>, soil: Channel<'a>, light: Channel<'a>) -> Self {
        Self {
            adc,
            soil,
            light,
            last_soil: AtomicU16::new(0),
            last_light: AtomicU16::new(0),
        }
    }

    /// Last raw conversion seen on a channel (for diagnostics)
    pub fn last_raw(&self, channel: AnalogChannel) -> u16 {
        match channel {
            AnalogChannel::Soil => self.last_soil.load(Ordering::Relaxed),
            AnalogChannel::Light => self.last_light.load(Ordering::Relaxed),
        }
    }
}

impl AnalogPort for RpAnalogInputs<'_> {
    async fn read(&mut self, channel: AnalogChannel) -> Result<u16, AnalogError> {
        let (pin, last) = match channel {
            AnalogChannel::Soil => (&mut self.soil, &self.last_soil),
            AnalogChannel::Light => (&mut self.light, &self.last_light),
        };

        let raw = self
            .adc
            .blocking_read(pin)
            .map_err(|_| AnalogError::ConversionFailed)?;

        last.store(raw, Ordering::Relaxed);
        Ok(raw)
    }
}

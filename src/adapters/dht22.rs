//! DHT22 climate sensor adapter
//!
//! Bit-banged single-wire protocol on one GPIO pin: a long low start
//! pulse from the host, an 80us/80us response from the sensor, then 40
//! data bits where the length of the high phase encodes the bit. The
//! whole transfer takes under 6ms and is driven blocking; the loop's
//! cadence budget absorbs it.

use embassy_rp::gpio::{Flex, Pull};
use embassy_time::{block_for, Duration, Instant};

use crate::ports::climate::{ClimateError, ClimatePort, ClimateReading};

/// Minimum period between two DHT22 conversions.
///
/// The sensor needs 2s to refresh its measurement; polling faster
/// returns stale or corrupt data.
const MIN_SAMPLE_PERIOD_MS: u64 = 2000;

/// Host start pulse length. Datasheet minimum is 1ms.
const START_PULSE_US: u64 = 1200;

/// A high phase longer than this is a 1 bit (nominal: 26-28us for 0,
/// 70us for 1).
const BIT_THRESHOLD_US: u64 = 45;

/// DHT22 adapter implementing ClimatePort
pub struct Dht22Sensor<'a> {
    pin: Flex<'a>,
    last_transfer: Option<Instant>,
}

impl<'a> Dht22Sensor<'a> {
    /// Create a new DHT22 adapter on the given data pin.
    ///
    /// The bus idles high; an external pull-up is typical but the
    /// internal one is enabled as well.
    pub fn new(mut pin: Flex<'a>) -> Self {
        pin.set_pull(Pull::Up);
        pin.set_as_input();
        Self {
            pin,
            last_transfer: None,
        }
    }

    /// Run one full 40-bit transfer and return the raw payload
    fn transfer(&mut self) -> Result<[u8; 5], ClimateError> {
        // Host start: hold the bus low, then release it to the pull-up
        self.pin.set_low();
        self.pin.set_as_output();
        block_for(Duration::from_micros(START_PULSE_US));
        self.pin.set_as_input();
        block_for(Duration::from_micros(30));

        // Sensor response: 80us low, 80us high, then the first bit's low
        self.wait_for_level(false, 100)?;
        self.wait_for_level(true, 120)?;
        self.wait_for_level(false, 120)?;

        let mut payload = [0u8; 5];
        for bit in 0..40 {
            self.wait_for_level(true, 80)?;
            let rise = Instant::now();
            self.wait_for_level(false, 120)?;
            let high_us = rise.elapsed().as_micros();

            payload[bit / 8] <<= 1;
            if high_us > BIT_THRESHOLD_US {
                payload[bit / 8] |= 1;
            }
        }

        Ok(payload)
    }

    /// Busy-wait until the pin reaches the target level
    fn wait_for_level(&mut self, high: bool, timeout_us: u64) -> Result<(), ClimateError> {
        let deadline = Instant::now() + Duration::from_micros(timeout_us);
        while self.pin.is_high() != high {
            if Instant::now() > deadline {
                return Err(ClimateError::Timeout);
            }
        }
        Ok(())
    }
}

/// Decode a checksummed 40-bit payload into a reading
fn decode(payload: [u8; 5]) -> Result<ClimateReading, ClimateError> {
    let sum = payload[0]
        .wrapping_add(payload[1])
        .wrapping_add(payload[2])
        .wrapping_add(payload[3]);
    if sum != payload[4] {
        return Err(ClimateError::ChecksumMismatch);
    }

    let humidity_raw = u16::from_be_bytes([payload[0], payload[1]]);
    let temperature_raw = u16::from_be_bytes([payload[2] & 0x7F, payload[3]]);

    let humidity_pct = humidity_raw as f32 / 10.0;
    let mut temperature_c = temperature_raw as f32 / 10.0;
    if payload[2] & 0x80 != 0 {
        temperature_c = -temperature_c;
    }

    // The sensor reports -40..80C and 0..100%; anything else is a
    // corrupt transfer that happened to pass its checksum.
    if !(-40.0..=80.0).contains(&temperature_c) || humidity_pct > 100.0 {
        return Err(ClimateError::InvalidData);
    }

    Ok(ClimateReading {
        temperature_c,
        humidity_pct,
    })
}

impl ClimatePort for Dht22Sensor<'_> {
    async fn read(&mut self) -> Result<ClimateReading, ClimateError> {
        if let Some(last) = self.last_transfer {
            if last.elapsed() < Duration::from_millis(MIN_SAMPLE_PERIOD_MS) {
                return Err(ClimateError::TooSoon);
            }
        }
        self.last_transfer = Some(Instant::now());

        let payload = self.transfer()?;
        decode(payload)
    }
}

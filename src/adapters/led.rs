//! GPIO activity LED adapter

use embassy_rp::gpio::Output;

use crate::ports::indicator::IndicatorPort;

/// Activity LED on a push-pull GPIO output
pub struct LedIndicator<'a> {
    pin: Output<'a>,
}

impl<'a> LedIndicator<'a> {
    /// Create a new indicator; the pin's idle level is the caller's
    pub fn new(pin: Output<'a>) -> Self {
        Self { pin }
    }
}

impl IndicatorPort for LedIndicator<'_> {
    fn set_active(&mut self, on: bool) {
        if on {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }
}

//! Indicator port - the cosmetic activity LED
//!
//! Purely an observability aid: the sampler raises the indicator while a
//! cycle is in flight. No data depends on it.

/// Port for the activity indicator
pub trait IndicatorPort {
    /// Drive the indicator on or off
    fn set_active(&mut self, on: bool);
}

/// Indicator stand-in for nodes without an LED fitted.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIndicator;

impl IndicatorPort for NoIndicator {
    fn set_active(&mut self, _on: bool) {}
}

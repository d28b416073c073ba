//! Clock port - abstraction for the loop's time source
//!
//! The sampling loop only ever blocks here. Substituting a virtual clock
//! makes the cycle cadence deterministic under test.

/// Port for time keeping and inter-cycle delays
pub trait ClockPort {
    /// Milliseconds since boot
    fn now_ms(&self) -> u64;

    /// Block for the given number of milliseconds.
    ///
    /// This is the loop's only suspension point; there is no drift
    /// correction and no catch-up on late cycles.
    fn sleep_ms(&mut self, ms: u64) -> impl core::future::Future<Output = ()>;
}

//! Embassy clock adapter
//!
//! The real time source for the node: `now_ms` from the monotonic boot
//! instant, delays through the embassy timer queue.

use embassy_time::{Duration, Instant, Timer};

use crate::ports::clock::ClockPort;

/// Clock adapter backed by embassy-time
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

impl ClockPort for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    async fn sleep_ms(&mut self, ms: u64) {
        Timer::after(Duration::from_millis(ms)).await;
    }
}

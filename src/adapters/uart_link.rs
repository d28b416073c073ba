//! UART link adapter
//!
//! Sends telemetry lines out the hardware UART with DMA. One write for
//! the JSON object, one for the terminator.

use embassy_rp::uart::{Async, UartTx};

use crate::ports::link::{LinkError, LinkPort};

/// UART TX adapter implementing LinkPort
pub struct UartLink<'a> {
    tx: UartTx<'a, Async>,
}

impl<'a> UartLink<'a> {
    /// Create a new link over a configured UART transmitter
    pub fn new(tx: UartTx<'a, Async>) -> Self {
        Self { tx }
    }
}

impl LinkPort for UartLink<'_> {
    async fn send_line(&mut self, line: &str) -> Result<(), LinkError> {
        self.tx
            .write(line.as_bytes())
            .await
            .map_err(|_| LinkError::SendFailed)?;
        self.tx
            .write(b"\n")
            .await
            .map_err(|_| LinkError::SendFailed)
    }
}

//! Link port - abstraction for the outgoing serial byte-sink
//!
//! This trait allows the sampling loop to emit telemetry without knowing
//! the transport (UART, USB CDC, mock buffer).

/// Error type for link operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The transport failed to accept the bytes
    SendFailed,
}

/// Port for sending telemetry lines to the host
pub trait LinkPort {
    /// Send one line of telemetry.
    ///
    /// The implementation appends the line terminator after `line`;
    /// callers pass the bare JSON object.
    fn send_line(
        &mut self,
        line: &str,
    ) -> impl core::future::Future<Output = Result<(), LinkError>>;
}

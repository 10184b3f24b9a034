//! Hardware UART driver seam.

use crate::types::{OpenConfig, PinId};

/// A physical UART peripheral driver.
///
/// One instance per channel lives in the
/// [`ChannelRegistry`](crate::registry::ChannelRegistry); facades never own
/// one. The interface mirrors a polled hardware-access API: no `Result`,
/// failures degrade to neutral values (`None`, 0, `false`) and callers poll
/// state instead of handling errors.
///
/// The less common operations carry no-op defaults so a minimal driver only
/// has to provide the byte-stream core.
pub trait HardwareUart {
    /// Configure the peripheral and enable it.
    fn open(&mut self, cfg: &OpenConfig, rx: PinId, tx: PinId, invert: bool);

    /// Disable the peripheral and release its pins.
    fn close(&mut self);

    /// Pop the next received byte, if any.
    fn read(&mut self) -> Option<u8>;

    /// Look at the next received byte without consuming it.
    fn peek(&mut self) -> Option<u8>;

    /// Queue one byte for transmission. Returns the number of bytes accepted
    /// (0 when the transmit path is saturated or disabled).
    fn write(&mut self, byte: u8) -> usize;

    /// Queue a buffer for transmission, returning how many bytes were
    /// accepted.
    fn write_all(&mut self, buf: &[u8]) -> usize;

    /// Drain received bytes into `buf`, returning how many were copied.
    fn read_into(&mut self, buf: &mut [u8]) -> usize;

    /// Number of received bytes waiting.
    fn available(&self) -> usize;

    /// Block until the transmit FIFO has drained.
    fn flush(&mut self);

    /// Whether the receive path overran since the last query.
    fn has_overrun(&mut self) -> bool;

    /// The rate the peripheral is actually running at.
    fn baud_rate(&self) -> u32;

    /// Remap the channel onto its alternate pinout. `tx_pin` selects the
    /// transmit pin where the hardware offers a choice.
    fn swap_pins(&mut self, tx_pin: PinId);

    /// Route or unroute debug output through this channel.
    fn set_debug_output(&mut self, enable: bool) {
        let _ = enable;
    }

    /// Whether the transmit line is currently driven.
    fn is_tx_enabled(&self) -> bool {
        true
    }

    /// Whether the receive line is currently sampled.
    fn is_rx_enabled(&self) -> bool {
        true
    }

    /// Whether the receive path flagged a framing/parity error since the
    /// last query.
    fn has_rx_error(&mut self) -> bool {
        false
    }

    /// Begin sampling the line for baud-rate auto-detection.
    fn start_detect_baudrate(&mut self) {}

    /// Report the rate detected so far (0 if none yet).
    fn test_baudrate(&mut self) -> u32 {
        0
    }

    /// Detect the line rate, giving up after `timeout_ms`. Returns 0 on
    /// timeout.
    fn detect_baudrate(&mut self, timeout_ms: u32) -> u32 {
        let _ = timeout_ms;
        0
    }
}

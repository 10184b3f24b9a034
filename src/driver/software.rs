//! Bit-banged software serial driver seam.

use crate::types::PinId;

/// A software-emulated serial channel driving arbitrary GPIO pins.
///
/// Exclusively owned by the facade that allocated it (the emulated instance
/// exists if and only if the facade classified as
/// [`Software`](crate::types::TransportKind::Software)). Unlike
/// [`HardwareUart`](crate::driver::HardwareUart) there are no bulk
/// operations; the facade loops over single bytes with partial-transfer
/// semantics.
pub trait SoftwareUart {
    /// Bind an instance to a pin pair with the given polarity and receive
    /// buffer capacity.
    fn bind(rx: PinId, tx: PinId, invert: bool, capacity: usize) -> Self
    where
        Self: Sized;

    /// Start sampling/driving the pins at `baud`.
    fn open(&mut self, baud: u32);

    /// Stop and release the pins.
    fn close(&mut self);

    /// Pop the next received byte, if any.
    fn read(&mut self) -> Option<u8>;

    /// Look at the next received byte without consuming it.
    fn peek(&mut self) -> Option<u8>;

    /// Transmit one byte. Returns 1, or 0 when the byte could not be sent.
    fn write(&mut self, byte: u8) -> usize;

    /// Number of received bytes waiting.
    fn available(&self) -> usize;

    /// Wait for the in-flight byte to finish transmitting.
    fn flush(&mut self);

    /// Whether the receive buffer overflowed since the last query.
    fn overflow(&mut self) -> bool;

    /// Make this instance the one receiving (only one bit-banged channel can
    /// sample at a time). Returns whether listening was switched.
    fn listen(&mut self) -> bool;

    /// Whether this instance is the listening one.
    fn is_listening(&self) -> bool;

    /// Stop receiving on this instance. Returns whether it had been
    /// listening.
    fn stop_listening(&mut self) -> bool;
}

/// Null software serial for platforms without a bit-banged fallback.
///
/// Never constructed by a facade on such platforms (classification cannot
/// yield the software kind there); it exists so the facade's type parameter
/// has a default that compiles away.
#[derive(Debug, Default)]
pub struct NoSoftwareUart;

impl SoftwareUart for NoSoftwareUart {
    fn bind(_rx: PinId, _tx: PinId, _invert: bool, _capacity: usize) -> Self {
        Self
    }

    fn open(&mut self, _baud: u32) {}

    fn close(&mut self) {}

    fn read(&mut self) -> Option<u8> {
        None
    }

    fn peek(&mut self) -> Option<u8> {
        None
    }

    fn write(&mut self, _byte: u8) -> usize {
        0
    }

    fn available(&self) -> usize {
        0
    }

    fn flush(&mut self) {}

    fn overflow(&mut self) -> bool {
        false
    }

    fn listen(&mut self) -> bool {
        false
    }

    fn is_listening(&self) -> bool {
        false
    }

    fn stop_listening(&mut self) -> bool {
        false
    }
}

//! The byte-stream seam between the facade and its selected transport.
//!
//! Instead of re-deciding "software or hardware?" inside every facade
//! method, the decision is made once at construction: the facade holds a
//! [`Link`], and [`ByteChannel`] gives both variants one common surface.

use core::cell::RefCell;

use crate::driver::{HardwareUart, SoftwareUart};
use crate::types::PinId;

/// The byte-stream operations shared by every transport.
///
/// Neutral results, never errors: `None` when there is nothing to read, 0
/// for refused writes, mirroring the polled hardware API underneath.
pub trait ByteChannel {
    fn read(&mut self) -> Option<u8>;
    fn peek(&mut self) -> Option<u8>;
    fn write(&mut self, byte: u8) -> usize;
    /// Write as much of `buf` as the transport accepts; returns the count
    /// completed (a partial transfer, not an error).
    fn write_all(&mut self, buf: &[u8]) -> usize;
    /// Drain received bytes into `buf`; returns the count copied.
    fn read_into(&mut self, buf: &mut [u8]) -> usize;
    fn available(&self) -> usize;
    fn flush(&mut self);
    fn has_overrun(&mut self) -> bool;
}

/// Adapter over a registry-owned hardware channel.
///
/// Holds a borrow of the channel cell, not the driver itself: several
/// facades may be bound to the same singleton and validity decides which
/// one's calls go through.
pub struct HardwareLink<'r, H> {
    channel: &'r RefCell<H>,
}

impl<'r, H: HardwareUart> HardwareLink<'r, H> {
    pub(crate) fn new(channel: &'r RefCell<H>) -> Self {
        Self { channel }
    }

    pub(crate) fn channel(&self) -> &'r RefCell<H> {
        self.channel
    }
}

impl<'r, H: HardwareUart> ByteChannel for HardwareLink<'r, H> {
    fn read(&mut self) -> Option<u8> {
        self.channel.borrow_mut().read()
    }

    fn peek(&mut self) -> Option<u8> {
        self.channel.borrow_mut().peek()
    }

    fn write(&mut self, byte: u8) -> usize {
        self.channel.borrow_mut().write(byte)
    }

    fn write_all(&mut self, buf: &[u8]) -> usize {
        self.channel.borrow_mut().write_all(buf)
    }

    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        self.channel.borrow_mut().read_into(buf)
    }

    fn available(&self) -> usize {
        self.channel.borrow().available()
    }

    fn flush(&mut self) {
        self.channel.borrow_mut().flush();
    }

    fn has_overrun(&mut self) -> bool {
        self.channel.borrow_mut().has_overrun()
    }
}

/// Adapter owning a bit-banged channel.
///
/// The driver has no bulk operations, so `write_all`/`read_into` loop over
/// single bytes and stop at the first short write or empty read.
pub struct EmulatedLink<S> {
    uart: S,
}

impl<S: SoftwareUart> EmulatedLink<S> {
    pub(crate) fn bind(rx: PinId, tx: PinId, invert: bool, capacity: usize) -> Self {
        Self {
            uart: S::bind(rx, tx, invert, capacity),
        }
    }

    pub(crate) fn uart_mut(&mut self) -> &mut S {
        &mut self.uart
    }

    pub(crate) fn uart(&self) -> &S {
        &self.uart
    }
}

impl<S: SoftwareUart> ByteChannel for EmulatedLink<S> {
    fn read(&mut self) -> Option<u8> {
        self.uart.read()
    }

    fn peek(&mut self) -> Option<u8> {
        self.uart.peek()
    }

    fn write(&mut self, byte: u8) -> usize {
        self.uart.write(byte)
    }

    fn write_all(&mut self, buf: &[u8]) -> usize {
        let mut count = 0;
        for &byte in buf {
            let written = self.uart.write(byte);
            if written == 0 {
                break;
            }
            count += written;
        }
        count
    }

    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        let mut count = 0;
        for slot in buf.iter_mut() {
            match self.uart.read() {
                Some(byte) => {
                    *slot = byte;
                    count += 1;
                }
                None => break,
            }
        }
        count
    }

    fn available(&self) -> usize {
        self.uart.available()
    }

    fn flush(&mut self) {
        self.uart.flush();
    }

    fn has_overrun(&mut self) -> bool {
        self.uart.overflow()
    }
}

/// The transport a facade was bound to at construction.
pub enum Link<'r, H, S> {
    /// A registry-owned hardware channel.
    Hardware(HardwareLink<'r, H>),
    /// An owned bit-banged channel.
    Emulated(EmulatedLink<S>),
    /// No transport (invalid classification or absent channel).
    Unbound,
}

impl<'r, H: HardwareUart, S: SoftwareUart> ByteChannel for Link<'r, H, S> {
    fn read(&mut self) -> Option<u8> {
        match self {
            Self::Hardware(link) => link.read(),
            Self::Emulated(link) => link.read(),
            Self::Unbound => None,
        }
    }

    fn peek(&mut self) -> Option<u8> {
        match self {
            Self::Hardware(link) => link.peek(),
            Self::Emulated(link) => link.peek(),
            Self::Unbound => None,
        }
    }

    fn write(&mut self, byte: u8) -> usize {
        match self {
            Self::Hardware(link) => link.write(byte),
            Self::Emulated(link) => link.write(byte),
            Self::Unbound => 0,
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> usize {
        match self {
            Self::Hardware(link) => link.write_all(buf),
            Self::Emulated(link) => link.write_all(buf),
            Self::Unbound => 0,
        }
    }

    fn read_into(&mut self, buf: &mut [u8]) -> usize {
        match self {
            Self::Hardware(link) => link.read_into(buf),
            Self::Emulated(link) => link.read_into(buf),
            Self::Unbound => 0,
        }
    }

    fn available(&self) -> usize {
        match self {
            Self::Hardware(link) => link.available(),
            Self::Emulated(link) => link.available(),
            Self::Unbound => 0,
        }
    }

    fn flush(&mut self) {
        match self {
            Self::Hardware(link) => link.flush(),
            Self::Emulated(link) => link.flush(),
            Self::Unbound => {}
        }
    }

    fn has_overrun(&mut self) -> bool {
        match self {
            Self::Hardware(link) => link.has_overrun(),
            Self::Emulated(link) => link.has_overrun(),
            Self::Unbound => false,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::types::PinId;
    use std::vec::Vec;

    /// Software driver whose write refuses bytes from `stall_at` on.
    struct StallingUart {
        written: Vec<u8>,
        stall_at: usize,
        incoming: Vec<u8>,
    }

    impl StallingUart {
        fn new(stall_at: usize) -> Self {
            Self {
                written: Vec::new(),
                stall_at,
                incoming: Vec::new(),
            }
        }
    }

    impl SoftwareUart for StallingUart {
        fn bind(_rx: PinId, _tx: PinId, _invert: bool, _capacity: usize) -> Self {
            Self::new(usize::MAX)
        }

        fn open(&mut self, _baud: u32) {}

        fn close(&mut self) {}

        fn read(&mut self) -> Option<u8> {
            if self.incoming.is_empty() {
                None
            } else {
                Some(self.incoming.remove(0))
            }
        }

        fn peek(&mut self) -> Option<u8> {
            self.incoming.first().copied()
        }

        fn write(&mut self, byte: u8) -> usize {
            if self.written.len() >= self.stall_at {
                return 0;
            }
            self.written.push(byte);
            1
        }

        fn available(&self) -> usize {
            self.incoming.len()
        }

        fn flush(&mut self) {}

        fn overflow(&mut self) -> bool {
            false
        }

        fn listen(&mut self) -> bool {
            true
        }

        fn is_listening(&self) -> bool {
            true
        }

        fn stop_listening(&mut self) -> bool {
            true
        }
    }

    #[test]
    fn test_emulated_bulk_write_stops_at_short_write() {
        let mut link = EmulatedLink {
            uart: StallingUart::new(3),
        };
        assert_eq!(link.write_all(b"hello"), 3);
        assert_eq!(link.uart.written, b"hel");
    }

    #[test]
    fn test_emulated_bulk_read_stops_when_drained() {
        let mut uart = StallingUart::new(usize::MAX);
        uart.incoming = Vec::from(&b"ab"[..]);
        let mut link = EmulatedLink { uart };

        let mut buf = [0u8; 4];
        assert_eq!(link.read_into(&mut buf), 2);
        assert_eq!(&buf[..2], b"ab");
    }

    #[test]
    fn test_unbound_link_returns_neutral_values() {
        let mut link: Link<'_, crate::driver::LoopbackUart, StallingUart> = Link::Unbound;
        assert_eq!(link.read(), None);
        assert_eq!(link.peek(), None);
        assert_eq!(link.write(0x55), 0);
        assert_eq!(link.write_all(b"data"), 0);
        assert_eq!(link.available(), 0);
        assert!(!link.has_overrun());
        link.flush();
    }
}

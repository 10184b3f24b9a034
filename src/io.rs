//! `embedded-io` adapters for the facade (feature `embedded-io`).
//!
//! The facade's own surface degrades to sentinels by design; these impls are
//! the additive, `Result`-speaking alternative for callers built around
//! [`embedded_io::Read`]/[`embedded_io::Write`].

use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write};

use crate::driver::{HardwareUart, SoftwareUart};
use crate::facade::SerialFacade;

/// Error for the `embedded-io` view of a facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The facade is not bound to a usable transport.
    NotBound,
    /// The transport refused every byte of a non-empty write.
    WriteStalled,
}

impl embedded_io::Error for LinkError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NotBound => ErrorKind::NotConnected,
            Self::WriteStalled => ErrorKind::WriteZero,
        }
    }
}

impl<'r, H: HardwareUart, S: SoftwareUart> ErrorType for SerialFacade<'r, H, S> {
    type Error = LinkError;
}

impl<'r, H: HardwareUart, S: SoftwareUart> Read for SerialFacade<'r, H, S> {
    /// Drains up to `buf.len()` already-received bytes without blocking.
    /// `Ok(0)` means no data was waiting; poll [`ReadReady::read_ready`]
    /// first to distinguish.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if !self.is_valid() {
            return Err(LinkError::NotBound);
        }
        Ok(self.read_bytes(buf))
    }
}

impl<'r, H: HardwareUart, S: SoftwareUart> ReadReady for SerialFacade<'r, H, S> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        if !self.is_valid() {
            return Err(LinkError::NotBound);
        }
        Ok(self.available() > 0)
    }
}

impl<'r, H: HardwareUart, S: SoftwareUart> Write for SerialFacade<'r, H, S> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if !self.is_valid() {
            return Err(LinkError::NotBound);
        }
        if buf.is_empty() {
            return Ok(0);
        }
        match SerialFacade::write(self, buf) {
            0 => Err(LinkError::WriteStalled),
            n => Ok(n),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if !self.is_valid() {
            return Err(LinkError::NotBound);
        }
        SerialFacade::flush(self);
        Ok(())
    }
}

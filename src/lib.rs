//! Uniform serial facade over hardware UART channels and bit-banged
//! software serial.
//!
//! Higher-level firmware asks for a serial port by receive/transmit pin
//! numbers; this crate resolves the pins to the right transport and exposes
//! one byte-stream surface regardless of what ended up underneath.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: transport classification and open parameters
//!   ([`TransportKind`], [`OpenConfig`], [`PortStatus`])
//! - [`platform`]: the pin-to-transport classifier and platform capability
//!   tables ([`Platform`], [`SwapUartPlatform`], [`TripleUartPlatform`])
//! - [`driver`]: the vendor driver seams ([`HardwareUart`],
//!   [`SoftwareUart`]) and the in-tree [`LoopbackUart`]
//! - [`registry`]: the injectable owner of the hardware channel singletons
//!   and their shared pin-swap state ([`ChannelRegistry`])
//! - [`link`]: the common byte-stream seam ([`ByteChannel`], [`Link`])
//! - [`facade`]: the public component, [`SerialFacade`]
//!
//! # Example
//!
//! ```rust
//! use any_serial::{ChannelRegistry, LoopbackUart, OpenConfig, SerialFacade, SwapUartPlatform};
//!
//! let platform = SwapUartPlatform;
//! let registry: ChannelRegistry<LoopbackUart> =
//!     ChannelRegistry::new(LoopbackUart::new(), LoopbackUart::new());
//!
//! // Pins 3/1 resolve to the primary hardware channel.
//! let mut port: SerialFacade<'_, LoopbackUart> =
//!     SerialFacade::new(&platform, &registry, 3, 1, false);
//! port.open(OpenConfig::new(115_200));
//! assert!(port.is_valid());
//!
//! port.write(b"hello");
//! assert_eq!(port.read(), Some(b'h'));
//! ```
//!
//! # Failure policy
//!
//! There are no error returns on the facade: an invalid binding degrades
//! every operation to a neutral value (`None`, 0, `false`, no-op), matching
//! the polled hardware-access convention of the drivers underneath. Callers
//! check [`SerialFacade::is_valid`] or [`SerialFacade::status`] instead.
//! The optional `embedded-io` feature adds `Result`-speaking
//! `embedded_io::Read`/`embedded_io::Write` adapters on top.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`embedded-io`**: embedded-io adapters for the facade
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod driver;
pub mod facade;
#[cfg(feature = "embedded-io")]
pub mod io;
pub mod link;
pub mod platform;
pub mod registry;
pub mod types;

// Re-export main types at crate root
pub use driver::{HardwareUart, LoopbackUart, NoSoftwareUart, SoftwareUart};
pub use facade::SerialFacade;
#[cfg(feature = "embedded-io")]
pub use io::LinkError;
pub use link::{ByteChannel, Link};
pub use platform::{Caps, Platform, SwapUartPlatform, TripleUartPlatform};
pub use registry::ChannelRegistry;
pub use types::{
    DataBits, FrameConfig, OpenConfig, Parity, PinId, PortMode, PortStatus, StopBits,
    TransportKind, DEFAULT_BUFFER_CAPACITY, NO_PIN,
};

//! Pin-to-transport classification and platform capability tables.
//!
//! The two platform variants of the original firmware families differ only in
//! which channels exist and which extras (pin swap, software fallback,
//! open-time pin overrides) they support. Instead of duplicating the facade
//! per platform, the differences are captured in a small [`Caps`] table plus
//! a classification rule, both behind the [`Platform`] trait.

use crate::types::{PinId, TransportKind, NO_PIN};

/// Capability table for a platform profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Caps {
    /// Bit-banged software serial is available as a fallback transport.
    pub software_serial: bool,
    /// The primary channel can be remapped to an alternate pinout.
    pub pin_swap: bool,
    /// `open` may override the pins and polarity chosen at construction.
    pub open_pin_override: bool,
    /// The secondary channel is only usable with both pins assigned.
    pub secondary_requires_pins: bool,
}

/// Classifies a requested pin pair (or explicit port index) into a transport
/// kind and reports what the platform can do.
pub trait Platform {
    /// Classify a receive/transmit pin pair.
    fn classify(&self, rx: PinId, tx: PinId) -> TransportKind;

    /// Classify by explicit port index, falling back to pin classification
    /// when the index names no channel.
    fn classify_port(&self, port: usize, rx: PinId, tx: PinId) -> TransportKind {
        let _ = port;
        self.classify(rx, tx)
    }

    /// This platform's capability table.
    fn caps(&self) -> Caps;
}

/// Profile with one swappable full-duplex channel, a TX-only secondary
/// channel, and software serial on any other usable pin pair.
///
/// Classification rules:
/// - rx 3 / tx 1 -> [`TransportKind::Primary`] (default pinout)
/// - rx 13 / tx 15 -> [`TransportKind::PrimaryAltPins`] (remapped pinout)
/// - tx 2, no rx -> [`TransportKind::Secondary`] (TX-only)
/// - any other pair of usable GPIOs -> [`TransportKind::Software`]
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwapUartPlatform;

impl SwapUartPlatform {
    const MAX_GPIO: PinId = 16;

    fn usable(pin: PinId) -> bool {
        (0..=Self::MAX_GPIO).contains(&pin)
    }
}

impl Platform for SwapUartPlatform {
    fn classify(&self, rx: PinId, tx: PinId) -> TransportKind {
        match (rx, tx) {
            (3, 1) => TransportKind::Primary,
            (13, 15) => TransportKind::PrimaryAltPins,
            (NO_PIN, 2) => TransportKind::Secondary,
            _ if Self::usable(rx) && Self::usable(tx) && rx != tx => TransportKind::Software,
            _ => TransportKind::Invalid,
        }
    }

    fn caps(&self) -> Caps {
        Caps {
            software_serial: true,
            pin_swap: true,
            open_pin_override: false,
            secondary_requires_pins: false,
        }
    }
}

/// Profile with three full-duplex hardware channels addressed by port index,
/// no pin swap, and no software serial.
///
/// The secondary channel has no fixed pinout and is only usable once both
/// pins are assigned (at construction or at open time); the other two have
/// default pinouts that pin classification recognizes.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TripleUartPlatform;

impl Platform for TripleUartPlatform {
    fn classify(&self, rx: PinId, tx: PinId) -> TransportKind {
        match (rx, tx) {
            (3, 1) => TransportKind::Primary,
            (9, 10) => TransportKind::Secondary,
            (16, 17) => TransportKind::Tertiary,
            _ => TransportKind::Invalid,
        }
    }

    fn classify_port(&self, port: usize, rx: PinId, tx: PinId) -> TransportKind {
        match port {
            0 => TransportKind::Primary,
            1 => TransportKind::Secondary,
            2 => TransportKind::Tertiary,
            _ => self.classify(rx, tx),
        }
    }

    fn caps(&self) -> Caps {
        Caps {
            software_serial: false,
            pin_swap: false,
            open_pin_override: true,
            secondary_requires_pins: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_platform_fixed_pinouts() {
        let p = SwapUartPlatform;
        assert_eq!(p.classify(3, 1), TransportKind::Primary);
        assert_eq!(p.classify(13, 15), TransportKind::PrimaryAltPins);
        assert_eq!(p.classify(NO_PIN, 2), TransportKind::Secondary);
    }

    #[test]
    fn test_swap_platform_software_fallback() {
        let p = SwapUartPlatform;
        assert_eq!(p.classify(12, 14), TransportKind::Software);
        assert_eq!(p.classify(0, 16), TransportKind::Software);
    }

    #[test]
    fn test_swap_platform_rejects_unusable_pins() {
        let p = SwapUartPlatform;
        assert_eq!(p.classify(NO_PIN, NO_PIN), TransportKind::Invalid);
        assert_eq!(p.classify(5, 5), TransportKind::Invalid);
        assert_eq!(p.classify(42, 4), TransportKind::Invalid);
    }

    #[test]
    fn test_triple_platform_port_index() {
        let p = TripleUartPlatform;
        assert_eq!(p.classify_port(0, NO_PIN, NO_PIN), TransportKind::Primary);
        assert_eq!(p.classify_port(1, NO_PIN, NO_PIN), TransportKind::Secondary);
        assert_eq!(p.classify_port(2, NO_PIN, NO_PIN), TransportKind::Tertiary);
    }

    #[test]
    fn test_triple_platform_bad_port_falls_back_to_pins() {
        let p = TripleUartPlatform;
        assert_eq!(p.classify_port(7, 16, 17), TransportKind::Tertiary);
        assert_eq!(p.classify_port(7, 12, 14), TransportKind::Invalid);
    }

    #[test]
    fn test_triple_platform_no_software_fallback() {
        let p = TripleUartPlatform;
        assert_eq!(p.classify(12, 14), TransportKind::Invalid);
        assert!(!p.caps().software_serial);
    }
}

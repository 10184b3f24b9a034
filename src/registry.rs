//! Hardware channel registry: the process-wide UART singletons and their
//! shared swap state, as one explicit, injectable object.
//!
//! The legacy shim kept the primary channel's pin-swap state in a file-scope
//! static, which made the "at most one facade active per swap state"
//! invariant untestable. Here every facade takes a registry reference at
//! construction, so tests can run as many independent registries as they
//! like.

use core::cell::{Cell, RefCell};

use crate::driver::HardwareUart;
use crate::types::TransportKind;

/// Owns the per-channel driver instances and the primary channel's swap
/// flag.
///
/// Channels the platform lacks are simply absent; a facade bound to an
/// absent channel is invalid and degrades to sentinel results. Interior
/// mutability is `RefCell`/`Cell` because the whole component models
/// single-threaded direct hardware access.
#[derive(Debug, Default)]
pub struct ChannelRegistry<H> {
    primary: Option<RefCell<H>>,
    secondary: Option<RefCell<H>>,
    tertiary: Option<RefCell<H>>,
    swap_active: Cell<bool>,
}

impl<H: HardwareUart> ChannelRegistry<H> {
    /// Registry with no channels at all (software serial only).
    pub fn empty() -> Self {
        Self {
            primary: None,
            secondary: None,
            tertiary: None,
            swap_active: Cell::new(false),
        }
    }

    /// Registry with a primary and secondary channel.
    pub fn new(primary: H, secondary: H) -> Self {
        Self {
            primary: Some(RefCell::new(primary)),
            secondary: Some(RefCell::new(secondary)),
            tertiary: None,
            swap_active: Cell::new(false),
        }
    }

    /// Registry with all three channels.
    pub fn with_tertiary(primary: H, secondary: H, tertiary: H) -> Self {
        Self {
            tertiary: Some(RefCell::new(tertiary)),
            ..Self::new(primary, secondary)
        }
    }

    /// The driver cell backing `kind`, if that channel exists. Both primary
    /// kinds resolve to the same singleton.
    pub fn channel(&self, kind: TransportKind) -> Option<&RefCell<H>> {
        match kind {
            TransportKind::Primary | TransportKind::PrimaryAltPins => self.primary.as_ref(),
            TransportKind::Secondary => self.secondary.as_ref(),
            TransportKind::Tertiary => self.tertiary.as_ref(),
            TransportKind::Software | TransportKind::Invalid => None,
        }
    }

    /// Whether the primary channel currently sits on its alternate pinout.
    pub fn swap_active(&self) -> bool {
        self.swap_active.get()
    }

    pub(crate) fn set_swap_active(&self, active: bool) {
        self.swap_active.set(active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::LoopbackUart;

    #[test]
    fn test_primary_kinds_share_one_channel() {
        let registry: ChannelRegistry<LoopbackUart> =
            ChannelRegistry::new(LoopbackUart::new(), LoopbackUart::new());

        let a = registry.channel(TransportKind::Primary).unwrap() as *const _;
        let b = registry.channel(TransportKind::PrimaryAltPins).unwrap() as *const _;
        assert_eq!(a, b);
    }

    #[test]
    fn test_absent_channels_resolve_to_none() {
        let registry: ChannelRegistry<LoopbackUart> = ChannelRegistry::empty();
        assert!(registry.channel(TransportKind::Primary).is_none());
        assert!(registry.channel(TransportKind::Tertiary).is_none());
        assert!(registry.channel(TransportKind::Software).is_none());

        let registry = ChannelRegistry::new(LoopbackUart::<64>::new(), LoopbackUart::new());
        assert!(registry.channel(TransportKind::Secondary).is_some());
        assert!(registry.channel(TransportKind::Tertiary).is_none());
    }

    #[test]
    fn test_swap_flag_starts_inactive() {
        let registry: ChannelRegistry<LoopbackUart> = ChannelRegistry::empty();
        assert!(!registry.swap_active());
        registry.set_swap_active(true);
        assert!(registry.swap_active());
    }
}

//! The serial facade: one uniform byte-stream surface over whichever
//! transport the requested pins resolve to.

use core::cell::RefCell;

use crate::driver::{HardwareUart, NoSoftwareUart, SoftwareUart};
use crate::link::{ByteChannel, EmulatedLink, HardwareLink, Link};
use crate::platform::{Caps, Platform};
use crate::registry::ChannelRegistry;
use crate::types::{OpenConfig, PinId, PortStatus, TransportKind, DEFAULT_BUFFER_CAPACITY};

/// A serial port bound to a hardware channel or a bit-banged fallback,
/// chosen at construction from the requested pins.
///
/// Every operation degrades to a neutral value (`None`, 0, `false`, no-op)
/// when the facade is not valid, mirroring the polled hardware API this
/// wraps; callers that want an explicit answer use [`is_valid`] or
/// [`status`] instead of inferring failure from sentinels.
///
/// A facade is valid when its transport kind names a channel that exists
/// and, for the two kinds sharing the primary channel singleton, when the
/// registry's swap state matches the kind: at most one facade is validly
/// active on that channel for a given swap state.
///
/// Dropping a facade closes it.
///
/// [`is_valid`]: SerialFacade::is_valid
/// [`status`]: SerialFacade::status
pub struct SerialFacade<'r, H: HardwareUart, S: SoftwareUart = NoSoftwareUart> {
    registry: &'r ChannelRegistry<H>,
    caps: Caps,
    kind: TransportKind,
    link: Link<'r, H, S>,
    rx_pin: PinId,
    tx_pin: PinId,
    invert: bool,
    /// Last baud rate passed to `open`; 0 if never opened or last open
    /// failed.
    baud: u32,
    /// Whether THIS facade's open activated the shared pin swap. Close only
    /// deactivates the swap for its activator, so an unbalanced close never
    /// disturbs the flag.
    swap_owner: bool,
}

impl<'r, H: HardwareUart, S: SoftwareUart> SerialFacade<'r, H, S> {
    /// Classify `rx`/`tx` on `platform` and bind the matching transport.
    ///
    /// A software classification allocates the bit-banged instance with the
    /// default receive buffer capacity; hardware kinds bind to the registry
    /// channel without allocating.
    pub fn new<P: Platform>(
        platform: &P,
        registry: &'r ChannelRegistry<H>,
        rx: PinId,
        tx: PinId,
        invert: bool,
    ) -> Self {
        Self::with_capacity(platform, registry, rx, tx, invert, DEFAULT_BUFFER_CAPACITY)
    }

    /// Like [`new`](Self::new) with an explicit receive buffer capacity for
    /// the bit-banged case.
    pub fn with_capacity<P: Platform>(
        platform: &P,
        registry: &'r ChannelRegistry<H>,
        rx: PinId,
        tx: PinId,
        invert: bool,
        capacity: usize,
    ) -> Self {
        let kind = platform.classify(rx, tx);
        Self::bind(platform.caps(), registry, kind, rx, tx, invert, capacity)
    }

    /// Bind by explicit port index (platforms addressing channels by
    /// number). An out-of-range index falls back to pin classification.
    pub fn with_port<P: Platform>(
        platform: &P,
        registry: &'r ChannelRegistry<H>,
        port: usize,
        rx: PinId,
        tx: PinId,
        invert: bool,
    ) -> Self {
        let kind = platform.classify_port(port, rx, tx);
        Self::bind(
            platform.caps(),
            registry,
            kind,
            rx,
            tx,
            invert,
            DEFAULT_BUFFER_CAPACITY,
        )
    }

    fn bind(
        caps: Caps,
        registry: &'r ChannelRegistry<H>,
        kind: TransportKind,
        rx: PinId,
        tx: PinId,
        invert: bool,
        capacity: usize,
    ) -> Self {
        let link = match kind {
            TransportKind::Software => Link::Emulated(EmulatedLink::bind(rx, tx, invert, capacity)),
            k if k.is_hardware() => match registry.channel(k) {
                Some(channel) => Link::Hardware(HardwareLink::new(channel)),
                None => Link::Unbound,
            },
            _ => Link::Unbound,
        };
        Self {
            registry,
            caps,
            kind,
            link,
            rx_pin: rx,
            tx_pin: tx,
            invert,
            baud: 0,
            swap_owner: false,
        }
    }

    /// Whether operations on this facade currently reach a transport.
    pub fn is_valid(&self) -> bool {
        match self.kind {
            TransportKind::Primary => self.hw_bound() && !self.registry.swap_active(),
            TransportKind::PrimaryAltPins => self.hw_bound() && self.registry.swap_active(),
            TransportKind::Secondary => {
                self.hw_bound()
                    && (!self.caps.secondary_requires_pins
                        || (self.rx_pin >= 0 && self.tx_pin >= 0))
            }
            TransportKind::Tertiary => self.hw_bound(),
            TransportKind::Software => matches!(self.link, Link::Emulated(_)),
            TransportKind::Invalid => false,
        }
    }

    pub fn transport_kind(&self) -> TransportKind {
        self.kind
    }

    pub fn rx_pin(&self) -> PinId {
        self.rx_pin
    }

    pub fn tx_pin(&self) -> PinId {
        self.tx_pin
    }

    /// Explicit binding snapshot, for callers that do not want to infer
    /// failure from sentinel returns.
    pub fn status(&self) -> PortStatus {
        PortStatus {
            kind: self.kind,
            rx_pin: self.rx_pin,
            tx_pin: self.tx_pin,
            baud: self.baud,
            valid: self.is_valid(),
        }
    }

    fn hw_bound(&self) -> bool {
        matches!(self.link, Link::Hardware(_))
    }

    fn hardware(&self) -> Option<&'r RefCell<H>> {
        match &self.link {
            Link::Hardware(link) => Some(link.channel()),
            _ => None,
        }
    }

    fn valid_hardware(&self) -> Option<&'r RefCell<H>> {
        if self.is_valid() && !self.kind.is_software() {
            self.hardware()
        } else {
            None
        }
    }

    /// Configure and enable the selected transport.
    ///
    /// Failure is silent by design: an invalid facade records a baud rate of
    /// 0 and returns, so callers check [`is_valid`](Self::is_valid) (or a
    /// zeroed [`status`](Self::status) baud) afterwards.
    pub fn open(&mut self, cfg: OpenConfig) {
        self.baud = cfg.baud;
        if self.caps.open_pin_override {
            if let Some(rx) = cfg.rx_pin {
                self.rx_pin = rx;
            }
            if let Some(tx) = cfg.tx_pin {
                self.tx_pin = tx;
            }
            if cfg.invert == Some(true) {
                self.invert = true;
            }
        }

        // One-time swap activation: the first alt-pin facade to open
        // performs the hardware remap; later ones find the flag set and
        // take the plain forwarding path below.
        if self.kind == TransportKind::PrimaryAltPins && !self.registry.swap_active() {
            if let Some(channel) = self.hardware() {
                let mut hw = channel.borrow_mut();
                hw.open(&cfg, self.rx_pin, self.tx_pin, self.invert);
                hw.swap_pins(self.tx_pin);
                drop(hw);
                self.registry.set_swap_active(true);
                self.swap_owner = true;
                return;
            }
        }

        if !self.is_valid() {
            self.baud = 0;
            return;
        }

        match &mut self.link {
            Link::Emulated(link) => link.uart_mut().open(cfg.baud),
            Link::Hardware(link) => {
                link.channel()
                    .borrow_mut()
                    .open(&cfg, self.rx_pin, self.tx_pin, self.invert);
            }
            Link::Unbound => {}
        }
    }

    /// Release the transport. The facade that activated the shared pin swap
    /// also undoes the remap and clears the registry flag; any other close
    /// leaves the flag alone.
    pub fn close(&mut self) {
        if !self.is_valid() {
            return;
        }
        match &mut self.link {
            Link::Emulated(link) => link.uart_mut().close(),
            Link::Hardware(link) => {
                let channel = link.channel();
                if self.swap_owner && self.registry.swap_active() {
                    let mut hw = channel.borrow_mut();
                    hw.close();
                    hw.swap_pins(self.tx_pin);
                    drop(hw);
                    self.registry.set_swap_active(false);
                    self.swap_owner = false;
                } else {
                    channel.borrow_mut().close();
                }
            }
            Link::Unbound => {}
        }
    }

    /// Pop the next received byte; `None` when nothing is waiting or the
    /// facade is invalid.
    pub fn read(&mut self) -> Option<u8> {
        if self.is_valid() {
            self.link.read()
        } else {
            None
        }
    }

    /// Look at the next received byte without consuming it.
    pub fn peek(&mut self) -> Option<u8> {
        if self.is_valid() {
            self.link.peek()
        } else {
            None
        }
    }

    /// Queue one byte for transmission; returns the count accepted (0 when
    /// refused or invalid).
    pub fn write_byte(&mut self, byte: u8) -> usize {
        if self.is_valid() {
            self.link.write(byte)
        } else {
            0
        }
    }

    /// Write as much of `buf` as the transport accepts, returning the count
    /// completed. A short count is a partial transfer, not an error.
    pub fn write(&mut self, buf: &[u8]) -> usize {
        if self.is_valid() {
            self.link.write_all(buf)
        } else {
            0
        }
    }

    /// [`write`](Self::write) for string payloads.
    pub fn write_str(&mut self, s: &str) -> usize {
        self.write(s.as_bytes())
    }

    /// Drain received bytes into `buf`, returning the count copied.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        if self.is_valid() {
            self.link.read_into(buf)
        } else {
            0
        }
    }

    /// Number of received bytes waiting.
    pub fn available(&self) -> usize {
        if self.is_valid() {
            self.link.available()
        } else {
            0
        }
    }

    /// Wait for queued transmit data to drain.
    pub fn flush(&mut self) {
        if self.is_valid() {
            self.link.flush();
        }
    }

    /// Whether the receive path overran since the last query.
    pub fn has_overrun(&mut self) -> bool {
        if self.is_valid() {
            self.link.has_overrun()
        } else {
            false
        }
    }

    /// Alias of [`has_overrun`](Self::has_overrun).
    pub fn overflow(&mut self) -> bool {
        self.has_overrun()
    }

    // ------------------------------------------------------------------
    // Hardware channel extensions
    // ------------------------------------------------------------------

    /// Remap the primary channel between its default and alternate pinout.
    ///
    /// Toggles this facade's own transport kind together with the registry
    /// swap flag and adopts (or drops) swap ownership, so a later
    /// [`close`](Self::close) stays balanced. No-op unless the facade is
    /// valid, on a primary kind, and the platform supports pin swap.
    pub fn swap(&mut self, tx_pin: PinId) {
        if !self.caps.pin_swap || !self.is_valid() || !self.kind.uses_primary_channel() {
            return;
        }
        let Some(channel) = self.hardware() else {
            return;
        };
        let now_active = !self.registry.swap_active();
        channel.borrow_mut().swap_pins(tx_pin);
        self.registry.set_swap_active(now_active);
        self.kind = match self.kind {
            TransportKind::Primary => TransportKind::PrimaryAltPins,
            _ => TransportKind::Primary,
        };
        self.swap_owner = now_active;
    }

    /// The rate the transport is running at: the peripheral's own report
    /// for a valid hardware binding, otherwise the last rate passed to
    /// [`open`](Self::open) (0 if never opened).
    pub fn baud_rate(&self) -> u32 {
        match self.valid_hardware() {
            Some(channel) => channel.borrow().baud_rate(),
            None => self.baud,
        }
    }

    /// Route or unroute debug output through this channel (hardware only).
    pub fn set_debug_output(&mut self, enable: bool) {
        if let Some(channel) = self.valid_hardware() {
            channel.borrow_mut().set_debug_output(enable);
        }
    }

    /// Whether the transmit line is driven (hardware only; `false`
    /// otherwise).
    pub fn is_tx_enabled(&self) -> bool {
        match self.valid_hardware() {
            Some(channel) => channel.borrow().is_tx_enabled(),
            None => false,
        }
    }

    /// Whether the receive line is sampled (hardware only; `false`
    /// otherwise).
    pub fn is_rx_enabled(&self) -> bool {
        match self.valid_hardware() {
            Some(channel) => channel.borrow().is_rx_enabled(),
            None => false,
        }
    }

    /// Whether the receive path flagged a framing/parity error (hardware
    /// only; `false` otherwise).
    pub fn has_rx_error(&mut self) -> bool {
        match self.valid_hardware() {
            Some(channel) => channel.borrow_mut().has_rx_error(),
            None => false,
        }
    }

    /// Begin baud-rate auto-detection (hardware only).
    pub fn start_detect_baudrate(&mut self) {
        if let Some(channel) = self.valid_hardware() {
            channel.borrow_mut().start_detect_baudrate();
        }
    }

    /// Rate detected so far; 0 if none or not hardware.
    pub fn test_baudrate(&mut self) -> u32 {
        match self.valid_hardware() {
            Some(channel) => channel.borrow_mut().test_baudrate(),
            None => 0,
        }
    }

    /// Detect the line rate, giving up after `timeout_ms` (forwarded
    /// verbatim to the driver); 0 if none or not hardware.
    pub fn detect_baudrate(&mut self, timeout_ms: u32) -> u32 {
        match self.valid_hardware() {
            Some(channel) => channel.borrow_mut().detect_baudrate(timeout_ms),
            None => 0,
        }
    }

    // ------------------------------------------------------------------
    // Bit-banged channel extensions
    // ------------------------------------------------------------------

    /// Make this channel the listening one.
    ///
    /// On a platform without software serial this reports `true`
    /// unconditionally; some callers probe `listen` before use and the
    /// hardware channels are always able to receive. Preserved legacy
    /// behavior.
    pub fn listen(&mut self) -> bool {
        if !self.caps.software_serial {
            return true;
        }
        if self.is_valid() {
            if let Link::Emulated(link) = &mut self.link {
                return link.uart_mut().listen();
            }
        }
        false
    }

    /// Whether this channel is the listening one (`false` unless valid and
    /// bit-banged).
    pub fn is_listening(&self) -> bool {
        if self.is_valid() {
            if let Link::Emulated(link) = &self.link {
                return link.uart().is_listening();
            }
        }
        false
    }

    /// Stop receiving on this channel (`false` unless valid and
    /// bit-banged).
    pub fn stop_listening(&mut self) -> bool {
        if self.is_valid() {
            if let Link::Emulated(link) = &mut self.link {
                return link.uart_mut().stop_listening();
            }
        }
        false
    }
}

impl<'r, H: HardwareUart, S: SoftwareUart> Drop for SerialFacade<'r, H, S> {
    fn drop(&mut self) {
        self.close();
    }
}

//! Core types: transport classification, frame configuration, open parameters.

/// Logical GPIO pin number. Negative means "not connected".
pub type PinId = i8;

/// Sentinel for an unconnected pin.
pub const NO_PIN: PinId = -1;

/// Default receive buffer capacity for a bit-banged channel.
pub const DEFAULT_BUFFER_CAPACITY: usize = 64;

/// Which underlying serial implementation a facade is bound to.
///
/// Classified once at construction from the requested pin pair (or explicit
/// port index) and changed afterwards only by [`swap`], which toggles between
/// [`Primary`] and [`PrimaryAltPins`].
///
/// [`swap`]: crate::facade::SerialFacade::swap
/// [`Primary`]: TransportKind::Primary
/// [`PrimaryAltPins`]: TransportKind::PrimaryAltPins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportKind {
    /// Primary hardware channel on its default pinout.
    Primary,
    /// Primary hardware channel remapped to its alternate pinout.
    PrimaryAltPins,
    /// Secondary hardware channel.
    Secondary,
    /// Tertiary hardware channel.
    Tertiary,
    /// Bit-banged software serial on arbitrary GPIO pins.
    Software,
    /// No matching peripheral for the requested pins.
    Invalid,
}

impl TransportKind {
    /// True for any of the hardware channel kinds.
    #[inline]
    #[must_use]
    pub const fn is_hardware(self) -> bool {
        matches!(
            self,
            Self::Primary | Self::PrimaryAltPins | Self::Secondary | Self::Tertiary
        )
    }

    /// True for the bit-banged kind.
    #[inline]
    #[must_use]
    pub const fn is_software(self) -> bool {
        matches!(self, Self::Software)
    }

    /// True for the two kinds that share the primary channel singleton.
    #[inline]
    #[must_use]
    pub const fn uses_primary_channel(self) -> bool {
        matches!(self, Self::Primary | Self::PrimaryAltPins)
    }
}

/// Number of data bits per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

/// Parity bit generation/checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

/// UART frame shape. Defaults to 8N1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameConfig {
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl FrameConfig {
    /// 8 data bits, no parity, 1 stop bit.
    pub const EIGHT_N_ONE: Self = Self {
        data_bits: DataBits::Eight,
        parity: Parity::None,
        stop_bits: StopBits::One,
    };
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self::EIGHT_N_ONE
    }
}

/// Which directions a channel is driven in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortMode {
    /// Full duplex.
    #[default]
    RxTx,
    /// Receive only.
    RxOnly,
    /// Transmit only.
    TxOnly,
}

/// Parameters passed to [`SerialFacade::open`].
///
/// Only the baud rate is mandatory; everything else defaults to the common
/// case (8N1, full duplex, no pin overrides). The pin/polarity overrides are
/// honored only on a platform whose capability table allows open-time pin
/// adjustment ([`Caps::open_pin_override`]); elsewhere they are ignored.
///
/// [`SerialFacade::open`]: crate::facade::SerialFacade::open
/// [`Caps::open_pin_override`]: crate::platform::Caps::open_pin_override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub struct OpenConfig {
    /// Requested baud rate.
    pub baud: u32,
    /// Frame shape.
    pub frame: FrameConfig,
    /// Direction mode.
    pub mode: PortMode,
    /// Open-time receive pin override.
    pub rx_pin: Option<PinId>,
    /// Open-time transmit pin override.
    pub tx_pin: Option<PinId>,
    /// Open-time polarity override (`Some(true)` forces inverted logic).
    pub invert: Option<bool>,
    /// Driver-level timeout, forwarded verbatim.
    pub timeout_ms: u32,
}

impl OpenConfig {
    /// Open at `baud` with default framing and no overrides.
    pub const fn new(baud: u32) -> Self {
        Self {
            baud,
            frame: FrameConfig::EIGHT_N_ONE,
            mode: PortMode::RxTx,
            rx_pin: None,
            tx_pin: None,
            invert: None,
            timeout_ms: 0,
        }
    }

    pub const fn frame(mut self, frame: FrameConfig) -> Self {
        self.frame = frame;
        self
    }

    pub const fn mode(mut self, mode: PortMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override the pins at open time (pin-override platforms only).
    pub const fn pins(mut self, rx: PinId, tx: PinId) -> Self {
        self.rx_pin = Some(rx);
        self.tx_pin = Some(tx);
        self
    }

    pub const fn inverted(mut self, invert: bool) -> Self {
        self.invert = Some(invert);
        self
    }

    pub const fn timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Snapshot of a facade's binding, for callers that want an explicit status
/// instead of inferring failure from sentinel return values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub struct PortStatus {
    pub kind: TransportKind,
    pub rx_pin: PinId,
    pub tx_pin: PinId,
    /// Last requested baud rate (0 if never opened or last open failed).
    pub baud: u32,
    pub valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_kind_predicates() {
        assert!(TransportKind::Primary.is_hardware());
        assert!(TransportKind::PrimaryAltPins.uses_primary_channel());
        assert!(!TransportKind::Secondary.uses_primary_channel());
        assert!(TransportKind::Software.is_software());
        assert!(!TransportKind::Invalid.is_hardware());
        assert!(!TransportKind::Invalid.is_software());
    }

    #[test]
    fn test_open_config_builder() {
        let cfg = OpenConfig::new(115_200)
            .mode(PortMode::TxOnly)
            .pins(13, 15)
            .inverted(true)
            .timeout_ms(250);
        assert_eq!(cfg.baud, 115_200);
        assert_eq!(cfg.frame, FrameConfig::EIGHT_N_ONE);
        assert_eq!(cfg.mode, PortMode::TxOnly);
        assert_eq!(cfg.rx_pin, Some(13));
        assert_eq!(cfg.tx_pin, Some(15));
        assert_eq!(cfg.invert, Some(true));
        assert_eq!(cfg.timeout_ms, 250);
    }

    #[test]
    fn test_frame_config_default_is_8n1() {
        assert_eq!(FrameConfig::default(), FrameConfig::EIGHT_N_ONE);
    }
}

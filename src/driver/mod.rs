//! Driver seams consumed by the facade.
//!
//! The actual register-level UART drivers and the timing-critical bit-banged
//! implementation are vendor code and live outside this crate; they plug in
//! through [`HardwareUart`] and [`SoftwareUart`]. [`LoopbackUart`] is an
//! in-tree reference driver backed by a bounded FIFO, useful for tests and
//! for wiring up a facade without hardware.

pub mod hardware;
pub mod loopback;
pub mod software;

pub use hardware::HardwareUart;
pub use loopback::LoopbackUart;
pub use software::{NoSoftwareUart, SoftwareUart};

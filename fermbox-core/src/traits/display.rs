//! Display output traits

use core::future::Future;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer to the display failed
    Bus,
    /// Drawing into the frame buffer failed
    Draw,
}

/// A buffered display that can push its frame to the panel
///
/// Drawing happens on the buffer through `embedded_graphics::DrawTarget`;
/// nothing is visible until [`present`](FrameSink::present) completes.
pub trait FrameSink {
    /// Send the whole frame buffer to the panel
    fn present(&mut self) -> impl Future<Output = Result<(), DisplayError>>;
}

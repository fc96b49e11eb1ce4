//! Push-button input trait

/// A momentary push-button
///
/// Implementations hide the electrical polarity: `is_pressed` is the
/// logical state regardless of pull-up or pull-down wiring.
pub trait Button {
    /// Sample the button
    ///
    /// Takes `&mut self` because reading a GPIO can require mutable access.
    fn is_pressed(&mut self) -> bool;
}

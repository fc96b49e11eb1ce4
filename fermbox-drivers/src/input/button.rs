//! Active-low push-button
//!
//! Button wired between the pin and ground with a pull-up: released reads
//! HIGH, pressed reads LOW. Not debounced; the control loop polls slowly
//! enough that contact bounce only shows up as a missed or extra step.

use embedded_hal::digital::InputPin;
use fermbox_core::traits::Button;

/// Push-button on a pulled-up input pin
pub struct ActiveLowButton<P> {
    pin: P,
}

impl<P: InputPin> ActiveLowButton<P> {
    /// Wrap an input pin configured with a pull-up
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> Button for ActiveLowButton<P> {
    fn is_pressed(&mut self) -> bool {
        // A failed read counts as released
        self.pin.is_low().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    struct MockInput {
        level: Result<bool, ErrorKind>,
    }

    impl ErrorType for MockInput {
        type Error = ErrorKind;
    }

    impl InputPin for MockInput {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.level
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.level.map(|high| !high)
        }
    }

    #[test]
    fn test_low_is_pressed() {
        let mut button = ActiveLowButton::new(MockInput { level: Ok(false) });
        assert!(button.is_pressed());
    }

    #[test]
    fn test_high_is_released() {
        let mut button = ActiveLowButton::new(MockInput { level: Ok(true) });
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_read_error_is_released() {
        let mut button = ActiveLowButton::new(MockInput {
            level: Err(ErrorKind::Other),
        });
        assert!(!button.is_pressed());
    }
}

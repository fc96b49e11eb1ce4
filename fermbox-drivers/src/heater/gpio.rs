//! GPIO heater output
//!
//! Heater relay (or SSR/MOSFET) switched by a single GPIO pin.

use embedded_hal::digital::OutputPin;
use fermbox_core::traits::HeaterOutput;

/// GPIO heater output
///
/// Controls a heater via a GPIO pin. The pin can be configured as
/// active-high (default) or active-low.
pub struct GpioHeater<P> {
    pin: P,
    /// If true, heater ON = pin LOW
    inverted: bool,
    /// Current logical state (true = heater on)
    on: bool,
}

impl<P: OutputPin> GpioHeater<P> {
    /// Create a new GPIO heater output
    ///
    /// The heater is driven off before this returns.
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, heater is ON when pin is LOW (for active-low relay boards)
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut heater = Self {
            pin,
            inverted,
            on: false,
        };
        heater.set_on(false);
        heater
    }

    /// Create a new GPIO heater with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a new GPIO heater with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> HeaterOutput for GpioHeater<P> {
    fn set_on(&mut self, on: bool) {
        let result = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };

        // A failed write leaves the recorded state at the last level reached
        if result.is_ok() {
            self.on = on;
        }
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self { high: false }
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }
    }

    #[test]
    fn test_active_high_heater() {
        let mut heater = GpioHeater::new_active_high(MockPin::new());

        // Initially off
        assert!(!heater.is_on());
        assert!(!heater.pin.high);

        heater.set_on(true);
        assert!(heater.is_on());
        assert!(heater.pin.high);

        heater.set_on(false);
        assert!(!heater.is_on());
        assert!(!heater.pin.high);
    }

    #[test]
    fn test_active_low_heater() {
        let mut heater = GpioHeater::new_active_low(MockPin::new());

        // Initially off (pin is high for active-low)
        assert!(!heater.is_on());
        assert!(heater.pin.high);

        heater.set_on(true);
        assert!(heater.is_on());
        assert!(!heater.pin.high);

        heater.set_on(false);
        assert!(heater.pin.high);
    }

    /// Pin whose writes can be made to fail
    struct FlakyPin {
        high: bool,
        fail: bool,
    }

    impl ErrorType for FlakyPin {
        type Error = ErrorKind;
    }

    impl OutputPin for FlakyPin {
        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.high = false;
            Ok(())
        }
    }

    #[test]
    fn test_failed_write_keeps_reported_state() {
        let mut heater = GpioHeater::new_active_high(FlakyPin {
            high: false,
            fail: false,
        });

        heater.pin.fail = true;
        heater.set_on(true);
        assert!(!heater.is_on());
        assert!(!heater.pin.high);

        heater.pin.fail = false;
        heater.set_on(true);
        assert!(heater.is_on());

        heater.pin.fail = true;
        heater.set_on(false);
        assert!(heater.is_on());
        assert!(heater.pin.high);
    }

    #[test]
    fn test_constructor_forces_off() {
        let heater = GpioHeater::new_active_high(MockPin { high: true });
        assert!(!heater.release().high);
    }
}

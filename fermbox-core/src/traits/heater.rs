//! Heater and temperature sensor traits

use core::future::Future;

/// Value reported by common probe drivers when the device does not answer
pub const DISCONNECTED_SENTINEL_C: f32 = -127.0;

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// No device answered the bus reset
    NoPresence,
    /// Data read back from the device failed its checksum
    CrcMismatch,
    /// The device reported the disconnected sentinel
    Disconnected,
}

/// Classify a raw Celsius value from a driver that signals failure in-band
///
/// Drivers following the `-127.0` convention return that value instead of
/// an error when the probe drops off the bus. It must never be mistaken
/// for a very cold reading.
pub fn classify_celsius(celsius: f32) -> Result<f32, SensorError> {
    if celsius == DISCONNECTED_SENTINEL_C || celsius.is_nan() {
        Err(SensorError::Disconnected)
    } else {
        Ok(celsius)
    }
}

/// Trait for temperature sensors
///
/// Reading is split in two because conversion takes time on most digital
/// probes: request a conversion, wait [`conversion_time_ms`], then read.
///
/// [`conversion_time_ms`]: TemperatureSensor::conversion_time_ms
pub trait TemperatureSensor {
    /// Start a temperature conversion
    fn request_conversion(&mut self) -> impl Future<Output = Result<(), SensorError>>;

    /// Read the last converted value in degrees Celsius
    fn read_celsius(&mut self) -> impl Future<Output = Result<f32, SensorError>>;

    /// Time the sensor needs between request and read
    fn conversion_time_ms(&self) -> u32;
}

/// Trait for heater output control
///
/// Implementations control the heater element via GPIO, PWM, or SSR.
pub trait HeaterOutput {
    /// Turn the heater on or off
    fn set_on(&mut self, on: bool);

    /// Check if the heater is currently on
    fn is_on(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sentinel() {
        assert_eq!(classify_celsius(-127.0), Err(SensorError::Disconnected));
        assert_eq!(classify_celsius(f32::NAN), Err(SensorError::Disconnected));
    }

    #[test]
    fn test_classify_valid_readings() {
        assert_eq!(classify_celsius(27.5), Ok(27.5));
        assert_eq!(classify_celsius(-126.9375), Ok(-126.9375));
        assert_eq!(classify_celsius(0.0), Ok(0.0));
    }
}

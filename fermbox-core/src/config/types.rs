//! Configuration type definitions
//!
//! The controller has no runtime configuration surface. These values are
//! compiled into the firmware and checked once at startup.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Controller configuration
///
/// All temperatures are in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// Setpoint at power-on
    pub initial_target_c: f32,
    /// Lowest selectable setpoint
    pub target_min_c: f32,
    /// Highest selectable setpoint
    pub target_max_c: f32,
    /// Full width of the hysteresis band, centred on the setpoint
    pub hysteresis_band_c: f32,
    /// Setpoint change per button press
    pub step_c: f32,
    /// Delay at the end of each loop iteration (ms)
    pub loop_delay_ms: u32,
}

impl ControllerConfig {
    /// Fermentation box defaults
    pub const DEFAULT: Self = Self {
        initial_target_c: 28.0,
        target_min_c: 25.0,
        target_max_c: 30.0,
        hysteresis_band_c: 0.4,
        step_c: 0.5,
        loop_delay_ms: 200,
    };

    /// Half of the hysteresis band (distance from setpoint to either threshold)
    pub fn half_band_c(&self) -> f32 {
        self.hysteresis_band_c / 2.0
    }

    /// Check the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            self.initial_target_c,
            self.target_min_c,
            self.target_max_c,
            self.hysteresis_band_c,
            self.step_c,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::NotFinite);
        }

        if self.target_min_c >= self.target_max_c {
            return Err(ConfigError::InvertedRange);
        }

        if self.hysteresis_band_c <= 0.0 {
            return Err(ConfigError::NonPositiveBand);
        }

        if self.step_c <= 0.0 {
            return Err(ConfigError::NonPositiveStep);
        }

        if self.step_c > self.target_max_c - self.target_min_c {
            return Err(ConfigError::StepExceedsRange);
        }

        if self.initial_target_c < self.target_min_c || self.initial_target_c > self.target_max_c {
            return Err(ConfigError::InitialTargetOutOfRange);
        }

        if self.loop_delay_ms == 0 {
            return Err(ConfigError::ZeroLoopDelay);
        }

        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A temperature value is NaN or infinite
    NotFinite,
    /// `target_min_c` is not below `target_max_c`
    InvertedRange,
    /// Hysteresis band is zero or negative
    NonPositiveBand,
    /// Step size is zero or negative
    NonPositiveStep,
    /// Step size is wider than the whole setpoint range
    StepExceedsRange,
    /// Initial setpoint lies outside `[target_min_c, target_max_c]`
    InitialTargetOutOfRange,
    /// Loop delay of zero would spin the loop
    ZeroLoopDelay,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(ControllerConfig::default().validate(), Ok(()));
        assert_eq!(ControllerConfig::DEFAULT.half_band_c(), 0.2);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let config = ControllerConfig {
            target_min_c: 30.0,
            target_max_c: 25.0,
            ..ControllerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::InvertedRange));

        let config = ControllerConfig {
            target_min_c: 30.0,
            target_max_c: 30.0,
            initial_target_c: 30.0,
            ..ControllerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::InvertedRange));
    }

    #[test]
    fn test_rejects_bad_band_and_step() {
        let config = ControllerConfig {
            hysteresis_band_c: 0.0,
            ..ControllerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveBand));

        let config = ControllerConfig {
            step_c: -0.5,
            ..ControllerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveStep));

        let config = ControllerConfig {
            step_c: 6.0,
            ..ControllerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::StepExceedsRange));
    }

    #[test]
    fn test_rejects_out_of_range_initial_target() {
        let config = ControllerConfig {
            initial_target_c: 31.0,
            ..ControllerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::InitialTargetOutOfRange));
    }

    #[test]
    fn test_rejects_nan_and_zero_delay() {
        let config = ControllerConfig {
            hysteresis_band_c: f32::NAN,
            ..ControllerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::NotFinite));

        let config = ControllerConfig {
            loop_delay_ms: 0,
            ..ControllerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLoopDelay));
    }
}

//! Fermentation box controller
//!
//! Owns the only mutable state in the system: the setpoint and the heater
//! state. One call to [`Controller::update`] is one decision; the caller
//! does the I/O on either side of it.

use crate::config::ControllerConfig;
use crate::control::{HeaterState, Setpoint, Thresholds};
use crate::traits::SensorError;

/// Button levels sampled during one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSample {
    /// Up button pressed
    pub up: bool,
    /// Down button pressed
    pub down: bool,
}

/// Controller state carried from one iteration to the next
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    /// Target temperature
    pub setpoint: Setpoint,
    /// Last heater decision
    pub heater: HeaterState,
}

/// Outcome of one controller update
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Update {
    /// Classified temperature reading
    pub reading: Result<f32, SensorError>,
    /// Target before the buttons were applied
    pub previous_target_c: f32,
    /// Target after the buttons were applied
    pub target_c: f32,
    /// Heater state before this update
    pub previous_heater: HeaterState,
    /// Heater state to apply
    pub heater: HeaterState,
}

impl Update {
    /// Whether the buttons moved the setpoint
    pub fn setpoint_changed(&self) -> bool {
        self.target_c != self.previous_target_c
    }

    /// New heater state, if it differs from the previous one
    pub fn transition(&self) -> Option<HeaterState> {
        if self.heater != self.previous_heater {
            Some(self.heater)
        } else {
            None
        }
    }
}

/// Setpoint handling plus hysteresis control
#[derive(Debug, Clone)]
pub struct Controller {
    config: ControllerConfig,
    state: ControllerState,
}

impl Controller {
    /// Create a controller with the heater idle
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            state: ControllerState {
                setpoint: Setpoint::from_config(&config),
                heater: HeaterState::Idle,
            },
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Current state
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Current target temperature
    pub fn target_c(&self) -> f32 {
        self.state.setpoint.value_c()
    }

    /// Current heater state
    pub fn heater(&self) -> HeaterState {
        self.state.heater
    }

    /// Switching thresholds for the current target
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::around(self.target_c(), self.config.hysteresis_band_c)
    }

    /// Raise the setpoint one step (up button)
    pub fn increase_setpoint(&mut self) -> bool {
        self.state.setpoint.increase()
    }

    /// Lower the setpoint one step (down button)
    pub fn decrease_setpoint(&mut self) -> bool {
        self.state.setpoint.decrease()
    }

    /// Run one control decision
    ///
    /// Buttons are applied first (up, then down), then the hysteresis law
    /// runs against the updated target. A sensor fault forces the heater
    /// off instead of feeding a bogus value to the control law.
    pub fn update(&mut self, reading: Result<f32, SensorError>, buttons: ButtonSample) -> Update {
        let previous_target_c = self.target_c();
        let previous_heater = self.state.heater;

        if buttons.up {
            self.increase_setpoint();
        }
        if buttons.down {
            self.decrease_setpoint();
        }

        self.state.heater = match reading {
            Ok(temperature_c) => previous_heater.next(temperature_c, self.thresholds()),
            Err(_) => HeaterState::Idle,
        };

        Update {
            reading,
            previous_target_c,
            target_c: self.target_c(),
            previous_heater,
            heater: self.state.heater,
        }
    }
}

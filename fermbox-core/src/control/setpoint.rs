//! Bounded setpoint
//!
//! The target temperature moves in fixed steps and never leaves
//! `[min, max]`. A step that would cross a bound is dropped entirely
//! rather than truncated, so every change is exactly one step.

use crate::config::ControllerConfig;

/// Fraction of a step treated as rounding noise
const STEP_TOLERANCE: f32 = 1e-3;

/// Target temperature with its bounds and step size
///
/// The value is kept as a whole number of steps away from the initial
/// target and recomputed on demand, so repeated presses never accumulate
/// float error. A value within rounding noise of a bound is the bound.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Setpoint {
    origin_c: f32,
    steps: i32,
    lowest_step: i32,
    highest_step: i32,
    min_c: f32,
    max_c: f32,
    step_c: f32,
}

impl Setpoint {
    /// Create a setpoint, clamping the initial value into range
    pub fn new(initial_c: f32, min_c: f32, max_c: f32, step_c: f32) -> Self {
        let origin_c = if initial_c < min_c {
            min_c
        } else if initial_c > max_c {
            max_c
        } else {
            initial_c
        };

        Self {
            origin_c,
            steps: 0,
            lowest_step: -whole_steps(origin_c - min_c, step_c),
            highest_step: whole_steps(max_c - origin_c, step_c),
            min_c,
            max_c,
            step_c,
        }
    }

    /// Create a setpoint from the controller configuration
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self::new(
            config.initial_target_c,
            config.target_min_c,
            config.target_max_c,
            config.step_c,
        )
    }

    /// Current target in degrees Celsius
    pub fn value_c(&self) -> f32 {
        let value = self.origin_c + self.steps as f32 * self.step_c;
        let noise = self.step_c * STEP_TOLERANCE;
        if (value - self.max_c).abs() <= noise {
            self.max_c
        } else if (value - self.min_c).abs() <= noise {
            self.min_c
        } else {
            value
        }
    }

    /// Lower bound
    pub fn min_c(&self) -> f32 {
        self.min_c
    }

    /// Upper bound
    pub fn max_c(&self) -> f32 {
        self.max_c
    }

    /// Step size
    pub fn step_c(&self) -> f32 {
        self.step_c
    }

    /// Raise the target by one step if that stays within `max`
    ///
    /// Returns true if the value changed.
    pub fn increase(&mut self) -> bool {
        if self.steps < self.highest_step {
            self.steps += 1;
            true
        } else {
            false
        }
    }

    /// Lower the target by one step if that stays within `min`
    ///
    /// Returns true if the value changed.
    pub fn decrease(&mut self) -> bool {
        if self.steps > self.lowest_step {
            self.steps -= 1;
            true
        } else {
            false
        }
    }
}

/// Whole steps that fit in `span_c`, forgiving rounding noise
fn whole_steps(span_c: f32, step_c: f32) -> i32 {
    if step_c <= 0.0 || span_c <= 0.0 {
        return 0;
    }
    // Float to int casts saturate
    (span_c / step_c + STEP_TOLERANCE) as i32
}

//! Board-agnostic core logic for the fermentation box controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (sensor, heater, buttons, display, diagnostics)
//! - Bang-bang control law and bounded setpoint
//! - Controller state and the per-iteration decision
//! - Status screen rendering and diagnostic formatting
//! - The control loop pass that ties them together
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod controller;
pub mod runner;
pub mod status;
pub mod traits;

pub use config::{ConfigError, ControllerConfig};
pub use controller::{ButtonSample, Controller, ControllerState, Update};
pub use runner::{Buttons, ControlLoop, Iteration};

//! Control logic
//!
//! Pure functions of their inputs; no hardware access.

pub mod hysteresis;
pub mod setpoint;

pub use hysteresis::{HeaterState, Thresholds};
pub use setpoint::Setpoint;

//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic
//! and hardware-specific implementations.

pub mod diagnostics;
pub mod display;
pub mod heater;
pub mod input;

pub use diagnostics::DiagnosticSink;
pub use display::{DisplayError, FrameSink};
pub use heater::{
    classify_celsius, HeaterOutput, SensorError, TemperatureSensor, DISCONNECTED_SENTINEL_C,
};
pub use input::Button;

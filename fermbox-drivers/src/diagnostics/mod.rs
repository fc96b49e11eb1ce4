//! Diagnostic output sinks

pub mod serial;

pub use serial::SerialDiagnostics;

//! Configuration types
//!
//! Compiled-in controller configuration and its validation rules.

pub mod types;

pub use types::*;

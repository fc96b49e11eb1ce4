//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in fermbox-core for the fermentation box hardware:
//!
//! - Heater output (GPIO relay, active-high or active-low)
//! - Push-buttons (active-low with pull-up)
//! - Temperature sensor (DS18B20 over an abstract 1-Wire bus)
//! - Display (SSD1306 128x64 OLED over I2C)
//! - Diagnostic line output over a serial writer

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod diagnostics;
pub mod display;
pub mod heater;
pub mod input;
pub mod sensor;

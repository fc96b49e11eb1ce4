//! Button inputs

pub mod button;

pub use button::ActiveLowButton;

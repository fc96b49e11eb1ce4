//! Status output
//!
//! Number formatting, the diagnostic line, the 128x64 frame buffer and
//! the three-row status screen drawn on it.

pub mod canvas;
pub mod format;
pub mod render;

pub use canvas::{Canvas, HEIGHT, PAGES, WIDTH};
pub use format::{diagnostic_line, format_reading, format_temperature, DiagnosticLine, Reading};
pub use render::{render_status, StatusView};

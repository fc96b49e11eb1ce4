//! Fixed-point text formatting for temperatures
//!
//! Values round half away from zero, the way small-MCU float printers do,
//! so a 0.25 °C probe step shows `27.3` rather than banker's `27.2`.

use core::fmt::{self, Write};

use heapless::String;

use crate::traits::{SensorError, DISCONNECTED_SENTINEL_C};

/// A classified temperature reading
pub type Reading = Result<f32, SensorError>;

/// Rendered temperature for the display (`"28.0"`, `"-5.5"`, `"--.-"`)
pub type Temperature = String<12>;

/// One diagnostic line without terminator
pub type DiagnosticLine = String<48>;

/// Shown in place of the current temperature on a sensor fault
pub const FAULT_TEXT: &str = "--.-";

/// Display field width, right-aligned
const DISPLAY_WIDTH: usize = 4;

/// Write `value` with a fixed number of decimals
///
/// Saturates instead of overflowing for values beyond `i32` range after
/// scaling; no realistic probe gets there.
pub fn write_fixed<W: Write>(w: &mut W, value: f32, decimals: u32) -> fmt::Result {
    let scale = 10i32.pow(decimals);
    let scaled = value * scale as f32;
    let rounded = if scaled >= 0.0 {
        (scaled + 0.5) as i32
    } else {
        (scaled - 0.5) as i32
    };

    if rounded < 0 {
        w.write_char('-')?;
    }
    let magnitude = rounded.unsigned_abs();
    let whole = magnitude / scale as u32;
    let frac = magnitude % scale as u32;

    if decimals == 0 {
        write!(w, "{}", whole)
    } else {
        write!(w, "{}.{:0width$}", whole, frac, width = decimals as usize)
    }
}

/// Format a temperature with one decimal, right-aligned to four columns
pub fn format_temperature(value_c: f32) -> Temperature {
    let mut digits: Temperature = String::new();
    let _ = write_fixed(&mut digits, value_c, 1);

    let mut out: Temperature = String::new();
    for _ in digits.len()..DISPLAY_WIDTH {
        let _ = out.push(' ');
    }
    let _ = out.push_str(&digits);
    out
}

/// Format a reading for the display, with a placeholder for faults
pub fn format_reading(reading: Reading) -> Temperature {
    match reading {
        Ok(value_c) => format_temperature(value_c),
        Err(_) => {
            let mut out = String::new();
            let _ = out.push_str(FAULT_TEXT);
            out
        }
    }
}

/// Build the per-iteration diagnostic line
///
/// Format is `Temperature: <t><target>°C`, both with two decimals and no
/// separator between them. Faults print the disconnected sentinel.
pub fn diagnostic_line(reading: Reading, target_c: f32) -> DiagnosticLine {
    let current_c = reading.unwrap_or(DISCONNECTED_SENTINEL_C);

    let mut line = String::new();
    let _ = line.push_str("Temperature: ");
    let _ = write_fixed(&mut line, current_c, 2);
    let _ = write_fixed(&mut line, target_c, 2);
    let _ = line.push_str("°C");
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(value: f32, decimals: u32) -> String<32> {
        let mut s = String::new();
        write_fixed(&mut s, value, decimals).unwrap();
        s
    }

    #[test]
    fn test_write_fixed_rounding() {
        assert_eq!(fixed(27.25, 1).as_str(), "27.3");
        assert_eq!(fixed(27.75, 1).as_str(), "27.8");
        assert_eq!(fixed(-5.25, 1).as_str(), "-5.3");
        assert_eq!(fixed(28.0, 2).as_str(), "28.00");
        assert_eq!(fixed(0.05, 2).as_str(), "0.05");
        assert_eq!(fixed(3.6, 0).as_str(), "4");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(fixed(-0.01, 1).as_str(), "0.0");
    }

    #[test]
    fn test_format_temperature_width() {
        assert_eq!(format_temperature(28.0).as_str(), "28.0");
        assert_eq!(format_temperature(5.5).as_str(), " 5.5");
        assert_eq!(format_temperature(-127.0).as_str(), "-127.0");
    }

    #[test]
    fn test_format_reading_fault() {
        assert_eq!(format_reading(Err(SensorError::CrcMismatch)).as_str(), "--.-");
        assert_eq!(format_reading(Ok(27.5)).as_str(), "27.5");
    }

    #[test]
    fn test_diagnostic_line() {
        assert_eq!(
            diagnostic_line(Ok(27.5), 28.0).as_str(),
            "Temperature: 27.5028.00°C"
        );
        assert_eq!(
            diagnostic_line(Err(SensorError::Disconnected), 28.5).as_str(),
            "Temperature: -127.0028.50°C"
        );
    }
}

//! Diagnostic lines over a serial port
//!
//! Any blocking `embedded_io::Write` (usually a UART TX half) becomes a
//! line sink. Lines end in CRLF for terminal emulators. Write errors are
//! counted and otherwise ignored; nobody reads this stream but a human.

use embedded_io::Write;
use fermbox_core::traits::DiagnosticSink;

const LINE_END: &[u8] = b"\r\n";

/// Line-oriented diagnostic sink over a serial writer
pub struct SerialDiagnostics<W> {
    writer: W,
    dropped: u32,
}

impl<W: Write> SerialDiagnostics<W> {
    /// Wrap a serial writer
    pub fn new(writer: W) -> Self {
        Self { writer, dropped: 0 }
    }

    /// Number of lines that failed to write
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    fn write_line(&mut self, line: &str) -> Result<(), W::Error> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(LINE_END)?;
        self.writer.flush()
    }
}

impl<W: Write> DiagnosticSink for SerialDiagnostics<W> {
    fn emit_line(&mut self, line: &str) {
        if self.write_line(line).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
        }
    }
}

//! Diagnostic text stream trait

/// Write-only, line-oriented diagnostic output
///
/// Best effort: implementations drop output they cannot deliver.
pub trait DiagnosticSink {
    /// Emit one line (without terminator)
    fn emit_line(&mut self, line: &str);
}

//! Report sinks
//!
//! A report sink is an append-only text channel. Checks write diagnostic
//! lines into it and RunAll writes one PASS/FAIL/SKIPPED line per check. A
//! sink never influences control flow: write failures are logged and dropped.

use std::io::{self, Write};

use tracing::{info, warn};

/// Append-only diagnostic channel
pub trait ReportSink {
    /// Append one line (without trailing newline)
    fn line(&mut self, line: &str);
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn line(&mut self, line: &str) {
        (**self).line(line)
    }
}

/// Sink that keeps every line in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines written so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether any line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    /// Lines joined with newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Drop every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl ReportSink for MemorySink {
    fn line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Sink over any [`io::Write`] (stdout, stderr, a log file)
///
/// After the first write error the sink goes quiet.
#[derive(Debug)]
pub struct WriterSink<W: io::Write> {
    writer: W,
    failed: bool,
}

impl<W: io::Write> WriterSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            failed: false,
        }
    }

    /// Whether a write error has silenced the sink
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> ReportSink for WriterSink<W> {
    fn line(&mut self, line: &str) {
        if self.failed {
            return;
        }
        if let Err(e) = writeln!(self.writer, "{}", line).and_then(|_| self.writer.flush()) {
            warn!(target: "braidcheck::report", error = %e, "Report sink write failed; further lines dropped");
            self.failed = true;
        }
    }
}

/// Sink that forwards every line as a `tracing` event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn line(&mut self, line: &str) {
        info!(target: "braidcheck::report", "{}", line);
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn line(&mut self, _line: &str) {}
}

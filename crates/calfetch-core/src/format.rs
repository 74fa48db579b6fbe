//! Newline-delimited JSON output.

use std::io::{self, Write};

use crate::event::Event;

/// Writes one compact JSON document per event, one event per line.
///
/// Every line is flushed as soon as it is written, so whatever was printed
/// stays printed if a later step fails.
#[derive(Debug)]
pub struct JsonLinesWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesWriter<W> {
    /// Creates a writer on top of `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Serializes `event` and writes it followed by a newline.
    pub fn write_event(&mut self, event: &Event) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Number of events written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Serializes a single event to its output line (without the newline).
pub fn to_line(event: &Event) -> serde_json::Result<String> {
    serde_json::to_string(event)
}

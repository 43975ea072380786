//! Ready-made line handlers.
//!
//! These cover the usual destinations for redirected output: a tracing
//! logger, a channel drained by another thread, and a plain writer.

use crate::error::HandlerError;
use crate::splitter::LineHandler;
use crossbeam_channel::Sender;
use std::io::Write;
use tracing::Level;

/// Emits each line as a `tracing` event at a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct TraceLines {
    level: Level,
}

/// Handler logging every line at `level`.
pub fn trace_lines(level: Level) -> TraceLines {
    TraceLines { level }
}

impl LineHandler for TraceLines {
    fn handle_line(&mut self, line: String) -> Result<(), HandlerError> {
        // tracing needs the level at compile time for each callsite
        match self.level {
            Level::ERROR => tracing::error!(target: "linesink::lines", "{}", line),
            Level::WARN => tracing::warn!(target: "linesink::lines", "{}", line),
            Level::INFO => tracing::info!(target: "linesink::lines", "{}", line),
            Level::DEBUG => tracing::debug!(target: "linesink::lines", "{}", line),
            _ => tracing::trace!(target: "linesink::lines", "{}", line),
        }
        Ok(())
    }
}

/// Forwards each line over a channel.
///
/// Sending fails once every receiver is gone; that failure is reported
/// as a handler error.
#[derive(Debug, Clone)]
pub struct SendLines {
    sender: Sender<String>,
}

/// Handler sending every line to `sender`.
pub fn send_lines(sender: Sender<String>) -> SendLines {
    SendLines { sender }
}

impl LineHandler for SendLines {
    fn handle_line(&mut self, line: String) -> Result<(), HandlerError> {
        self.sender.send(line)?;
        Ok(())
    }
}

/// Writes each line followed by `\n` to the wrapped writer.
pub struct WriteLines<W: Write> {
    writer: W,
}

/// Handler writing every line to `writer`, LF-terminated.
pub fn write_lines<W: Write>(writer: W) -> WriteLines<W> {
    WriteLines { writer }
}

impl<W: Write> WriteLines<W> {
    /// Consume the handler and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineHandler for WriteLines<W> {
    fn handle_line(&mut self, line: String) -> Result<(), HandlerError> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

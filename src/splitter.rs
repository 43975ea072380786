//! Line splitting byte sink.
//!
//! [`LineSplitter`] accepts bytes the way an output stream does and hands each
//! completed line to a [`LineHandler`]. `\n`, `\r` and `\r\n` all end a line;
//! the terminator itself is never part of the dispatched text.

use crate::config::SplitterConfig;
use crate::error::{HandlerError, Result, SplitError};
use memchr::memchr2;
use std::{fmt, io};
use tracing::{debug, trace};

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Receiver of completed lines.
///
/// Implemented for every `FnMut(String) -> Result<(), HandlerError>` closure
/// and for the handlers in [`crate::handlers`].
pub trait LineHandler {
    /// Handle one line, terminator stripped. Errors propagate to the writer.
    fn handle_line(&mut self, line: String) -> std::result::Result<(), HandlerError>;
}

impl<F> LineHandler for F
where
    F: FnMut(String) -> std::result::Result<(), HandlerError>,
{
    #[inline]
    fn handle_line(&mut self, line: String) -> std::result::Result<(), HandlerError> {
        self(line)
    }
}

/// Adapter for closures that cannot fail.
pub struct Infallible<F>(F);

impl<F: FnMut(String)> LineHandler for Infallible<F> {
    #[inline]
    fn handle_line(&mut self, line: String) -> std::result::Result<(), HandlerError> {
        (self.0)(line);
        Ok(())
    }
}

/// Splits written bytes into lines and dispatches each one to a handler.
///
/// Bytes are accumulated until a terminator arrives, then decoded as UTF-8
/// (invalid sequences become U+FFFD) and passed to the handler. A CR followed
/// by LF counts as a single terminator, even when the two bytes arrive in
/// separate writes. Bytes after the last terminator stay buffered and are never
/// dispatched on their own.
///
/// The buffer is cleared after every dispatch, whether the handler returns
/// an error, succeeds or panics.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use linesink::LineSplitter;
///
/// let mut lines = Vec::new();
/// let mut sink = LineSplitter::from_fn(|line| lines.push(line));
/// write!(sink, "first\r\nsecond\rthird\n").unwrap();
/// drop(sink);
///
/// assert_eq!(lines, ["first", "second", "third"]);
/// ```
pub struct LineSplitter<H> {
    buffer: Vec<u8>,
    /// Previous byte, kept only to absorb the LF of a CRLF pair.
    last: Option<u8>,
    handler: H,
    lines_dispatched: u64,
}

impl<F> LineSplitter<F>
where
    F: FnMut(String) -> std::result::Result<(), HandlerError>,
{
    /// Create a splitter around a fallible closure.
    pub fn new(handler: F) -> Self {
        Self::with_config(handler, SplitterConfig::default())
    }

    /// Create a splitter around a fallible closure with custom buffer sizing.
    pub fn with_config(handler: F, config: SplitterConfig) -> Self {
        Self::from_handler(handler, config)
    }
}

impl<F> LineSplitter<Infallible<F>>
where
    F: FnMut(String),
{
    /// Create a splitter around a closure that never fails.
    pub fn from_fn(f: F) -> Self {
        Self::from_handler(Infallible(f), SplitterConfig::default())
    }
}

impl<H: LineHandler> LineSplitter<H> {
    /// Create a splitter around any [`LineHandler`].
    pub fn from_handler(handler: H, config: SplitterConfig) -> Self {
        Self {
            buffer: Vec::with_capacity(config.line_capacity),
            last: None,
            handler,
            lines_dispatched: 0,
        }
    }

    /// Process a single byte.
    ///
    /// Every value is ordinary content except `\r` and `\n`. Returns the
    /// handler's error if this byte completed a line and the handler failed.
    pub fn write_byte(&mut self, b: u8) -> Result<()> {
        if self.last == Some(CR) && b == LF {
            self.last = None;
            return Ok(());
        }
        self.last = Some(b);
        if b == LF || b == CR {
            self.dispatch()
        } else {
            self.buffer.push(b);
            Ok(())
        }
    }

    /// Process `len` bytes of `bytes` starting at `offset`.
    ///
    /// A negative `len` fails with [`SplitError::NegativeLength`], a range
    /// outside `bytes` with [`SplitError::OutOfBounds`]; in both cases
    /// nothing is processed. Processing stops at the first handler failure.
    pub fn write_range(&mut self, bytes: &[u8], offset: isize, len: isize) -> Result<()> {
        if len < 0 {
            debug!(len, "rejecting negative range length");
            return Err(SplitError::NegativeLength { len });
        }
        let start = usize::try_from(offset).ok();
        let end = start.and_then(|s| s.checked_add(len.unsigned_abs()));
        match (start, end) {
            (Some(start), Some(end)) if end <= bytes.len() => {
                self.write_bytes(&bytes[start..end])
            }
            _ => {
                debug!(
                    offset,
                    len,
                    available = bytes.len(),
                    "rejecting out-of-bounds range"
                );
                Err(SplitError::OutOfBounds {
                    offset,
                    len,
                    available: bytes.len(),
                })
            }
        }
    }

    /// Process every byte of `bytes` in order.
    ///
    /// Same result as calling [`write_byte`](Self::write_byte) for each
    /// byte; runs without terminators are appended in one step.
    pub fn write_bytes(&mut self, mut bytes: &[u8]) -> Result<()> {
        while let Some((&first, rest)) = bytes.split_first() {
            if self.last == Some(CR) && first == LF {
                self.last = None;
                bytes = rest;
                continue;
            }
            let run = memchr2(LF, CR, bytes).unwrap_or(bytes.len());
            if run == 0 {
                self.write_byte(first)?;
                bytes = rest;
            } else {
                self.buffer.extend_from_slice(&bytes[..run]);
                self.last = Some(bytes[run - 1]);
                bytes = &bytes[run..];
            }
        }
        Ok(())
    }

    /// Number of lines handed to the handler so far, failed ones included.
    pub fn lines_dispatched(&self) -> u64 {
        self.lines_dispatched
    }

    /// Consume the splitter and return its handler.
    ///
    /// Bytes of an unterminated trailing line are discarded.
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Decode the buffered line, hand it to the handler and clear the buffer.
    fn dispatch(&mut self) -> Result<()> {
        let buffer = scopeguard::guard(&mut self.buffer, |buf| buf.clear());
        let line = String::from_utf8_lossy(buffer.as_slice()).into_owned();
        self.lines_dispatched += 1;
        trace!(len = line.len(), "dispatching line");
        self.handler.handle_line(line).map_err(|e| {
            debug!(error = %e, "line handler failed");
            SplitError::Handler(e)
        })
    }
}

impl<H: LineHandler> io::Write for LineSplitter<H> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    /// No-op: partial lines are only ever dispatched by a terminator.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<H: LineHandler> fmt::Write for LineSplitter<H> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

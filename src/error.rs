//! Error types for line splitting.

use std::io;
use thiserror::Error;

/// Error type returned by line handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while writing into a [`LineSplitter`](crate::LineSplitter).
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Invalid range: negative length {len}")]
    NegativeLength { len: isize },

    #[error("Invalid range: offset {offset} with length {len} exceeds {available} bytes")]
    OutOfBounds {
        offset: isize,
        len: isize,
        available: usize,
    },

    #[error("Line handler failed: {0}")]
    Handler(#[source] HandlerError),
}

impl SplitError {
    /// True for errors caused by the caller's arguments rather than the handler.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            SplitError::NegativeLength { .. } | SplitError::OutOfBounds { .. }
        )
    }
}

impl From<SplitError> for io::Error {
    fn from(err: SplitError) -> Self {
        let kind = if err.is_invalid_argument() {
            io::ErrorKind::InvalidInput
        } else {
            io::ErrorKind::Other
        };
        io::Error::new(kind, err)
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;

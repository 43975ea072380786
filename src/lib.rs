//! linesink: route stream output to a line handler
//!
//! This library provides a byte sink that splits whatever is written into it
//! into lines and hands each completed line to a callback.
//!
//! # Features
//!
//! - **Drop-in sink**: implements `std::io::Write` and `std::fmt::Write`
//! - **Terminator normalization**: `\n`, `\r` and `\r\n` each end one line
//! - **Ready-made handlers**: tracing, channels and plain writers
//!
//! # Example
//!
//! ```rust
//! use std::io::Write;
//! use linesink::{handlers, LineSplitter, SplitterConfig};
//!
//! let (tx, rx) = crossbeam_channel::unbounded();
//! let mut sink = LineSplitter::from_handler(handlers::send_lines(tx), SplitterConfig::default());
//!
//! writeln!(sink, "build started").unwrap();
//! write!(sink, "step 1 of 2\r\nstep 2").unwrap();
//! drop(sink);
//!
//! let lines: Vec<String> = rx.iter().collect();
//! assert_eq!(lines, ["build started", "step 1 of 2"]);
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod splitter;

// Re-export commonly used types
pub use config::SplitterConfig;
pub use error::{HandlerError, Result, SplitError};
pub use splitter::{Infallible, LineHandler, LineSplitter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

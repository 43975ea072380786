//! Behavioral tests for line splitting through the public API.
//!
//! Each test drives a splitter the way a redirected output stream would
//! and checks exactly which lines reach the handler.

use linesink::{LineSplitter, SplitError};
use std::cell::RefCell;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

/// Feed `input` one byte at a time and return the dispatched lines.
fn lines_bytewise(input: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut sink = LineSplitter::from_fn(|line| lines.push(line));
    for &b in input {
        sink.write_byte(b).unwrap();
    }
    drop(sink);
    lines
}

// =============================================================================
// Terminators
// =============================================================================

#[test]
fn test_content_then_lf_is_one_line() {
    for content in ["", "x", "hello world", "tab\tseparated", "\u{1F600} emoji"] {
        let mut input = content.as_bytes().to_vec();
        input.push(b'\n');
        assert_eq!(lines_bytewise(&input), [content]);
    }
}

#[test]
fn test_crlf_yields_single_dispatch() {
    assert_eq!(lines_bytewise(b"line\r\n"), ["line"]);
    assert_eq!(lines_bytewise(b"\r\n"), [""]);
}

#[test]
fn test_bare_cr_then_content() {
    let mut lines = Vec::new();
    let mut sink = LineSplitter::from_fn(|line| lines.push(line));
    sink.write_byte(b'a').unwrap();
    sink.write_byte(b'\r').unwrap();
    assert_eq!(sink.lines_dispatched(), 1);
    // 'b' is not absorbed, it starts the next line
    sink.write_byte(b'b').unwrap();
    sink.write_byte(b'\n').unwrap();
    drop(sink);
    assert_eq!(lines, ["a", "b"]);
}

#[test]
fn test_bare_lf_dispatches() {
    assert_eq!(lines_bytewise(b"only\n"), ["only"]);
    assert_eq!(lines_bytewise(b"\n"), [""]);
}

#[test]
fn test_lf_cr_is_two_boundaries() {
    assert_eq!(lines_bytewise(b"a\n\rb\n"), ["a", "", "b"]);
}

#[test]
fn test_crlf_split_across_calls() {
    let mut lines = Vec::new();
    let mut sink = LineSplitter::from_fn(|line| lines.push(line));
    sink.write_range(b"first\r", 0, 6).unwrap();
    sink.write_range(b"\n", 0, 1).unwrap();
    sink.write_range(b"second\n", 0, 7).unwrap();
    assert_eq!(sink.lines_dispatched(), 2);
    drop(sink);
    assert_eq!(lines, ["first", "second"]);
}

#[test]
fn test_every_non_terminator_byte_is_content() {
    let content: Vec<u8> = (0u8..=255)
        .filter(|&b| b != b'\n' && b != b'\r' && b.is_ascii())
        .collect();
    let mut input = content.clone();
    input.push(b'\n');
    assert_eq!(lines_bytewise(&input), [String::from_utf8(content).unwrap()]);
}

// =============================================================================
// Range writes
// =============================================================================

#[test]
fn test_negative_length_rejected_before_processing() {
    let mut calls = 0;
    let mut sink = LineSplitter::from_fn(|_| calls += 1);
    sink.write_bytes(b"pending").unwrap();

    let err = sink.write_range(b"\n\n\n", 0, -2).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(matches!(err, SplitError::NegativeLength { len: -2 }));
    assert_eq!(sink.lines_dispatched(), 0);

    // Pending content is untouched by the rejected call
    sink.write_bytes(b"\n").unwrap();
    drop(sink);
    assert_eq!(calls, 1);
}

#[test]
fn test_out_of_bounds_range_rejected() {
    let mut sink = LineSplitter::from_fn(|_| {});
    let err = sink.write_range(b"ab\n", 1, 3).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(matches!(err, SplitError::OutOfBounds { available: 3, .. }));
    assert_eq!(sink.lines_dispatched(), 0);
}

#[test]
fn test_range_matches_bytewise() {
    let input: &[u8] = b"\r\nalpha\r\r\nbeta\n\ngamma\rdelta";
    let expected = lines_bytewise(input);

    // Every split point must give the same result as one byte at a time
    for split in 0..=input.len() {
        let mut lines = Vec::new();
        let mut sink = LineSplitter::from_fn(|line| lines.push(line));
        sink.write_range(input, 0, split as isize).unwrap();
        let rest = (input.len() - split) as isize;
        sink.write_range(input, split as isize, rest).unwrap();
        drop(sink);
        assert_eq!(lines, expected, "split at {}", split);
    }
}

// =============================================================================
// Handler failures
// =============================================================================

#[test]
fn test_handler_error_propagates_and_buffer_resets() {
    let seen = RefCell::new(Vec::new());
    let mut sink = LineSplitter::new(|line: String| {
        if line == "poison" {
            return Err("poisoned line".into());
        }
        seen.borrow_mut().push(line);
        Ok(())
    });

    let err = sink.write_bytes(b"poison\n").unwrap_err();
    match err {
        SplitError::Handler(source) => assert_eq!(source.to_string(), "poisoned line"),
        other => panic!("unexpected error: {}", other),
    }

    sink.write_bytes(b"X\n").unwrap();
    assert_eq!(*seen.borrow(), ["X"]);
}

#[test]
fn test_handler_error_stops_range_processing() {
    let mut calls = 0;
    let mut sink = LineSplitter::new(|_| {
        calls += 1;
        Err("always".into())
    });

    assert!(sink.write_bytes(b"a\nb\nc\n").is_err());
    assert_eq!(sink.lines_dispatched(), 1);
    drop(sink);
    assert_eq!(calls, 1);
}

#[test]
fn test_failed_cr_still_absorbs_lf() {
    let mut calls = 0;
    let mut sink = LineSplitter::new(|_| {
        calls += 1;
        Err("down".into())
    });

    assert!(sink.write_byte(b'\r').is_err());
    assert!(sink.write_byte(b'\n').is_ok());
    drop(sink);
    assert_eq!(calls, 1);
}

#[test]
fn test_handler_panic_still_clears_buffer() {
    let seen = RefCell::new(Vec::new());
    let mut sink = LineSplitter::from_fn(|line| {
        if line.contains("panic") {
            panic!("handler panicked");
        }
        seen.borrow_mut().push(line);
    });

    let result = panic::catch_unwind(AssertUnwindSafe(|| sink.write_bytes(b"panic now\n")));
    assert!(result.is_err());

    sink.write_bytes(b"after\n").unwrap();
    assert_eq!(*seen.borrow(), ["after"]);
}

#[test]
fn test_io_write_surfaces_handler_error() {
    let mut sink = LineSplitter::new(|_| Err("sink closed".into()));
    let err = writeln!(sink, "anything").unwrap_err();
    assert!(err.to_string().contains("sink closed"));
}

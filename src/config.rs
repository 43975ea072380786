//! Buffer sizing for line splitters.
//!
//! The accumulation buffer grows on demand; these values only control
//! how much is reserved up front.

/// Default line buffer capacity (1 KB).
/// Sufficient for most diagnostic output lines.
pub const DEFAULT_LINE_CAPACITY: usize = 1024;

/// Low-memory line buffer capacity (128 bytes).
/// Use this when many splitters are alive at once.
pub const LOW_MEMORY_LINE_CAPACITY: usize = 128;

/// Returns the appropriate line capacity based on low_memory flag.
#[inline]
pub const fn line_capacity(low_memory: bool) -> usize {
    if low_memory {
        LOW_MEMORY_LINE_CAPACITY
    } else {
        DEFAULT_LINE_CAPACITY
    }
}

/// Construction options for a [`LineSplitter`](crate::LineSplitter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitterConfig {
    /// Bytes reserved for the accumulation buffer at construction.
    pub line_capacity: usize,
}

impl SplitterConfig {
    pub const fn new() -> Self {
        Self {
            line_capacity: DEFAULT_LINE_CAPACITY,
        }
    }

    /// Configuration using the low-memory buffer size.
    pub const fn low_memory() -> Self {
        Self {
            line_capacity: LOW_MEMORY_LINE_CAPACITY,
        }
    }

    pub const fn with_line_capacity(mut self, capacity: usize) -> Self {
        self.line_capacity = capacity;
        self
    }
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self::new()
    }
}

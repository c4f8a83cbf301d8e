//! Bounded sliding window over a character source.
//!
//! The scanner never needs the whole input in memory. It looks at a window
//! of at most `capacity` characters, consumes a prefix of it, and the buffer
//! tops the window back up from the source.
//!
//! ```text
//! source: ...[ consumed ][ window (<= capacity) ][ unread ]...
//!                        ^ advance(n) drops n here and reads n more
//! ```
//!
//! A token longer than `capacity` can never be seen whole, so the capacity is
//! also the maximum token length of a scan.
//!
//! # Examples
//!
//! ```
//! use lexstat::analysis::read_buffer::ReadBuffer;
//! use lexstat::analysis::source::TextSource;
//!
//! let mut buffer = ReadBuffer::new(TextSource::new("abcdef"), 4).unwrap();
//! assert_eq!(buffer.window(), "abcd");
//!
//! buffer.advance(3).unwrap();
//! assert_eq!(buffer.window(), "def");
//!
//! buffer.refill().unwrap();
//! assert!(!buffer.is_nonempty());
//! ```

use crate::analysis::source::CharSource;
use crate::error::{LexstatError, Result};

/// Sliding window of not-yet-consumed characters.
#[derive(Debug)]
pub struct ReadBuffer<S> {
    source: S,
    capacity: usize,
    window: String,
    /// Number of characters in `window`.
    window_len: usize,
    exhausted: bool,
}

impl<S: CharSource> ReadBuffer<S> {
    /// Create a buffer over `source` and load the first window.
    pub fn new(source: S, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(LexstatError::invalid_argument(
                "read buffer capacity must be positive",
            ));
        }

        let mut buffer = ReadBuffer {
            source,
            capacity,
            window: String::new(),
            window_len: 0,
            exhausted: false,
        };
        buffer.fill()?;
        Ok(buffer)
    }

    /// Drop the first `n` characters of the window and read up to `n` more.
    ///
    /// `n` larger than the window drops the whole window. The window never
    /// grows past the capacity. Returns whether the window is non-empty
    /// afterwards.
    pub fn advance(&mut self, n: usize) -> Result<bool> {
        if n == 0 {
            return Ok(self.is_nonempty());
        }

        let drop = n.min(self.window_len);
        let drop_bytes = self
            .window
            .char_indices()
            .nth(drop)
            .map(|(offset, _)| offset)
            .unwrap_or(self.window.len());
        self.window.drain(..drop_bytes);
        self.window_len -= drop;

        let room = self.capacity - self.window_len;
        self.read(n.min(room))?;
        Ok(self.is_nonempty())
    }

    /// Replace the window with a fresh one, i.e. `advance(capacity)`.
    pub fn refill(&mut self) -> Result<bool> {
        self.advance(self.capacity)
    }

    /// The current window.
    pub fn window(&self) -> &str {
        &self.window
    }

    /// First character of the window, if any.
    pub fn peek(&self) -> Option<char> {
        self.window.chars().next()
    }

    /// Number of characters in the window.
    pub fn len(&self) -> usize {
        self.window_len
    }

    pub fn is_empty(&self) -> bool {
        self.window_len == 0
    }

    /// True while there is anything left to scan.
    pub fn is_nonempty(&self) -> bool {
        self.window_len != 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True once the source has reported end of input.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn fill(&mut self) -> Result<()> {
        let room = self.capacity - self.window_len;
        self.read(room)
    }

    fn read(&mut self, n: usize) -> Result<()> {
        if n == 0 || self.exhausted {
            return Ok(());
        }
        let got = self.source.read_chars(n, &mut self.window)?;
        self.window_len += got;
        if got < n {
            self.exhausted = true;
        }
        Ok(())
    }
}

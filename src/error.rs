//! Error types for the Lexstat library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`LexstatError`] enum. Scanning either yields a complete token list or one
//! of these errors; partial token lists are never returned.
//!
//! # Examples
//!
//! ```
//! use lexstat::error::{LexstatError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LexstatError::invalid_argument("capacity must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Lexstat operations.
#[derive(Error, Debug)]
pub enum LexstatError {
    /// The underlying character source failed during a read, or delivered
    /// bytes that are not valid in the selected encoding.
    #[error("Source unreadable: {0}")]
    SourceUnreadable(#[from] io::Error),

    /// A token rule could not be compiled, or could match without consuming
    /// any input.
    #[error("Invalid registry rule: {0}")]
    InvalidRegistryRule(String),

    /// A matched token filled the whole read window while more input was
    /// pending.
    #[error("Buffer overflow: token reached the {capacity}-character window limit")]
    BufferOverflow { capacity: usize },

    /// Invalid argument passed to a public operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A statistic could not be computed (e.g. a ratio over zero words).
    #[error("Statistics error: {0}")]
    Statistics(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with LexstatError.
pub type Result<T> = std::result::Result<T, LexstatError>;

impl LexstatError {
    /// Create a new invalid registry rule error.
    pub fn invalid_rule<S: Into<String>>(msg: S) -> Self {
        LexstatError::InvalidRegistryRule(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LexstatError::InvalidArgument(msg.into())
    }

    /// Create a new statistics error.
    pub fn statistics<S: Into<String>>(msg: S) -> Self {
        LexstatError::Statistics(msg.into())
    }

    /// Create a source error for input that cannot be decoded.
    pub fn invalid_data<S: Into<String>>(msg: S) -> Self {
        LexstatError::SourceUnreadable(io::Error::new(io::ErrorKind::InvalidData, msg.into()))
    }
}

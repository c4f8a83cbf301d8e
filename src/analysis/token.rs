//! Token types and utilities for text analysis.
//!
//! This module defines the core data structures for representing scanned
//! tokens.
//!
//! # Core Types
//!
//! - [`TokenType`] - Classification of a token as a `(tag, subtag)` pair
//! - [`Token`] - A classified piece of source text
//!
//! Token types are plain values compared structurally. Both halves of the
//! pair are optional, and an absent value is distinct from an empty string:
//! `("NUM", "")` and `("NUM", None)` are different types.
//!
//! # Examples
//!
//! ```
//! use lexstat::analysis::token::{Token, TokenType};
//!
//! let word = TokenType::new("WORD", "RU");
//! let token = Token::new(word.clone(), "привет");
//!
//! assert_eq!(token.tag(), Some("WORD"));
//! assert_eq!(token.subtag(), Some("RU"));
//! assert_eq!(token.body(), "привет");
//! assert_eq!(token.len(), 6);
//! assert!(token.is_type(&word));
//! ```
//!
//! Text that no rule matched is carried by tokens with neither tag nor
//! subtag:
//!
//! ```
//! use lexstat::analysis::token::{Token, TokenType};
//!
//! let token = Token::unmatched("§");
//! assert!(token.is_unmatched());
//! assert_eq!(token.token_type(), &TokenType::unmatched());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a token classification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenType {
    tag: Option<String>,
    subtag: Option<String>,
}

impl TokenType {
    /// Create a token type with both a tag and a subtag.
    pub fn new<T: Into<String>, S: Into<String>>(tag: T, subtag: S) -> Self {
        TokenType {
            tag: Some(tag.into()),
            subtag: Some(subtag.into()),
        }
    }

    /// Create a token type from optional parts.
    pub fn from_parts(tag: Option<String>, subtag: Option<String>) -> Self {
        TokenType { tag, subtag }
    }

    /// The type carried by fallback tokens built from unmatched text.
    pub fn unmatched() -> Self {
        TokenType::default()
    }

    /// Get the tag, if any.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Get the subtag, if any.
    pub fn subtag(&self) -> Option<&str> {
        self.subtag.as_deref()
    }

    /// Check whether this is the fallback type (no tag, no subtag).
    pub fn is_unmatched(&self) -> bool {
        self.tag.is_none() && self.subtag.is_none()
    }
}

/// Formats a part the way token listings show it: empty and absent parts
/// both print as `None`.
fn fmt_part(part: Option<&str>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match part {
        Some(s) if !s.is_empty() => write!(f, "'{s}'"),
        _ => write!(f, "None"),
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        fmt_part(self.tag(), f)?;
        write!(f, ", ")?;
        fmt_part(self.subtag(), f)?;
        write!(f, ">")
    }
}

/// A classified unit of source text.
///
/// The body is the exact text that produced the token. Tokens are never
/// modified after the scanner creates them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(flatten)]
    token_type: TokenType,
    body: String,
}

impl Token {
    /// Create a new token of the given type.
    pub fn new<S: Into<String>>(token_type: TokenType, body: S) -> Self {
        Token {
            token_type,
            body: body.into(),
        }
    }

    /// Create a fallback token from a run of unmatched characters.
    pub fn unmatched<S: Into<String>>(body: S) -> Self {
        Token::new(TokenType::unmatched(), body)
    }

    /// Get the token type.
    pub fn token_type(&self) -> &TokenType {
        &self.token_type
    }

    /// Get the tag, if any.
    pub fn tag(&self) -> Option<&str> {
        self.token_type.tag()
    }

    /// Get the subtag, if any.
    pub fn subtag(&self) -> Option<&str> {
        self.token_type.subtag()
    }

    /// Get the token text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consume the token, returning its text.
    pub fn into_body(self) -> String {
        self.body
    }

    /// Length of the body in characters (not bytes).
    pub fn len(&self) -> usize {
        self.body.chars().count()
    }

    /// Check if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check whether this token has the given type.
    pub fn is_type(&self, token_type: &TokenType) -> bool {
        &self.token_type == token_type
    }

    /// Check whether this token was built from unmatched text.
    pub fn is_unmatched(&self) -> bool {
        self.token_type.is_unmatched()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        fmt_part(self.tag(), f)?;
        write!(f, ", ")?;
        fmt_part(self.subtag(), f)?;
        write!(f, ", {:?}>", self.body)
    }
}

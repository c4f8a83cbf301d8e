//! The rule-ordered scanner.
//!
//! The scanner walks a [`ReadBuffer`] over its input. At every position it
//! asks the [`TokenRegistry`] for the first rule that matches; the match
//! becomes a token and the buffer moves past it. Characters no rule matches
//! are collected into a run that is emitted as a single unmatched token as
//! soon as the next rule matches (or the input ends).
//!
//! ```text
//! "ab §§ cd"   rules: [SPACE(stop), WORD]
//!
//!   "ab"  -> WORD
//!   " "   -> SPACE (consumed, not emitted)
//!   "§§"  -> no rule, collected
//!   " "   -> SPACE, flushes "§§" as an unmatched token first
//!   "cd"  -> WORD
//! ```
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use lexstat::analysis::scanner::Scanner;
//! use lexstat::analysis::stop::StopList;
//! use lexstat::analysis::token::TokenType;
//! use lexstat::analysis::token_model::{TokenModel, TokenRegistry};
//!
//! let space = TokenType::new("SEP", "WORD");
//! let word = TokenType::new("WORD", "");
//! let registry = TokenRegistry::new(vec![
//!     TokenModel::new(space.clone(), r"\s+").unwrap(),
//!     TokenModel::new(word.clone(), r"\w+").unwrap(),
//! ]);
//!
//! let scanner = Scanner::new(Arc::new(registry)).with_stop_list(StopList::from_types([space]));
//! let tokens = scanner.scan_text("ab §§ cd").unwrap();
//!
//! assert_eq!(tokens.join("|"), "ab|§§|cd");
//! assert!(tokens[1].is_unmatched());
//! ```

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::read_buffer::ReadBuffer;
use crate::analysis::source::{CharSource, Encoding, TextSource};
use crate::analysis::stop::StopList;
use crate::analysis::token::Token;
use crate::analysis::token_list::TokenList;
use crate::analysis::token_model::{TokenModel, TokenRegistry};
use crate::error::{LexstatError, Result};

/// Default read window, and therefore maximum token length, in characters.
pub const DEFAULT_MAX_TOKEN_LEN: usize = 4096;

/// What to do when a token may be longer than the read window.
///
/// A match counts as an overflow when it covers the whole window and the
/// source still has input after it. The scanner cannot see past the window,
/// so this also fires for a token that exactly fills the window and happens
/// to be followed by more text, e.g. `"1234"` in `"1234-5"` with a 4-character
/// window. A token that fills the window at the end of input is not flagged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Emit the token cut at the window size and log a warning.
    #[default]
    Truncate,
    /// Fail the scan with [`LexstatError::BufferOverflow`].
    Error,
}

/// Scanner settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Read window size in characters. Tokens longer than this cannot be
    /// recognized whole.
    pub max_token_len: usize,

    /// Drop unmatched characters instead of emitting them as tokens.
    pub skip_unmatched: bool,

    /// Handling of matches that fill the whole window before the end of
    /// input. See [`OverflowPolicy`].
    pub overflow: OverflowPolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
            skip_unmatched: false,
            overflow: OverflowPolicy::Truncate,
        }
    }
}

impl ScanConfig {
    pub fn with_max_token_len(mut self, max_token_len: usize) -> Self {
        self.max_token_len = max_token_len;
        self
    }

    pub fn with_skip_unmatched(mut self, skip_unmatched: bool) -> Self {
        self.skip_unmatched = skip_unmatched;
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }
}

/// Converts character sources into token lists.
///
/// A scanner is cheap to clone and holds no per-scan state, so one instance
/// can serve any number of scans, including from several threads at once.
#[derive(Clone, Debug)]
pub struct Scanner {
    registry: Arc<TokenRegistry>,
    stop: StopList,
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner with an empty stop list and the default config.
    pub fn new(registry: Arc<TokenRegistry>) -> Self {
        Scanner {
            registry,
            stop: StopList::new(),
            config: ScanConfig::default(),
        }
    }

    pub fn with_stop_list(mut self, stop: StopList) -> Self {
        self.stop = stop;
        self
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &Arc<TokenRegistry> {
        &self.registry
    }

    pub fn stop_list(&self) -> &StopList {
        &self.stop
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan a character source to the end.
    ///
    /// The source is owned by the scan and dropped when it returns, whether
    /// it succeeds or not. On error no tokens are returned.
    pub fn scan<S: CharSource>(&self, source: S) -> Result<TokenList> {
        let started = Instant::now();
        let skip_unmatched = self.config.skip_unmatched;

        let mut buffer = ReadBuffer::new(source, self.config.max_token_len)?;
        let mut tokens = TokenList::new();
        let mut unmatched = String::new();
        let mut unmatched_runs = 0usize;

        while buffer.is_nonempty() {
            match self.registry.find_match(buffer.window()) {
                Some((model, matched)) => {
                    if !skip_unmatched && !unmatched.is_empty() {
                        trace!("unmatched run {unmatched:?}");
                        tokens.push(Token::unmatched(std::mem::take(&mut unmatched)));
                        unmatched_runs += 1;
                    }

                    let token = Token::new(model.token_type().clone(), matched);
                    let consumed = token.len();
                    let fills_window = consumed == buffer.capacity();

                    if !self.stop.is_stopped(&token) {
                        tokens.push(token);
                    }
                    buffer.advance(consumed)?;

                    // Input left after a match that took the whole window.
                    if fills_window && buffer.is_nonempty() {
                        self.handle_overflow(model)?;
                    }
                }
                None => {
                    if !skip_unmatched && let Some(ch) = buffer.peek() {
                        unmatched.push(ch);
                    }
                    buffer.advance(1)?;
                }
            }
        }

        if !skip_unmatched && !unmatched.is_empty() {
            trace!("unmatched run {unmatched:?}");
            tokens.push(Token::unmatched(unmatched));
            unmatched_runs += 1;
        }

        debug!(
            "scanned {} tokens ({} unmatched runs) in {:?}",
            tokens.len(),
            unmatched_runs,
            started.elapsed()
        );
        Ok(tokens)
    }

    /// Scan in-memory text.
    pub fn scan_text(&self, text: &str) -> Result<TokenList> {
        self.scan(TextSource::new(text))
    }

    /// Scan an encoded byte stream.
    pub fn scan_reader<R: BufRead>(&self, reader: R, encoding: Encoding) -> Result<TokenList> {
        self.scan(encoding.open(reader))
    }

    /// Scan a file. The file is closed when the scan finishes or fails.
    pub fn scan_file<P: AsRef<Path>>(&self, path: P, encoding: Encoding) -> Result<TokenList> {
        let path = path.as_ref();
        debug!("scanning {} as {}", path.display(), encoding);
        self.scan(encoding.open_file(path)?)
    }

    fn handle_overflow(&self, model: &TokenModel) -> Result<()> {
        let capacity = self.config.max_token_len;
        match self.config.overflow {
            OverflowPolicy::Truncate => {
                warn!(
                    "{} token ({:?}) may be truncated at the {capacity}-character window limit",
                    model.token_type(),
                    model.pattern()
                );
                Ok(())
            }
            OverflowPolicy::Error => Err(LexstatError::BufferOverflow { capacity }),
        }
    }
}

//! # lexstat
//!
//! A rule-ordered lexical scanner with text statistics for Russian prose.
//!
//! ## Features
//!
//! - Ordered regex rules with first-match priority and lookahead guards
//! - Streaming scans through a bounded sliding window
//! - UTF-8 and Windows-1251 input
//! - Token list operations: filter, split, join
//! - Sentence, word, syllable, letter, and digit counts
//! - FRES, FKGL, ARI, and CLI readability indices

pub mod analysis;
pub mod cli;
pub mod error;
pub mod stats;

pub mod prelude {
    pub use crate::analysis::scanner::{ScanConfig, Scanner};
    pub use crate::analysis::source::Encoding;
    pub use crate::analysis::token::{Token, TokenType};
    pub use crate::analysis::token_list::TokenList;
    pub use crate::analysis::token_model::{TokenModel, TokenRegistry};
    pub use crate::error::{LexstatError, Result};
    pub use crate::stats::{ReadabilityIndex, RussianAnalyzer};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

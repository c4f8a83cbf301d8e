//! Language-specific rule sets.
//!
//! # Available Languages
//!
//! - [`russian`] - Russian prose: words, numbers, punctuation, and sentence
//!   boundaries, plus the alphabet tables used for statistics

pub mod russian;

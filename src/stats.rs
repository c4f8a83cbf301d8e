//! Text statistics and readability indices.

pub mod analyzer;
pub mod readability;

pub use analyzer::{RussianAnalyzer, StatValue, Statistic};
pub use readability::{ReadabilityIndex, TextCounts};

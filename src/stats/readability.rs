//! Readability indices over aggregate text counts.
//!
//! All four indices are fixed published formulas over five counts:
//! sentences, words, syllables, letters, and digits.
//!
//! | Index | Formula |
//! |-------|---------|
//! | FRES  | `206.835 - 1.3 * ASL - 60.1 * ASW` |
//! | FKGL  | `0.5 * ASL + 8.4 * ASW - 15.59` |
//! | ARI   | `6.26 * (letters + digits) / words + 0.2805 * words / sentences - 31.04` |
//! | CLI   | `0.055 * L - 0.35 * S - 20.33` |
//!
//! where `ASL` is words per sentence, `ASW` syllables per word, `L` letters
//! per 100 words, and `S` sentences per 100 words.
//!
//! # Examples
//!
//! ```
//! use lexstat::stats::readability::{ReadabilityIndex, TextCounts};
//!
//! let counts = TextCounts {
//!     sentences: 1,
//!     words: 5,
//!     syllables: 12,
//!     letters: 28,
//!     digits: 0,
//! };
//!
//! let fres = ReadabilityIndex::Fres.score(&counts).unwrap();
//! assert!((fres - (206.835 - 1.3 * 5.0 - 60.1 * 12.0 / 5.0)).abs() < 1e-9);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LexstatError, Result};

/// Aggregate counts readability formulas are computed from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextCounts {
    pub sentences: usize,
    pub words: usize,
    pub syllables: usize,
    pub letters: usize,
    pub digits: usize,
}

impl TextCounts {
    /// Average sentence length in words.
    pub fn words_per_sentence(&self) -> Result<f64> {
        ratio(self.words, self.sentences, "sentences")
    }

    /// Average word length in syllables.
    pub fn syllables_per_word(&self) -> Result<f64> {
        ratio(self.syllables, self.words, "words")
    }

    /// Average word length in letters.
    pub fn letters_per_word(&self) -> Result<f64> {
        ratio(self.letters, self.words, "words")
    }
}

fn ratio(numerator: usize, denominator: usize, what: &str) -> Result<f64> {
    if denominator == 0 {
        return Err(LexstatError::statistics(format!(
            "cannot average over zero {what}"
        )));
    }
    Ok(numerator as f64 / denominator as f64)
}

/// The supported readability indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReadabilityIndex {
    /// Flesch reading-ease score. Higher is easier.
    Fres,
    /// Flesch–Kincaid grade level.
    Fkgl,
    /// Automated readability index.
    Ari,
    /// Coleman–Liau index.
    Cli,
}

impl ReadabilityIndex {
    pub const ALL: [ReadabilityIndex; 4] = [
        ReadabilityIndex::Fres,
        ReadabilityIndex::Fkgl,
        ReadabilityIndex::Ari,
        ReadabilityIndex::Cli,
    ];

    /// Short name as shown in reports.
    pub fn name(&self) -> &'static str {
        match self {
            ReadabilityIndex::Fres => "FRES",
            ReadabilityIndex::Fkgl => "FKGL",
            ReadabilityIndex::Ari => "ARI",
            ReadabilityIndex::Cli => "CLI",
        }
    }

    /// Compute the index. Fails if the text has no sentences or no words.
    pub fn score(&self, counts: &TextCounts) -> Result<f64> {
        match self {
            ReadabilityIndex::Fres => {
                let asl = counts.words_per_sentence()?;
                let asw = counts.syllables_per_word()?;
                Ok(206.835 - 1.3 * asl - 60.1 * asw)
            }
            ReadabilityIndex::Fkgl => {
                let asl = counts.words_per_sentence()?;
                let asw = counts.syllables_per_word()?;
                Ok(0.5 * asl + 8.4 * asw - 15.59)
            }
            ReadabilityIndex::Ari => {
                let characters = ratio(counts.letters + counts.digits, counts.words, "words")?;
                let asl = counts.words_per_sentence()?;
                Ok(6.26 * characters + 0.2805 * asl - 31.04)
            }
            ReadabilityIndex::Cli => {
                let letters = counts.letters_per_word()? * 100.0;
                let sentences = 100.0 / counts.words_per_sentence()?;
                Ok(0.055 * letters - 0.35 * sentences - 20.33)
            }
        }
    }

    /// Describe what a score means for a reader.
    pub fn interpret(&self, value: f64) -> String {
        match self {
            ReadabilityIndex::Fres => interpret_reading_ease(value).to_string(),
            ReadabilityIndex::Fkgl | ReadabilityIndex::Ari | ReadabilityIndex::Cli => {
                interpret_grade(value)
            }
        }
    }
}

fn interpret_reading_ease(value: f64) -> &'static str {
    if value > 100.0 {
        "Extremely high readability (<5th grade)."
    } else if value > 90.0 {
        "Very high readability (5th grade)."
    } else if value > 80.0 {
        "High readability (6th grade)."
    } else if value > 70.0 {
        "Above average readability (7th grade)."
    } else if value > 60.0 {
        "Average readability (8-9th grade)."
    } else if value > 50.0 {
        "Below average readability (10-12th grade)."
    } else if value > 30.0 {
        "Low readability (University student)."
    } else if value > 0.0 {
        "Very low readability (Graduate)."
    } else {
        "Extremely low readability (Above graduate)."
    }
}

fn interpret_grade(value: f64) -> String {
    let grade = value.round_ties_even() as i64;
    if grade < 1 {
        "Readability age: <6 (Kindergarten).".to_string()
    } else if grade > 12 {
        "Readability age: >18 (University student and above).".to_string()
    } else {
        format!(
            "Readability age: {}-{} (Grade: {grade}).",
            grade + 5,
            grade + 6
        )
    }
}

impl fmt::Display for ReadabilityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReadabilityIndex {
    type Err = LexstatError;

    fn from_str(name: &str) -> Result<Self> {
        ReadabilityIndex::ALL
            .into_iter()
            .find(|index| index.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| {
                LexstatError::invalid_argument(format!("unknown readability index: {name}"))
            })
    }
}

//! Rules and alphabet tables for Russian text.
//!
//! The rule order matters and is fixed:
//!
//! 1. word separator (whitespace, stop-listed)
//! 2. sentence separator (`.`, `!`, `?` runs that end a sentence)
//! 3. Russian word
//! 4. number
//! 5. generic word-like run
//! 6. punctuation
//!
//! Sentence separators come before punctuation so that a terminal `.` is
//! classified as a boundary, and Russian words come before the generic word
//! rule so that mixed runs like `слово1` fall through to the generic rule.
//!
//! A sentence separator must be followed by whitespace and a capital letter
//! (optionally after a dash or an opening quote), or by nothing but
//! whitespace up to the end of the read window.
//!
//! # Examples
//!
//! ```
//! use lexstat::analysis::language::russian;
//!
//! let scanner = russian::scanner();
//! let tokens = scanner.scan_text("Привет, мир. Как дела?").unwrap();
//!
//! let words = tokens.filter(&[russian::russian_word()], false);
//! assert_eq!(words.join(" "), "Привет мир Как дела");
//!
//! let sentences = tokens.split(&[russian::sentence_separator()], true, false);
//! assert_eq!(sentences.len(), 2);
//! ```

use std::sync::{Arc, LazyLock};

use crate::analysis::scanner::{ScanConfig, Scanner};
use crate::analysis::stop::StopList;
use crate::analysis::token::{Token, TokenType};
use crate::analysis::token_model::{RuleSpec, TokenRegistry};
use crate::error::Result;

/// Vowels; each occurrence counts as one syllable.
pub const RUSSIAN_VOWELS: &str = "аоуэыяёюеи";

/// The 33 lowercase letters of the Russian alphabet.
pub const RUSSIAN_ALPHABET: &str = "абвгдеёжзийклмнопрстуфхцчшщьыъэюя";

/// Characters counted as digits.
pub const DIGITS: &str = "0123456789";

/// Whitespace between words.
pub fn word_separator() -> TokenType {
    TokenType::new("SEP", "WORD")
}

/// Sentence-ending punctuation.
pub fn sentence_separator() -> TokenType {
    TokenType::new("SEP", "SENT")
}

pub fn russian_word() -> TokenType {
    TokenType::new("WORD", "RU")
}

pub fn latin_word() -> TokenType {
    TokenType::new("WORD", "LAT")
}

pub fn number() -> TokenType {
    TokenType::new("NUM", "")
}

/// Any word-like run no more specific rule claimed.
pub fn generic_word() -> TokenType {
    TokenType::new("WORD", "")
}

pub fn punctuation() -> TokenType {
    TokenType::new("PUNC", "")
}

fn rule(token_type: TokenType, pattern: &str) -> RuleSpec {
    RuleSpec {
        tag: token_type.tag().map(str::to_string),
        subtag: token_type.subtag().map(str::to_string),
        pattern: pattern.to_string(),
        followed_by: None,
        not_followed_by: None,
    }
}

/// Rule for Latin-script words. Not part of [`rules`]; hosts that want to
/// count Latin words can splice it in before the generic word rule.
pub fn latin_word_rule() -> RuleSpec {
    RuleSpec {
        not_followed_by: Some(r"\w".to_string()),
        ..rule(latin_word(), r"(?:[a-zA-Z]+['`’./-]?)*[a-zA-Z']+")
    }
}

/// The default Russian rules, in priority order.
pub fn rules() -> Vec<RuleSpec> {
    vec![
        rule(word_separator(), r"\s+"),
        RuleSpec {
            followed_by: Some(r#"\s+(?:[-—] )?["«]?[А-ЯЁ]|\s*$"#.to_string()),
            ..rule(sentence_separator(), r#"[?!.]+["»]?"#)
        },
        RuleSpec {
            not_followed_by: Some(r"\w".to_string()),
            ..rule(russian_word(), r"(?:[а-яА-ЯёЁ]+[./-]?)*[а-яА-ЯёЁ]+")
        },
        RuleSpec {
            not_followed_by: Some(r"\d".to_string()),
            ..rule(number(), r"[-+]?\d+")
        },
        rule(generic_word(), r"[-\w`’']+"),
        rule(punctuation(), r#"[.,;:!?"»«']"#),
    ]
}

/// Compile the default rules into a registry.
pub fn build_registry() -> Result<TokenRegistry> {
    TokenRegistry::from_rules(&rules())
}

static REGISTRY: LazyLock<Arc<TokenRegistry>> = LazyLock::new(|| {
    Arc::new(build_registry().expect("built-in Russian rules should compile"))
});

/// The shared default registry. Compiled once per process.
pub fn registry() -> Arc<TokenRegistry> {
    Arc::clone(&REGISTRY)
}

/// Types dropped from scanner output: whitespace only.
pub fn stop_list() -> StopList {
    StopList::from_types([word_separator()])
}

/// A scanner with the default rules, stop list, and config.
pub fn scanner() -> Scanner {
    scanner_with_config(ScanConfig::default())
}

pub fn scanner_with_config(config: ScanConfig) -> Scanner {
    Scanner::new(registry())
        .with_stop_list(stop_list())
        .with_config(config)
}

/// Number of syllables in a word, i.e. its vowel count.
pub fn syllable_count(word: &Token) -> usize {
    count_in(&word.body().to_lowercase(), RUSSIAN_VOWELS)
}

/// Number of Russian letters in a token, case-insensitively.
pub fn letter_count(token: &Token) -> usize {
    count_in(&token.body().to_lowercase(), RUSSIAN_ALPHABET)
}

/// Number of ASCII digits in a token.
pub fn digit_count(token: &Token) -> usize {
    count_in(token.body(), DIGITS)
}

fn count_in(text: &str, alphabet: &str) -> usize {
    text.chars().filter(|ch| alphabet.contains(*ch)).count()
}

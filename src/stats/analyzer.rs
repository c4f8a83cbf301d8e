//! Statistics over scanned Russian text.
//!
//! A [`RussianAnalyzer`] owns one token list and derives counts, averages,
//! and readability indices from it. Scalar statistics are computed on first
//! use and cached per instance.
//!
//! # Examples
//!
//! ```
//! use lexstat::stats::analyzer::RussianAnalyzer;
//!
//! let analyzer = RussianAnalyzer::from_text("Мама мыла раму. Папа читал.").unwrap();
//!
//! assert_eq!(analyzer.sentence_count(), 2);
//! assert_eq!(analyzer.russian_word_count(), 5);
//! assert_eq!(analyzer.syllable_count(), 10);
//! assert_eq!(analyzer.words_per_sentence().unwrap(), 2.5);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::io::BufRead;
use std::path::Path;

use log::trace;
use serde::Serialize;

use crate::analysis::language::russian;
use crate::analysis::scanner::Scanner;
use crate::analysis::source::{CharSource, Encoding};
use crate::analysis::token::{Token, TokenType};
use crate::analysis::token_list::TokenList;
use crate::error::Result;
use crate::stats::readability::{ReadabilityIndex, TextCounts};

/// Cacheable statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    Sentences,
    RussianWords,
    Syllables,
    RussianLetters,
    Digits,
    WordsPerSentence,
    SyllablesPerWord,
    LettersPerWord,
}

impl Statistic {
    pub const ALL: [Statistic; 8] = [
        Statistic::Sentences,
        Statistic::RussianWords,
        Statistic::Syllables,
        Statistic::RussianLetters,
        Statistic::Digits,
        Statistic::WordsPerSentence,
        Statistic::SyllablesPerWord,
        Statistic::LettersPerWord,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Statistic::Sentences => "sentences",
            Statistic::RussianWords => "russian_words",
            Statistic::Syllables => "syllables",
            Statistic::RussianLetters => "russian_letters",
            Statistic::Digits => "digits",
            Statistic::WordsPerSentence => "words_per_sentence",
            Statistic::SyllablesPerWord => "syllables_per_word",
            Statistic::LettersPerWord => "letters_per_word",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A computed statistic.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(usize),
    Ratio(f64),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(count) => write!(f, "{count}"),
            StatValue::Ratio(ratio) => write!(f, "{ratio:.2}"),
        }
    }
}

/// Text statistics for Russian prose.
///
/// The analyzer is `Send` but not `Sync`: the statistic cache sits in a
/// `RefCell`, so one instance must not be shared between threads without
/// outside locking.
#[derive(Clone, Debug)]
pub struct RussianAnalyzer {
    tokens: TokenList,
    cache: RefCell<HashMap<Statistic, StatValue>>,
}

impl RussianAnalyzer {
    /// Wrap an already scanned token list.
    pub fn from_tokens(tokens: TokenList) -> Self {
        RussianAnalyzer {
            tokens,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Scan text with the default Russian scanner.
    pub fn from_text(text: &str) -> Result<Self> {
        Ok(Self::from_tokens(russian::scanner().scan_text(text)?))
    }

    /// Scan an encoded byte stream with the default Russian scanner.
    pub fn from_reader<R: BufRead>(reader: R, encoding: Encoding) -> Result<Self> {
        Ok(Self::from_tokens(
            russian::scanner().scan_reader(reader, encoding)?,
        ))
    }

    /// Scan a file with the default Russian scanner.
    pub fn from_file<P: AsRef<Path>>(path: P, encoding: Encoding) -> Result<Self> {
        Ok(Self::from_tokens(
            russian::scanner().scan_file(path, encoding)?,
        ))
    }

    /// Scan a source with a custom scanner.
    ///
    /// The statistics still look for the Russian token types, so custom rules
    /// should keep producing them.
    pub fn with_scanner<S: CharSource>(scanner: &Scanner, source: S) -> Result<Self> {
        Ok(Self::from_tokens(scanner.scan(source)?))
    }

    /// The scanned tokens, borrowed.
    pub fn tokens(&self) -> &TokenList {
        &self.tokens
    }

    /// Sentences, each ending with its separator. A trailing run without a
    /// sentence separator is not a sentence. Returns a fresh copy.
    pub fn sentences(&self) -> Vec<TokenList> {
        self.tokens.split(&[russian::sentence_separator()], true, false)
    }

    /// All Russian words, as a fresh copy.
    pub fn russian_words(&self) -> TokenList {
        self.tokens.filter(&[russian::russian_word()], false)
    }

    /// All numbers, as a fresh copy.
    pub fn numbers(&self) -> TokenList {
        self.tokens.filter(&[russian::number()], false)
    }

    /// The sentence with the most tokens. Ties go to the earliest one.
    pub fn longest_sentence(&self) -> Option<TokenList> {
        self.sentences().into_iter().reduce(|longest, sentence| {
            if sentence.len() > longest.len() {
                sentence
            } else {
                longest
            }
        })
    }

    /// The sentence that is hardest to read by `index`, with its score.
    ///
    /// "Hardest" is the lowest score for FRES and the highest for the grade
    /// indices. Sentences without Russian words have no score and are skipped.
    /// Ties go to the earliest sentence.
    pub fn hardest_sentence(&self, index: ReadabilityIndex) -> Option<(TokenList, f64)> {
        let harder = |score: f64, best: f64| match index {
            ReadabilityIndex::Fres => score < best,
            _ => score > best,
        };

        let mut hardest: Option<(TokenList, f64)> = None;
        for sentence in self.sentences() {
            let Ok(score) = RussianAnalyzer::from_tokens(sentence.clone()).index(index) else {
                continue;
            };
            let replace = match &hardest {
                Some((_, best)) => harder(score, *best),
                None => true,
            };
            if replace {
                hardest = Some((sentence, score));
            }
        }
        hardest
    }

    pub fn sentence_count(&self) -> usize {
        self.cached_count(Statistic::Sentences, |analyzer| {
            analyzer.sentences().len()
        })
    }

    pub fn russian_word_count(&self) -> usize {
        self.cached_count(Statistic::RussianWords, |analyzer| {
            analyzer.tokens.count(&russian::russian_word())
        })
    }

    /// Vowels over all Russian words.
    pub fn syllable_count(&self) -> usize {
        self.cached_count(Statistic::Syllables, |analyzer| {
            analyzer
                .of_type(russian::russian_word())
                .map(russian::syllable_count)
                .sum()
        })
    }

    /// Russian letters over all Russian words.
    pub fn letter_count(&self) -> usize {
        self.cached_count(Statistic::RussianLetters, |analyzer| {
            analyzer
                .of_type(russian::russian_word())
                .map(russian::letter_count)
                .sum()
        })
    }

    /// Digits over all numbers.
    pub fn digit_count(&self) -> usize {
        self.cached_count(Statistic::Digits, |analyzer| {
            analyzer
                .of_type(russian::number())
                .map(russian::digit_count)
                .sum()
        })
    }

    pub fn words_per_sentence(&self) -> Result<f64> {
        self.cached_ratio(Statistic::WordsPerSentence, |analyzer| {
            analyzer.counts().words_per_sentence()
        })
    }

    pub fn syllables_per_word(&self) -> Result<f64> {
        self.cached_ratio(Statistic::SyllablesPerWord, |analyzer| {
            analyzer.counts().syllables_per_word()
        })
    }

    pub fn letters_per_word(&self) -> Result<f64> {
        self.cached_ratio(Statistic::LettersPerWord, |analyzer| {
            analyzer.counts().letters_per_word()
        })
    }

    /// All five base counts.
    pub fn counts(&self) -> TextCounts {
        TextCounts {
            sentences: self.sentence_count(),
            words: self.russian_word_count(),
            syllables: self.syllable_count(),
            letters: self.letter_count(),
            digits: self.digit_count(),
        }
    }

    /// Look up any statistic by name.
    pub fn statistic(&self, stat: Statistic) -> Result<StatValue> {
        Ok(match stat {
            Statistic::Sentences => StatValue::Count(self.sentence_count()),
            Statistic::RussianWords => StatValue::Count(self.russian_word_count()),
            Statistic::Syllables => StatValue::Count(self.syllable_count()),
            Statistic::RussianLetters => StatValue::Count(self.letter_count()),
            Statistic::Digits => StatValue::Count(self.digit_count()),
            Statistic::WordsPerSentence => StatValue::Ratio(self.words_per_sentence()?),
            Statistic::SyllablesPerWord => StatValue::Ratio(self.syllables_per_word()?),
            Statistic::LettersPerWord => StatValue::Ratio(self.letters_per_word()?),
        })
    }

    pub fn index(&self, index: ReadabilityIndex) -> Result<f64> {
        index.score(&self.counts())
    }

    /// Flesch reading-ease score.
    pub fn fres(&self) -> Result<f64> {
        self.index(ReadabilityIndex::Fres)
    }

    /// Flesch–Kincaid grade level.
    pub fn fkgl(&self) -> Result<f64> {
        self.index(ReadabilityIndex::Fkgl)
    }

    /// Automated readability index.
    pub fn ari(&self) -> Result<f64> {
        self.index(ReadabilityIndex::Ari)
    }

    /// Coleman–Liau index.
    pub fn cli(&self) -> Result<f64> {
        self.index(ReadabilityIndex::Cli)
    }

    fn of_type(&self, token_type: TokenType) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(move |token| token.is_type(&token_type))
    }

    fn cached(&self, stat: Statistic) -> Option<StatValue> {
        self.cache.borrow().get(&stat).copied()
    }

    fn store(&self, stat: Statistic, value: StatValue) {
        trace!("cached {stat} = {value}");
        self.cache.borrow_mut().insert(stat, value);
    }

    fn cached_count(&self, stat: Statistic, compute: impl FnOnce(&Self) -> usize) -> usize {
        if let Some(StatValue::Count(count)) = self.cached(stat) {
            return count;
        }
        let count = compute(self);
        self.store(stat, StatValue::Count(count));
        count
    }

    /// Failed ratios are not cached.
    fn cached_ratio(&self, stat: Statistic, compute: impl FnOnce(&Self) -> Result<f64>) -> Result<f64> {
        if let Some(StatValue::Ratio(ratio)) = self.cached(stat) {
            return Ok(ratio);
        }
        let ratio = compute(self)?;
        self.store(stat, StatValue::Ratio(ratio));
        Ok(ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexstatError;

    fn analyzer(text: &str) -> RussianAnalyzer {
        RussianAnalyzer::from_text(text).unwrap()
    }

    #[test]
    fn test_counts() {
        let ra = analyzer("Привет, мир! В 2024 году было 12 месяцев.");
        assert_eq!(
            ra.counts(),
            TextCounts {
                sentences: 2,
                words: 6,
                syllables: 10,
                letters: 25,
                digits: 6,
            }
        );
    }

    #[test]
    fn test_trailing_fragment_is_not_a_sentence() {
        let ra = analyzer("Раз два. Три четыре");
        assert_eq!(ra.sentence_count(), 1);
        assert_eq!(ra.russian_word_count(), 4);
        assert_eq!(ra.sentences()[0].join(" "), "Раз два .");
    }

    #[test]
    fn test_cache_is_filled_lazily() {
        let ra = analyzer("Один два три. Четыре.");
        assert!(ra.cache.borrow().is_empty());

        assert_eq!(ra.sentence_count(), 2);
        assert_eq!(ra.cached(Statistic::Sentences), Some(StatValue::Count(2)));
        assert!(ra.cached(Statistic::Syllables).is_none());

        assert_eq!(ra.words_per_sentence().unwrap(), 2.0);
        assert_eq!(
            ra.cached(Statistic::WordsPerSentence),
            Some(StatValue::Ratio(2.0))
        );
        assert!(ra.cached(Statistic::RussianWords).is_some());
    }

    #[test]
    fn test_cached_value_is_reused() {
        let ra = analyzer("Один два три.");
        ra.store(Statistic::RussianWords, StatValue::Count(99));
        assert_eq!(ra.russian_word_count(), 99);
    }

    #[test]
    fn test_returned_sequences_are_independent() {
        let ra = analyzer("Один два. Три.");
        let count = ra.sentence_count();

        let mut sentences = ra.sentences();
        sentences.clear();
        let mut words = ra.russian_words();
        words.push(Token::new(russian::russian_word(), "лишнее"));

        assert_eq!(ra.sentences().len(), count);
        assert_eq!(ra.russian_words().len(), 3);
        assert_eq!(ra.russian_word_count(), 3);
    }

    #[test]
    fn test_failed_ratio_is_not_cached() {
        let ra = analyzer("без точки");
        assert!(matches!(
            ra.words_per_sentence(),
            Err(LexstatError::Statistics(_))
        ));
        assert!(ra.cached(Statistic::WordsPerSentence).is_none());
        assert!(ra.fres().is_err());
    }

    #[test]
    fn test_fres_matches_formula() {
        let ra = analyzer("Мама мыла раму. Папа читал.");
        let expected = 206.835 - 1.3 * (5.0 / 2.0) - 60.1 * (10.0 / 5.0);
        assert!((ra.fres().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_statistic_lookup() {
        let ra = analyzer("Мама мыла раму.");
        assert_eq!(ra.statistic(Statistic::RussianWords).unwrap(), StatValue::Count(3));
        assert_eq!(
            ra.statistic(Statistic::LettersPerWord).unwrap(),
            StatValue::Ratio(12.0 / 3.0)
        );
        for stat in Statistic::ALL {
            assert!(ra.statistic(stat).is_ok());
        }
    }

    #[test]
    fn test_longest_sentence_prefers_first() {
        let ra = analyzer("Раз два. Три четыре. Пять.");
        assert_eq!(ra.longest_sentence().unwrap().join(" "), "Раз два .");
        assert!(analyzer("").longest_sentence().is_none());
    }

    #[test]
    fn test_hardest_sentence() {
        let ra = analyzer("Кот спит. Высокопоставленные представители администрации выступили. 42!");
        let (sentence, score) = ra.hardest_sentence(ReadabilityIndex::Fres).unwrap();
        assert!(sentence.join(" ").starts_with("Высокопоставленные"));
        assert!(score < ra.fres().unwrap());

        let (sentence, _) = ra.hardest_sentence(ReadabilityIndex::Fkgl).unwrap();
        assert!(sentence.join(" ").starts_with("Высокопоставленные"));
    }

    #[test]
    fn test_numbers_and_digits() {
        let ra = analyzer("Было -15 градусов и 3 дня.");
        assert_eq!(ra.numbers().join(" "), "-15 3");
        assert_eq!(ra.digit_count(), 3);
    }
}

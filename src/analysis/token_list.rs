//! Ordered token sequences and the operations used to derive words, numbers,
//! and sentences from scanner output.
//!
//! Every operation here is non-mutating: [`TokenList::filter`] and
//! [`TokenList::split`] return new, independently owned lists, so callers can
//! keep and modify results without affecting the list they came from.
//!
//! # Examples
//!
//! ```
//! use lexstat::analysis::token::{Token, TokenType};
//! use lexstat::analysis::token_list::TokenList;
//!
//! let word = TokenType::new("WORD", "");
//! let end = TokenType::new("SEP", "SENT");
//!
//! let tokens: TokenList = vec![
//!     Token::new(word.clone(), "one"),
//!     Token::new(word.clone(), "two"),
//!     Token::new(end.clone(), "."),
//!     Token::new(word.clone(), "dangling"),
//! ]
//! .into();
//!
//! let sentences = tokens.split(&[end.clone()], true, false);
//! assert_eq!(sentences.len(), 1);
//! assert_eq!(sentences[0].join(" "), "one two .");
//!
//! let words = tokens.filter(&[word.clone()], false);
//! assert_eq!(words.join("|"), "one|two|dangling");
//! assert_eq!(tokens.count(&word), 3);
//! ```

use std::ops::Index;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, TokenType};

/// An insertion-ordered sequence of tokens.
///
/// `Clone` produces a deep, independent copy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Create an empty token list.
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Append a token.
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the list holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Iterate over the tokens in order.
    pub fn iter(&self) -> slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }

    /// Select tokens by type.
    ///
    /// With `remove == true` the result holds every token whose type is *not*
    /// in `types`; with `remove == false` it holds only the tokens whose type
    /// is in `types`. Order is preserved.
    pub fn filter(&self, types: &[TokenType], remove: bool) -> TokenList {
        self.tokens
            .iter()
            .filter(|token| types.contains(token.token_type()) != remove)
            .cloned()
            .collect()
    }

    /// Partition the list into groups terminated by separator tokens.
    ///
    /// Any token whose type is in `types` closes the current group; with
    /// `keep_separator` it is appended to the group it closes. A run that is
    /// never closed by a separator is dropped.
    ///
    /// With `reverse`, the list is walked from the last token to the first,
    /// each group collects tokens in walk order, and the finished list of
    /// groups is reversed. The dropped run is then the one before the first
    /// separator, and each separator is grouped with the run that follows it
    /// in source order.
    pub fn split(&self, types: &[TokenType], keep_separator: bool, reverse: bool) -> Vec<TokenList> {
        if reverse {
            let mut groups = split_walk(self.tokens.iter().rev(), types, keep_separator);
            groups.reverse();
            groups
        } else {
            split_walk(self.tokens.iter(), types, keep_separator)
        }
    }

    /// Concatenate token bodies with `separator` between them.
    pub fn join(&self, separator: &str) -> String {
        let mut joined = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                joined.push_str(separator);
            }
            joined.push_str(token.body());
        }
        joined
    }

    /// Count the tokens of the given type.
    pub fn count(&self, token_type: &TokenType) -> usize {
        self.tokens
            .iter()
            .filter(|token| token.is_type(token_type))
            .count()
    }

    /// Total number of characters across all bodies.
    pub fn char_count(&self) -> usize {
        self.tokens.iter().map(Token::len).sum()
    }
}

fn split_walk<'a, I>(tokens: I, types: &[TokenType], keep_separator: bool) -> Vec<TokenList>
where
    I: Iterator<Item = &'a Token>,
{
    let mut groups = Vec::new();
    let mut current = TokenList::new();

    for token in tokens {
        if types.contains(token.token_type()) {
            if keep_separator {
                current.push(token.clone());
            }
            groups.push(std::mem::take(&mut current));
        } else {
            current.push(token.clone());
        }
    }

    groups
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        TokenList { tokens }
    }
}

impl FromIterator<Token> for TokenList {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        TokenList {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl Extend<Token> for TokenList {
    fn extend<I: IntoIterator<Item = Token>>(&mut self, iter: I) {
        self.tokens.extend(iter);
    }
}

impl IntoIterator for TokenList {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

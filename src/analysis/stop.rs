//! Stop lists: token types the scanner recognizes but does not emit.
//!
//! A stop-listed token still consumes its text and still ends a pending run
//! of unmatched characters, so it acts as a boundary. It is simply never
//! appended to the output. Whitespace is the usual example.
//!
//! # Examples
//!
//! ```
//! use lexstat::analysis::stop::StopList;
//! use lexstat::analysis::token::TokenType;
//!
//! let stop = StopList::from_types([TokenType::new("SEP", "WORD")]);
//! assert!(stop.contains(&TokenType::new("SEP", "WORD")));
//! assert!(!stop.contains(&TokenType::new("SEP", "SENT")));
//! ```

use std::collections::HashSet;
use std::collections::hash_set;

use crate::analysis::token::{Token, TokenType};
use crate::analysis::token_list::TokenList;

/// A set of token types excluded from scanner output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StopList {
    types: HashSet<TokenType>,
}

impl StopList {
    /// Create an empty stop list.
    pub fn new() -> Self {
        StopList {
            types: HashSet::new(),
        }
    }

    /// Create a stop list from token types.
    pub fn from_types<I>(types: I) -> Self
    where
        I: IntoIterator<Item = TokenType>,
    {
        StopList {
            types: types.into_iter().collect(),
        }
    }

    /// Add a token type. Returns `false` if it was already present.
    pub fn insert(&mut self, token_type: TokenType) -> bool {
        self.types.insert(token_type)
    }

    pub fn contains(&self, token_type: &TokenType) -> bool {
        self.types.contains(token_type)
    }

    /// Check whether a token would be suppressed.
    pub fn is_stopped(&self, token: &Token) -> bool {
        self.contains(token.token_type())
    }

    /// Remove stop-listed tokens from an already scanned list.
    pub fn apply(&self, tokens: &TokenList) -> TokenList {
        tokens
            .iter()
            .filter(|token| !self.is_stopped(token))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, TokenType> {
        self.types.iter()
    }
}

impl FromIterator<TokenType> for StopList {
    fn from_iter<I: IntoIterator<Item = TokenType>>(iter: I) -> Self {
        StopList::from_types(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_list_membership() {
        let mut stop = StopList::new();
        assert!(stop.is_empty());
        assert!(stop.insert(TokenType::new("SEP", "WORD")));
        assert!(!stop.insert(TokenType::new("SEP", "WORD")));
        assert_eq!(stop.len(), 1);
        assert!(!stop.contains(&TokenType::unmatched()));
    }

    #[test]
    fn test_apply() {
        let space = TokenType::new("SEP", "WORD");
        let word = TokenType::new("WORD", "");
        let tokens: TokenList = vec![
            Token::new(word.clone(), "a"),
            Token::new(space.clone(), " "),
            Token::new(word.clone(), "b"),
        ]
        .into();

        let stop: StopList = [space].into_iter().collect();
        let kept = stop.apply(&tokens);
        assert_eq!(kept.join("|"), "a|b");
    }
}

//! Token rules and the ordered rule registry.
//!
//! A [`TokenModel`] pairs a [`TokenType`] with a pattern that is only ever
//! matched at the very start of the text it is given. A [`TokenRegistry`]
//! holds models in priority order: the first model that matches wins, even
//! if a later one would have matched a longer prefix.
//!
//! # Trailing context
//!
//! Rules often need to look past the end of their own match, e.g. "a run of
//! letters not followed by a digit". The `regex` crate has no look-around, so
//! a model may carry a [`Lookahead`] guard that is checked against the text
//! right after the candidate match. If the longest match fails the guard,
//! shorter prefixes the pattern matches exactly are tried, longest first.
//!
//! # Examples
//!
//! ```
//! use lexstat::analysis::token::TokenType;
//! use lexstat::analysis::token_model::{Lookahead, TokenModel, TokenRegistry};
//!
//! let registry = TokenRegistry::new(vec![
//!     TokenModel::new(TokenType::new("NUM", ""), r"\d+").unwrap(),
//!     TokenModel::new(TokenType::new("WORD", ""), r"[a-z]+")
//!         .unwrap()
//!         .with_lookahead(Lookahead::not_followed_by(r"\w").unwrap()),
//! ]);
//!
//! let (model, text) = registry.find_match("abc def").unwrap();
//! assert_eq!(model.tag(), Some("WORD"));
//! assert_eq!(text, "abc");
//!
//! // "abc" runs into a digit and every shorter prefix into a letter.
//! assert!(registry.find_match("abc1").is_none());
//! ```

use std::slice;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenType;
use crate::error::{LexstatError, Result};

/// Compile `pattern` so that it can only match at position 0.
fn compile_anchored(pattern: &str, exact: bool) -> Result<Regex> {
    let anchored = if exact {
        format!(r"\A(?:{pattern})\z")
    } else {
        format!(r"\A(?:{pattern})")
    };
    Regex::new(&anchored)
        .map_err(|e| LexstatError::invalid_rule(format!("invalid pattern {pattern:?}: {e}")))
}

/// A guard on the text following a match.
#[derive(Clone, Debug)]
pub enum Lookahead {
    /// The following text must start with a match of this pattern.
    FollowedBy(Regex),
    /// The following text must not start with a match of this pattern.
    NotFollowedBy(Regex),
}

impl Lookahead {
    pub fn followed_by(pattern: &str) -> Result<Self> {
        Ok(Lookahead::FollowedBy(compile_anchored(pattern, false)?))
    }

    pub fn not_followed_by(pattern: &str) -> Result<Self> {
        Ok(Lookahead::NotFollowedBy(compile_anchored(pattern, false)?))
    }

    /// Check the guard against the text after a candidate match.
    pub fn allows(&self, rest: &str) -> bool {
        match self {
            Lookahead::FollowedBy(regex) => regex.is_match(rest),
            Lookahead::NotFollowedBy(regex) => !regex.is_match(rest),
        }
    }
}

/// A classification rule: a token type plus an anchored matcher.
#[derive(Clone, Debug)]
pub struct TokenModel {
    token_type: TokenType,
    pattern: String,
    prefix: Regex,
    exact: Regex,
    lookahead: Option<Lookahead>,
}

impl TokenModel {
    /// Compile a model.
    ///
    /// Fails with [`LexstatError::InvalidRegistryRule`] if the pattern does
    /// not compile or can match the empty string. A rule that can consume
    /// nothing would never move the scanner forward.
    pub fn new<S: Into<String>>(token_type: TokenType, pattern: S) -> Result<Self> {
        let pattern = pattern.into();
        let prefix = compile_anchored(&pattern, false)?;
        let exact = compile_anchored(&pattern, true)?;

        if exact.is_match("") {
            return Err(LexstatError::invalid_rule(format!(
                "pattern {pattern:?} for {token_type} matches the empty string"
            )));
        }

        Ok(TokenModel {
            token_type,
            pattern,
            prefix,
            exact,
            lookahead: None,
        })
    }

    /// Attach a trailing-context guard.
    pub fn with_lookahead(mut self, lookahead: Lookahead) -> Self {
        self.lookahead = Some(lookahead);
        self
    }

    pub fn token_type(&self) -> &TokenType {
        &self.token_type
    }

    pub fn tag(&self) -> Option<&str> {
        self.token_type.tag()
    }

    pub fn subtag(&self) -> Option<&str> {
        self.token_type.subtag()
    }

    /// The pattern as written, without anchoring.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn lookahead(&self) -> Option<&Lookahead> {
        self.lookahead.as_ref()
    }

    /// Return the prefix of `text` this model matches, or `None`.
    ///
    /// Matching is anchored at the start of `text`; nothing later in the text
    /// is searched. Empty matches count as no match.
    pub fn match_prefix<'t>(&self, text: &'t str) -> Option<&'t str> {
        let end = self.prefix.find(text)?.end();
        if end == 0 {
            return None;
        }

        let Some(lookahead) = &self.lookahead else {
            return Some(&text[..end]);
        };
        if lookahead.allows(&text[end..]) {
            return Some(&text[..end]);
        }

        // Backtrack over shorter candidates, longest first.
        text[..end]
            .char_indices()
            .rev()
            .map(|(offset, _)| offset)
            .take_while(|&offset| offset > 0)
            .find(|&offset| {
                self.exact.is_match(&text[..offset]) && lookahead.allows(&text[offset..])
            })
            .map(|offset| &text[..offset])
    }
}

/// Serializable description of a [`TokenModel`], used for rule files.
///
/// ```
/// use lexstat::analysis::token_model::TokenRegistry;
///
/// let registry = TokenRegistry::from_json(r#"[
///     {"tag": "SEP", "subtag": "WORD", "pattern": "\\s+"},
///     {"tag": "WORD", "subtag": "", "pattern": "\\w+", "not_followed_by": "'"}
/// ]"#).unwrap();
///
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub subtag: Option<String>,
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_followed_by: Option<String>,
}

impl RuleSpec {
    /// Compile this rule into a model.
    pub fn build(&self) -> Result<TokenModel> {
        let token_type = TokenType::from_parts(self.tag.clone(), self.subtag.clone());
        let model = TokenModel::new(token_type, self.pattern.as_str())?;

        match (&self.followed_by, &self.not_followed_by) {
            (None, None) => Ok(model),
            (Some(pattern), None) => Ok(model.with_lookahead(Lookahead::followed_by(pattern)?)),
            (None, Some(pattern)) => {
                Ok(model.with_lookahead(Lookahead::not_followed_by(pattern)?))
            }
            (Some(_), Some(_)) => Err(LexstatError::invalid_rule(format!(
                "rule {:?} sets both followed_by and not_followed_by",
                self.pattern
            ))),
        }
    }
}

/// Ordered, immutable list of token models.
#[derive(Clone, Debug, Default)]
pub struct TokenRegistry {
    models: Vec<TokenModel>,
}

impl TokenRegistry {
    pub fn new(models: Vec<TokenModel>) -> Self {
        TokenRegistry { models }
    }

    /// Build a registry from rule descriptions, keeping their order.
    pub fn from_rules(rules: &[RuleSpec]) -> Result<Self> {
        let models = rules
            .iter()
            .map(RuleSpec::build)
            .collect::<Result<Vec<_>>>()?;
        Ok(TokenRegistry::new(models))
    }

    /// Build a registry from a JSON array of [`RuleSpec`] objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Vec<RuleSpec> = serde_json::from_str(json)?;
        Self::from_rules(&rules)
    }

    /// Try each model in order and return the first non-empty match.
    pub fn find_match<'t>(&self, text: &'t str) -> Option<(&TokenModel, &'t str)> {
        self.models
            .iter()
            .find_map(|model| model.match_prefix(text).map(|matched| (model, matched)))
    }

    pub fn iter(&self) -> slice::Iter<'_, TokenModel> {
        self.models.iter()
    }

    pub fn get(&self, index: usize) -> Option<&TokenModel> {
        self.models.get(index)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl FromIterator<TokenModel> for TokenRegistry {
    fn from_iter<I: IntoIterator<Item = TokenModel>>(iter: I) -> Self {
        TokenRegistry::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TokenRegistry {
    type Item = &'a TokenModel;
    type IntoIter = slice::Iter<'a, TokenModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}

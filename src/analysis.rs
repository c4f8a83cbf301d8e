//! Lexical analysis: character sources, the sliding read buffer, token rules,
//! and the scanner that ties them together.
//!
//! The scanner itself knows nothing about any language. Classification comes
//! entirely from the ordered rules in a [`token_model::TokenRegistry`]; the
//! [`language`] module supplies ready-made rule sets.

pub mod language;
pub mod read_buffer;
pub mod scanner;
pub mod source;
pub mod stop;
pub mod token;
pub mod token_list;
pub mod token_model;

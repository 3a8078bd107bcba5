//! Token definitions for the bracketed symbol-library format
//!
//! Tokens are matched by an ordered table of regular expression rules.
//! The table is compiled once on first use; the rules are written to be
//! mutually exclusive by first character, and the tokenizer verifies that
//! at every position.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Classification of a single lexical rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Str,
    Name,
    Number,
    LeftParen,
    RightParen,
    Whitespace,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TokenKind::Str => "string",
            TokenKind::Name => "name",
            TokenKind::Number => "number",
            TokenKind::LeftParen => "left parenthesis",
            TokenKind::RightParen => "right parenthesis",
            TokenKind::Whitespace => "whitespace",
        };
        f.write_str(label)
    }
}

/// A token produced by the tokenizer
///
/// Payload variants carry the matched text verbatim; `Str` keeps its
/// surrounding quotes until the parser strips them.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LeftParen,
    RightParen,
    Name(String),
    Number(String),
    Str(String),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::LeftParen => TokenKind::LeftParen,
            Token::RightParen => TokenKind::RightParen,
            Token::Name(_) => TokenKind::Name,
            Token::Number(_) => TokenKind::Number,
            Token::Str(_) => TokenKind::Str,
        }
    }
}

/// The lexical rule set, in priority order
///
/// A string is `"` … `"` where `\"` stands for an embedded quote and no
/// other escape is processed. A name is an ASCII letter followed by word
/// characters. A number is an optional sign, optional digits-then-point,
/// and at least one trailing digit; it stays text all the way through the
/// pipeline. Whitespace is matched so the tokenizer can discard it.
pub(crate) static RULES: Lazy<Vec<(TokenKind, Regex)>> = Lazy::new(|| {
    vec![
        (TokenKind::Str, Regex::new(r#"^"(?:\\"|[^"])*""#).unwrap()),
        (TokenKind::Name, Regex::new(r"^[a-zA-Z]\w*").unwrap()),
        (TokenKind::Number, Regex::new(r"^[+-]?(?:\d*\.)?\d+").unwrap()),
        (TokenKind::LeftParen, Regex::new(r"^\(").unwrap()),
        (TokenKind::RightParen, Regex::new(r"^\)").unwrap()),
        (TokenKind::Whitespace, Regex::new(r"^\s+").unwrap()),
    ]
});

//! Tokenizer for the bracketed symbol-library format
//!
//! A single forward pass over the source. Each call to `next` tries every
//! lexical rule at the current position, checks that at most one matched,
//! and advances past the match. Whitespace is matched like any other rule
//! but filtered out before a token is yielded, so the parser never sees it.

use crate::sexpr::tokens::{Token, TokenKind, RULES};
use std::fmt;

/// Errors that can occur during tokenization
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// More than one lexical rule matched at the same position
    ///
    /// The rule set is required to be mutually exclusive; this is a
    /// contract check on the rules, not a malformed-input error. Carries
    /// every competing match.
    AmbiguousToken {
        position: usize,
        matches: Vec<(TokenKind, String)>,
    },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::AmbiguousToken { position, matches } => {
                write!(f, "ambiguous token at byte {}:", position)?;
                for (kind, text) in matches {
                    write!(f, " {} {:?}", kind, text)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for LexError {}

/// A lazy tokenizer over a source string
///
/// Yields tokens in source order. Not restartable; create a new tokenizer
/// to scan again.
pub struct Tokenizer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// Every rule that matches at the current position, in priority order
    fn matches_at(&self, rest: &str) -> Vec<(TokenKind, String)> {
        RULES
            .iter()
            .filter_map(|(kind, rule)| {
                rule.find(rest).map(|m| (*kind, m.as_str().to_string()))
            })
            .collect()
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.source.len() {
            let rest = &self.source[self.pos..];
            let mut matches = self.matches_at(rest);
            if matches.len() > 1 {
                return Some(Err(LexError::AmbiguousToken {
                    position: self.pos,
                    matches,
                }));
            }
            let (kind, text) = match matches.pop() {
                Some(found) => found,
                None => {
                    // No rule matched: drop one character and resume.
                    // Stray bytes are discarded the same way whitespace is.
                    let first = rest.chars().next().map_or(1, char::len_utf8);
                    self.pos += first;
                    continue;
                }
            };
            self.pos += text.len();
            let token = match kind {
                TokenKind::Whitespace => continue,
                TokenKind::LeftParen => Token::LeftParen,
                TokenKind::RightParen => Token::RightParen,
                TokenKind::Name => Token::Name(text),
                TokenKind::Number => Token::Number(text),
                TokenKind::Str => Token::Str(text),
            };
            return Some(Ok(token));
        }
        None
    }
}

/// Convenience function to tokenize a string and collect all tokens
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Tokenizer::new(source).collect()
}

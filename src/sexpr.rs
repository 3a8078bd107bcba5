//! S-expression pipeline for the KiCad symbol-library format
//!
//! The pipeline runs in four stages:
//!
//! 1. Tokenization: an ordered rule table turns source text into a lazy
//!    token stream, discarding whitespace (`tokens`, `lexer`).
//! 2. Parsing: recursive descent builds the owned tree under a synthetic
//!    `start` root (`parser`).
//! 3. Traversal: document-order query primitives over the tree (`tree`).
//! 4. Serialization: the tree renders back to bracketed text, or to JSON
//!    for inspection (`writer`).

pub mod lexer;
pub mod parser;
pub mod tokens;
pub mod tree;
pub mod writer;

pub use lexer::{tokenize, LexError, Tokenizer};
pub use parser::{parse, ParseError};
pub use tokens::{Token, TokenKind};
pub use tree::{Node, Value};
pub use writer::{serialize, to_json};

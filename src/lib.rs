//! # Introduction
//!
//! A syntax analyzer for Jack, the small object-based language of the
//! nand2tetris course. Source text is tokenized and parsed into a concrete
//! parse tree; both the token stream and the tree render to the XML dialect
//! used by the course's comparison tools.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Parse tree → XML
//!                    └──────────────────────────→ XML
//! ```
//!
//! 1. [`parser::lexer`]: strips whitespace and comments and classifies
//!    tokens.
//! 2. [`parser::parse`]: recursive descent over the Jack grammar, one
//!    [`parser::tree::ParseNode::Branch`] per rule.
//! 3. [`xml`]: renders tokens and trees.
//! 4. [`driver`]: batch processing of `.jack` files on disk, configured by
//!    [`config::Config`]; not needed for in-memory use.
//!
//! ## Example
//!
//! ```
//! let tree = jack_analyzer::analyze("class Main { }").unwrap();
//! let xml = jack_analyzer::xml::tree_document(&tree);
//! assert!(xml.starts_with("<class>\n  <keyword> class </keyword>"));
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod parser;
pub mod xml;

pub use error::AnalyzerError;
pub use parser::lexer::{LexError, LexErrorKind, Lexer, Token, TokenKind};
pub use parser::parse::{Parser, SyntaxError};
pub use parser::tree::{ParseNode, SourceLocation};

/// Tokenize one compilation unit.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Parse a token sequence holding exactly one class.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<ParseNode, SyntaxError> {
    Parser::new(tokens).parse_class()
}

/// Tokenize and parse one compilation unit.
pub fn analyze(source: &str) -> Result<ParseNode, AnalyzerError> {
    let tokens = tokenize(source)?;
    Ok(parse_tokens(tokens)?)
}

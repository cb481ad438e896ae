//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, the token cursor, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with one method per grammar
//! rule, organized as follows:
//! - This module: Parser struct, cursor and expect helpers, coordination
//! - `declarations`: class, class variables, subroutines, parameters, locals
//! - `statements`: statement sequences and the five statement kinds
//! - `expressions`: expressions, terms, subroutine calls, argument lists
//!
//! # Lookahead
//!
//! Every decision is made on the current token alone, except for a term that
//! starts with an identifier, which also inspects the token after it. The
//! cursor never moves backwards.
//!
//! # Nesting
//!
//! Expressions, terms and statement blocks recurse. The parser counts how deep
//! it is and fails with a [`SyntaxError`] past [`MAX_NESTING_DEPTH`], so deep
//! input is rejected instead of exhausting the stack.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::lexer::{Token, TokenKind};
use crate::parser::tree::{BranchBuilder, ParseNode};

/// Deepest nesting of expressions, terms and statement blocks accepted.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parser error type
///
/// Raised on the first token that does not fit the rule being parsed; there is
/// no recovery, the whole compilation unit is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "syntax error in {production}: expected {expected}, found {}",
    describe_found(.found)
)]
pub struct SyntaxError {
    /// Grammar rule that was being parsed
    pub production: &'static str,
    /// Human-readable description of what the rule needed next
    pub expected: String,
    /// The offending token, `None` at end of input
    pub found: Option<Token>,
}

fn describe_found(found: &Option<Token>) -> String {
    match found {
        Some(token) => format!("{} at {}", token, token.location),
        None => "end of input".to_string(),
    }
}

/// Recursive descent parser for one Jack class
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse the whole token sequence as a single class.
    ///
    /// Tokens left over after the class's closing brace are an error.
    pub fn parse_class(&mut self) -> Result<ParseNode, SyntaxError> {
        let class = self.compile_class()?;

        if !self.is_at_end() {
            return Err(self.error("class", "end of input"));
        }

        log::debug!("parsed class with {} tokens", self.position);
        Ok(class)
    }

    // ===== Cursor =====

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Consume the current token.
    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        Some(token)
    }

    // ===== Helper methods =====

    /// Start a branch for `tag`.
    pub(crate) fn open(&self, tag: &'static str) -> BranchBuilder {
        log::trace!("enter {} at token {}", tag, self.position);
        BranchBuilder::new(tag)
    }

    /// Go one level deeper into a recursive rule.
    ///
    /// Not undone on error; a failed parse is never resumed.
    pub(crate) fn enter(
        &mut self,
        production: &'static str,
    ) -> Result<(), SyntaxError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(
                production,
                format!("nesting depth <= {MAX_NESTING_DEPTH}"),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    pub(crate) fn check_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    pub(crate) fn check_any_keyword(&self, keywords: &[&str]) -> bool {
        self.peek().is_some_and(|t| {
            t.kind == TokenKind::Keyword && keywords.contains(&t.text.as_str())
        })
    }

    pub(crate) fn check_symbol(&self, symbol: char) -> bool {
        self.peek().is_some_and(|t| t.is_symbol(symbol))
    }

    pub(crate) fn error(
        &self,
        production: &'static str,
        expected: impl Into<String>,
    ) -> SyntaxError {
        SyntaxError {
            production,
            expected: expected.into(),
            found: self.peek().cloned(),
        }
    }

    pub(crate) fn expect_keyword(
        &mut self,
        production: &'static str,
        keyword: &str,
    ) -> Result<Token, SyntaxError> {
        if self.check_keyword(keyword) {
            self.take(production)
        } else {
            Err(self.error(production, format!("keyword '{keyword}'")))
        }
    }

    pub(crate) fn expect_any_keyword(
        &mut self,
        production: &'static str,
        keywords: &[&str],
    ) -> Result<Token, SyntaxError> {
        if self.check_any_keyword(keywords) {
            self.take(production)
        } else {
            let options: Vec<String> =
                keywords.iter().map(|k| format!("'{k}'")).collect();
            Err(self.error(
                production,
                format!("one of {}", options.join(", ")),
            ))
        }
    }

    pub(crate) fn expect_symbol(
        &mut self,
        production: &'static str,
        symbol: char,
    ) -> Result<Token, SyntaxError> {
        if self.check_symbol(symbol) {
            self.take(production)
        } else {
            Err(self.error(production, format!("symbol '{symbol}'")))
        }
    }

    /// Expect an identifier; `role` names it in the error, e.g. "variable name".
    pub(crate) fn expect_identifier(
        &mut self,
        production: &'static str,
        role: &str,
    ) -> Result<Token, SyntaxError> {
        if self.peek().is_some_and(Token::is_identifier) {
            self.take(production)
        } else {
            Err(self.error(production, role))
        }
    }

    /// Consume the current token, failing only at end of input.
    pub(crate) fn take(
        &mut self,
        production: &'static str,
    ) -> Result<Token, SyntaxError> {
        match self.advance() {
            Some(token) => Ok(token),
            None => Err(self.error(production, "a token")),
        }
    }
}

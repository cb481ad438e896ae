//! Jack source code front end
//!
//! This module turns Jack source text into a concrete parse tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → parse tree)
//! - [`tree`]: Parse tree node definitions
//! - [`tables`]: Reserved words, symbols and operators
//!
//! # Supported Grammar
//!
//! The full Jack grammar of one class per compilation unit, with `^` and `#`
//! (shift left / shift right) accepted both as unary and binary operators.
//! No semantic checks are made: names are never resolved and types are never
//! compared.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per grammar rule, with at
//! most two tokens of lookahead and no backtracking.
//! No external parser generator dependencies.

pub mod lexer;
pub mod parse;
pub mod tables;
pub mod tree;

mod declarations;
mod expressions;
mod statements;

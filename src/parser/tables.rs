//! Reserved words, symbols and operators of the Jack grammar
//!
//! The tables are built once on first use and never mutated afterwards, so
//! every lexer and parser instance in the process shares them read-only.

use rustc_hash::FxHashSet;
use std::sync::LazyLock;

/// Reserved words; an identifier-shaped run matching one of these is a keyword.
pub const KEYWORDS: [&str; 21] = [
    "class",
    "constructor",
    "function",
    "method",
    "field",
    "static",
    "var",
    "int",
    "char",
    "boolean",
    "void",
    "true",
    "false",
    "null",
    "this",
    "let",
    "do",
    "if",
    "else",
    "while",
    "return",
];

/// Single-character symbols, including the shift operators `^` and `#`.
pub const SYMBOLS: [char; 21] = [
    '{', '}', '(', ')', '[', ']', '.', ',', ';', '+', '-', '*', '/', '&', '|',
    '<', '>', '=', '~', '^', '#',
];

/// Symbols allowed between two terms of an expression.
pub const BINARY_OPS: [char; 11] =
    ['+', '-', '*', '/', '&', '|', '<', '>', '=', '^', '#'];

/// Symbols allowed as a prefix of a term.
pub const UNARY_OPS: [char; 4] = ['-', '~', '^', '#'];

/// Keywords usable as a term on their own.
pub const KEYWORD_CONSTANTS: [&str; 4] = ["true", "false", "null", "this"];

static KEYWORD_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| KEYWORDS.iter().copied().collect());

static SYMBOL_SET: LazyLock<FxHashSet<char>> =
    LazyLock::new(|| SYMBOLS.iter().copied().collect());

pub fn is_keyword(word: &str) -> bool {
    KEYWORD_SET.contains(word)
}

pub fn is_symbol(ch: char) -> bool {
    SYMBOL_SET.contains(&ch)
}

pub fn is_binary_op(ch: char) -> bool {
    BINARY_OPS.contains(&ch)
}

pub fn is_unary_op(ch: char) -> bool {
    UNARY_OPS.contains(&ch)
}

pub fn is_keyword_constant(word: &str) -> bool {
    KEYWORD_CONSTANTS.contains(&word)
}

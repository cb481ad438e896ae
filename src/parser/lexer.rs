//! Lexer (tokenizer) for Jack source code
//!
//! Converts raw source text into a flat [`Token`] sequence consumed by the
//! parser. Whitespace and the three comment forms (`// ...`, `/* ... */` and
//! `/** ... */`) are discarded while scanning.
//!
//! The lexer holds no state beyond the source it was created for, so a fresh
//! [`Lexer`] per compilation unit is all that is needed to restart it.

use super::tables;
use super::tree::SourceLocation;
use std::fmt;

/// Largest value an integer constant may hold.
pub const MAX_INT_CONST: u32 = 32767;

/// The five lexical classes of Jack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Symbol,
    Identifier,
    IntConst,
    StringConst,
}

impl TokenKind {
    /// Element name used for this kind in the XML output.
    pub fn tag(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::Identifier => "identifier",
            TokenKind::IntConst => "integerConstant",
            TokenKind::StringConst => "stringConstant",
        }
    }
}

/// A classified lexeme.
///
/// `text` is the unescaped value: string constants are stored without their
/// delimiting quotes, everything else exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    /// The token as it is spelled in source.
    pub fn lexeme(&self) -> String {
        match self.kind {
            TokenKind::StringConst => format!("\"{}\"", self.text),
            _ => self.text.clone(),
        }
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == keyword
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.kind == TokenKind::Symbol && self.symbol() == Some(symbol)
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    /// The symbol character, if this is a symbol token.
    pub fn symbol(&self) -> Option<char> {
        if self.kind != TokenKind::Symbol {
            return None;
        }
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Keyword => write!(f, "keyword '{}'", self.text),
            TokenKind::Symbol => write!(f, "symbol '{}'", self.text),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::IntConst => write!(f, "integer constant {}", self.text),
            TokenKind::StringConst => {
                write!(f, "string constant \"{}\"", self.text)
            }
        }
    }
}

/// What went wrong while scanning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("integer constant {0} is out of range (0..=32767)")]
    IntegerOutOfRange(String),
    #[error("unterminated string constant")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("lexical error at {location}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Where the offending character or construct starts.
    pub location: SourceLocation,
}

impl LexError {
    pub fn new(kind: LexErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

/// Lexer for Jack source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            let loc = self.current_location();
            let Some(ch) = self.advance() else {
                break;
            };

            tokens.push(self.next_token(ch, loc)?);
        }

        log::debug!("tokenized {} tokens over {} lines", tokens.len(), self.line);
        Ok(tokens)
    }

    /// Classify the token starting with the already consumed `ch`
    fn next_token(
        &mut self,
        ch: char,
        loc: SourceLocation,
    ) -> Result<Token, LexError> {
        match ch {
            '"' => self.string_literal(loc),
            '0'..='9' => self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => {
                Ok(self.identifier_or_keyword(ch, loc))
            }
            // Comments were already skipped, so a lone '/' is division.
            c if tables::is_symbol(c) => {
                Ok(Token::new(TokenKind::Symbol, c.to_string(), loc))
            }
            _ => Err(LexError::new(LexErrorKind::UnexpectedCharacter(ch), loc)),
        }
    }

    /// Parse string constant; the opening quote is already consumed
    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(Token::new(TokenKind::StringConst, string, loc));
                }
                '\n' => break,
                _ => {
                    string.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::new(LexErrorKind::UnterminatedString, loc))
    }

    /// Parse integer constant, rejecting the whole digit run when too large
    fn number_literal(
        &mut self,
        first_digit: char,
        loc: SourceLocation,
    ) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match num_str.parse::<u32>() {
            Ok(value) if value <= MAX_INT_CONST => {
                Ok(Token::new(TokenKind::IntConst, num_str, loc))
            }
            _ => Err(LexError::new(
                LexErrorKind::IntegerOutOfRange(num_str),
                loc,
            )),
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(
        &mut self,
        first_char: char,
        loc: SourceLocation,
    ) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if tables::is_keyword(&ident) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, ident, loc)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        // Covers `/** ... */` too.
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError::new(LexErrorKind::UnterminatedComment, start_loc))
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.position, self.line, self.column)
    }
}

//! Combined error type for running both analysis stages
//!
//! Either stage rejects the whole compilation unit; callers that tokenize and
//! parse in one go get whichever failure came first.

use crate::parser::lexer::LexError;
use crate::parser::parse::SyntaxError;
use crate::parser::tree::SourceLocation;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzerError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl AnalyzerError {
    /// Where the failure was detected, if known.
    ///
    /// A syntax error at end of input has no token and so no location.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            AnalyzerError::Lex(err) => Some(err.location),
            AnalyzerError::Syntax(err) => {
                err.found.as_ref().map(|token| token.location)
            }
        }
    }
}

//! Expression parsing implementation
//!
//! Jack expressions have no operator precedence: an expression is a flat
//! sequence of terms joined by binary operators, and the tree mirrors that
//! sequence directly.
//!
//! # Grammar
//!
//! ```text
//! expression     ::= term (op term)*
//! term           ::= integerConstant | stringConstant | keywordConstant
//!                  | varName | varName '[' expression ']' | subroutineCall
//!                  | '(' expression ')' | unaryOp term
//! subroutineCall ::= subroutineName '(' expressionList ')'
//!                  | (className | varName) '.' subroutineName '(' expressionList ')'
//! expressionList ::= (expression (',' expression)*)?
//! op             ::= '+' | '-' | '*' | '/' | '&' | '|' | '<' | '>' | '=' | '^' | '#'
//! unaryOp        ::= '-' | '~' | '^' | '#'
//! ```
//!
//! # Term lookahead
//!
//! A term starting with an identifier is the one place where the current
//! token is not enough; [`TermShape`] is chosen from the pair
//! `(current, next)` before anything is consumed.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, SyntaxError};
use crate::parser::tables;
use crate::parser::tree::{BranchBuilder, ParseNode};

/// The alternative of `term` selected by lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TermShape {
    /// Integer, string or keyword constant
    Constant,
    /// `varName`
    Variable,
    /// `varName '[' expression ']'`
    ArrayAccess,
    /// `name '(' ...` or `name '.' name '(' ...`
    Call,
    /// `'(' expression ')'`
    Parenthesized,
    /// `unaryOp term`
    Unary,
}

impl Parser {
    /// Parse expression: term (op term)*
    pub(crate) fn compile_expression(
        &mut self,
    ) -> Result<ParseNode, SyntaxError> {
        const RULE: &str = "expression";
        self.enter(RULE)?;
        let mut expr = self.open(RULE);

        expr.push(self.compile_term()?);

        while self
            .peek()
            .and_then(|t| t.symbol())
            .is_some_and(tables::is_binary_op)
        {
            expr.push_token(self.take(RULE)?);
            expr.push(self.compile_term()?);
        }

        self.leave();
        self.close(expr, RULE)
    }

    /// Decide which term alternative starts at the cursor.
    pub(crate) fn term_shape(&self) -> Option<TermShape> {
        let current = self.peek()?;

        match current.kind {
            TokenKind::IntConst | TokenKind::StringConst => {
                Some(TermShape::Constant)
            }
            TokenKind::Keyword => tables::is_keyword_constant(&current.text)
                .then_some(TermShape::Constant),
            TokenKind::Identifier => {
                match self.peek_ahead(1).and_then(|next| next.symbol()) {
                    Some('[') => Some(TermShape::ArrayAccess),
                    Some('(') | Some('.') => Some(TermShape::Call),
                    _ => Some(TermShape::Variable),
                }
            }
            TokenKind::Symbol => match current.symbol() {
                Some('(') => Some(TermShape::Parenthesized),
                Some(op) if tables::is_unary_op(op) => Some(TermShape::Unary),
                _ => None,
            },
        }
    }

    /// Parse term
    pub(crate) fn compile_term(&mut self) -> Result<ParseNode, SyntaxError> {
        const RULE: &str = "term";

        let Some(shape) = self.term_shape() else {
            return Err(self.error(
                RULE,
                "a term (constant, variable, call, '(' or unary operator)",
            ));
        };

        self.enter(RULE)?;
        let mut term = self.open(RULE);

        match shape {
            TermShape::Constant | TermShape::Variable => {
                term.push_token(self.take(RULE)?);
            }
            TermShape::ArrayAccess => {
                term.push_token(self.take(RULE)?);
                term.push_token(self.expect_symbol(RULE, '[')?);
                term.push(self.compile_expression()?);
                term.push_token(self.expect_symbol(RULE, ']')?);
            }
            TermShape::Call => {
                self.compile_subroutine_call(RULE, &mut term)?;
            }
            TermShape::Parenthesized => {
                term.push_token(self.take(RULE)?);
                term.push(self.compile_expression()?);
                term.push_token(self.expect_symbol(RULE, ')')?);
            }
            TermShape::Unary => {
                term.push_token(self.take(RULE)?);
                term.push(self.compile_term()?);
            }
        }

        self.leave();
        self.close(term, RULE)
    }

    /// Parse subroutine call into the enclosing branch (no branch of its own)
    pub(crate) fn compile_subroutine_call(
        &mut self,
        rule: &'static str,
        into: &mut BranchBuilder,
    ) -> Result<(), SyntaxError> {
        into.push_token(
            self.expect_identifier(rule, "subroutine, class or variable name")?,
        );

        if self.check_symbol('.') {
            into.push_token(self.take(rule)?);
            into.push_token(self.expect_identifier(rule, "subroutine name")?);
        }

        into.push_token(self.expect_symbol(rule, '(')?);
        into.push_opt(self.compile_expression_list()?);
        into.push_token(self.expect_symbol(rule, ')')?);
        Ok(())
    }

    /// Parse comma-separated arguments; `None` when there are none
    fn compile_expression_list(
        &mut self,
    ) -> Result<Option<ParseNode>, SyntaxError> {
        const RULE: &str = "expressionList";
        let mut list = self.open(RULE);

        if self.check_symbol(')') {
            return Ok(list.finish());
        }

        list.push(self.compile_expression()?);
        while self.check_symbol(',') {
            list.push_token(self.take(RULE)?);
            list.push(self.compile_expression()?);
        }

        Ok(list.finish())
    }
}

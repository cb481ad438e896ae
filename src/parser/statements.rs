//! Statement parsing implementation
//!
//! This module handles parsing of the five Jack statement kinds. Each one
//! starts with its own keyword, so the current token alone selects the rule.
//!
//! # Grammar
//!
//! ```text
//! statements      ::= statement*
//! statement       ::= letStatement | ifStatement | whileStatement
//!                   | doStatement | returnStatement
//! letStatement    ::= 'let' varName ('[' expression ']')? '=' expression ';'
//! ifStatement     ::= 'if' '(' expression ')' '{' statements '}'
//!                     ('else' '{' statements '}')?
//! whileStatement  ::= 'while' '(' expression ')' '{' statements '}'
//! doStatement     ::= 'do' subroutineCall ';'
//! returnStatement ::= 'return' expression? ';'
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::parse::{Parser, SyntaxError};
use crate::parser::tree::{BranchBuilder, ParseNode};

impl Parser {
    /// Parse a statement sequence; `None` when there are no statements
    pub(crate) fn compile_statements(
        &mut self,
    ) -> Result<Option<ParseNode>, SyntaxError> {
        const RULE: &str = "statements";
        self.enter(RULE)?;
        let mut statements = self.open(RULE);

        loop {
            let statement = if self.check_keyword("let") {
                self.compile_let()?
            } else if self.check_keyword("if") {
                self.compile_if()?
            } else if self.check_keyword("while") {
                self.compile_while()?
            } else if self.check_keyword("do") {
                self.compile_do()?
            } else if self.check_keyword("return") {
                self.compile_return()?
            } else {
                break;
            };
            statements.push(statement);
        }

        self.leave();
        Ok(statements.finish())
    }

    /// Parse let statement, with optional array index on the target
    fn compile_let(&mut self) -> Result<ParseNode, SyntaxError> {
        const RULE: &str = "letStatement";
        let mut stmt = self.open(RULE);

        stmt.push_token(self.expect_keyword(RULE, "let")?);
        stmt.push_token(self.expect_identifier(RULE, "variable name")?);

        if self.check_symbol('[') {
            stmt.push_token(self.take(RULE)?);
            stmt.push(self.compile_expression()?);
            stmt.push_token(self.expect_symbol(RULE, ']')?);
        }

        stmt.push_token(self.expect_symbol(RULE, '=')?);
        stmt.push(self.compile_expression()?);
        stmt.push_token(self.expect_symbol(RULE, ';')?);

        self.close(stmt, RULE)
    }

    /// Parse if statement; the else clause is decided by the token after '}'
    fn compile_if(&mut self) -> Result<ParseNode, SyntaxError> {
        const RULE: &str = "ifStatement";
        let mut stmt = self.open(RULE);

        stmt.push_token(self.expect_keyword(RULE, "if")?);
        self.compile_condition(RULE, &mut stmt)?;
        self.compile_block(RULE, &mut stmt)?;

        if self.check_keyword("else") {
            stmt.push_token(self.take(RULE)?);
            self.compile_block(RULE, &mut stmt)?;
        }

        self.close(stmt, RULE)
    }

    /// Parse while statement
    fn compile_while(&mut self) -> Result<ParseNode, SyntaxError> {
        const RULE: &str = "whileStatement";
        let mut stmt = self.open(RULE);

        stmt.push_token(self.expect_keyword(RULE, "while")?);
        self.compile_condition(RULE, &mut stmt)?;
        self.compile_block(RULE, &mut stmt)?;

        self.close(stmt, RULE)
    }

    /// Parse do statement
    fn compile_do(&mut self) -> Result<ParseNode, SyntaxError> {
        const RULE: &str = "doStatement";
        let mut stmt = self.open(RULE);

        stmt.push_token(self.expect_keyword(RULE, "do")?);
        self.compile_subroutine_call(RULE, &mut stmt)?;
        stmt.push_token(self.expect_symbol(RULE, ';')?);

        self.close(stmt, RULE)
    }

    /// Parse return statement; the value is present unless ';' follows
    fn compile_return(&mut self) -> Result<ParseNode, SyntaxError> {
        const RULE: &str = "returnStatement";
        let mut stmt = self.open(RULE);

        stmt.push_token(self.expect_keyword(RULE, "return")?);
        if !self.check_symbol(';') {
            stmt.push(self.compile_expression()?);
        }
        stmt.push_token(self.expect_symbol(RULE, ';')?);

        self.close(stmt, RULE)
    }

    /// '(' expression ')'
    fn compile_condition(
        &mut self,
        rule: &'static str,
        stmt: &mut BranchBuilder,
    ) -> Result<(), SyntaxError> {
        stmt.push_token(self.expect_symbol(rule, '(')?);
        stmt.push(self.compile_expression()?);
        stmt.push_token(self.expect_symbol(rule, ')')?);
        Ok(())
    }

    /// '{' statements '}'
    fn compile_block(
        &mut self,
        rule: &'static str,
        stmt: &mut BranchBuilder,
    ) -> Result<(), SyntaxError> {
        stmt.push_token(self.expect_symbol(rule, '{')?);
        stmt.push_opt(self.compile_statements()?);
        stmt.push_token(self.expect_symbol(rule, '}')?);
        Ok(())
    }
}

//! Declaration parsing implementation
//!
//! This module handles the program-structure rules of Jack:
//!
//! - The class itself: `class Name { ... }`
//! - Class-level variables: `static` / `field`
//! - Subroutines: `constructor` / `function` / `method`
//! - Parameter lists, subroutine bodies and local `var` declarations
//!
//! # Grammar
//!
//! ```text
//! class          ::= 'class' className '{' classVarDec* subroutineDec* '}'
//! classVarDec    ::= ('static' | 'field') type varName (',' varName)* ';'
//! type           ::= 'int' | 'char' | 'boolean' | className
//! subroutineDec  ::= ('constructor' | 'function' | 'method') ('void' | type)
//!                    subroutineName '(' parameterList ')' subroutineBody
//! parameterList  ::= ((type varName) (',' type varName)*)?
//! subroutineBody ::= '{' varDec* statements '}'
//! varDec         ::= 'var' type varName (',' varName)* ';'
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{Parser, SyntaxError};
use crate::parser::tree::{BranchBuilder, ParseNode};

const CLASS_VAR_KINDS: [&str; 2] = ["static", "field"];
const SUBROUTINE_KINDS: [&str; 3] = ["constructor", "function", "method"];
const PRIMITIVE_TYPES: [&str; 3] = ["int", "char", "boolean"];

impl Parser {
    /// Parse class: 'class' className '{' classVarDec* subroutineDec* '}'
    pub(crate) fn compile_class(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut class = self.open("class");

        class.push_token(self.expect_keyword("class", "class")?);
        class.push_token(self.expect_identifier("class", "class name")?);
        class.push_token(self.expect_symbol("class", '{')?);

        while self.check_any_keyword(&CLASS_VAR_KINDS) {
            class.push(self.compile_class_var_dec()?);
        }

        while self.check_any_keyword(&SUBROUTINE_KINDS) {
            class.push(self.compile_subroutine_dec()?);
        }

        if !self.check_symbol('}') {
            return Err(self.error(
                "class",
                "'static', 'field', 'constructor', 'function', 'method' or symbol '}'",
            ));
        }
        class.push_token(self.expect_symbol("class", '}')?);

        self.close(class, "class")
    }

    /// Parse class variable declaration: ('static' | 'field') type varName (',' varName)* ';'
    fn compile_class_var_dec(&mut self) -> Result<ParseNode, SyntaxError> {
        const RULE: &str = "classVarDec";
        let mut dec = self.open(RULE);

        dec.push_token(self.expect_any_keyword(RULE, &CLASS_VAR_KINDS)?);
        dec.push_token(self.parse_type(RULE)?);
        self.compile_var_names(RULE, &mut dec)?;

        self.close(dec, RULE)
    }

    /// Parse subroutine declaration including its body
    fn compile_subroutine_dec(&mut self) -> Result<ParseNode, SyntaxError> {
        const RULE: &str = "subroutineDec";
        let mut dec = self.open(RULE);

        dec.push_token(self.expect_any_keyword(RULE, &SUBROUTINE_KINDS)?);
        if self.check_keyword("void") {
            dec.push_token(self.take(RULE)?);
        } else {
            dec.push_token(self.parse_type(RULE)?);
        }
        dec.push_token(self.expect_identifier(RULE, "subroutine name")?);

        dec.push_token(self.expect_symbol(RULE, '(')?);
        dec.push_opt(self.compile_parameter_list()?);
        dec.push_token(self.expect_symbol(RULE, ')')?);

        dec.push(self.compile_subroutine_body()?);

        self.close(dec, RULE)
    }

    /// Parse parameter list (excluding the parentheses); `None` when empty
    fn compile_parameter_list(
        &mut self,
    ) -> Result<Option<ParseNode>, SyntaxError> {
        const RULE: &str = "parameterList";
        let mut params = self.open(RULE);

        if self.check_symbol(')') {
            return Ok(params.finish());
        }

        loop {
            params.push_token(self.parse_type(RULE)?);
            params.push_token(self.expect_identifier(RULE, "parameter name")?);

            if !self.check_symbol(',') {
                break;
            }
            params.push_token(self.take(RULE)?);
        }

        Ok(params.finish())
    }

    /// Parse subroutine body: '{' varDec* statements '}'
    fn compile_subroutine_body(&mut self) -> Result<ParseNode, SyntaxError> {
        const RULE: &str = "subroutineBody";
        let mut body = self.open(RULE);

        body.push_token(self.expect_symbol(RULE, '{')?);

        while self.check_keyword("var") {
            body.push(self.compile_var_dec()?);
        }

        body.push_opt(self.compile_statements()?);
        body.push_token(self.expect_symbol(RULE, '}')?);

        self.close(body, RULE)
    }

    /// Parse local variable declaration: 'var' type varName (',' varName)* ';'
    fn compile_var_dec(&mut self) -> Result<ParseNode, SyntaxError> {
        const RULE: &str = "varDec";
        let mut dec = self.open(RULE);

        dec.push_token(self.expect_keyword(RULE, "var")?);
        dec.push_token(self.parse_type(RULE)?);
        self.compile_var_names(RULE, &mut dec)?;

        self.close(dec, RULE)
    }

    /// Shared tail of variable declarations: varName (',' varName)* ';'
    fn compile_var_names(
        &mut self,
        rule: &'static str,
        dec: &mut BranchBuilder,
    ) -> Result<(), SyntaxError> {
        dec.push_token(self.expect_identifier(rule, "variable name")?);

        while self.check_symbol(',') {
            dec.push_token(self.take(rule)?);
            dec.push_token(self.expect_identifier(rule, "variable name")?);
        }

        dec.push_token(self.expect_symbol(rule, ';')?);
        Ok(())
    }

    /// Parse type: 'int' | 'char' | 'boolean' | className
    pub(crate) fn parse_type(
        &mut self,
        rule: &'static str,
    ) -> Result<Token, SyntaxError> {
        let is_type = self.peek().is_some_and(|t| match t.kind {
            TokenKind::Keyword => PRIMITIVE_TYPES.contains(&t.text.as_str()),
            TokenKind::Identifier => true,
            _ => false,
        });

        if is_type {
            self.take(rule)
        } else {
            Err(self.error(rule, "type ('int', 'char', 'boolean' or class name)"))
        }
    }

    /// Finish a branch that always has content by construction.
    pub(crate) fn close(
        &self,
        builder: BranchBuilder,
        rule: &'static str,
    ) -> Result<ParseNode, SyntaxError> {
        builder
            .finish()
            .ok_or_else(|| self.error(rule, format!("{rule} content")))
    }
}

// Parse tree definitions for the Jack syntax analyzer

use crate::parser::lexer::Token;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// Character offset from the start of the source, 0-based
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A node of the concrete parse tree.
///
/// Every token consumed by the parser ends up in exactly one `Leaf`; every
/// grammar nonterminal becomes a `Branch` named after the rule, with its
/// children in the order the rule lists them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    Leaf(Token),
    Branch {
        tag: &'static str,
        children: Vec<ParseNode>,
    },
}

impl ParseNode {
    /// Branch name, or the token's element name for a leaf.
    pub fn tag(&self) -> &'static str {
        match self {
            ParseNode::Leaf(token) => token.kind.tag(),
            ParseNode::Branch { tag, .. } => *tag,
        }
    }

    pub fn children(&self) -> &[ParseNode] {
        match self {
            ParseNode::Leaf(_) => &[],
            ParseNode::Branch { children, .. } => children,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            ParseNode::Leaf(token) => Some(token),
            ParseNode::Branch { .. } => None,
        }
    }

    /// All leaf tokens in document order.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            ParseNode::Leaf(token) => out.push(token),
            ParseNode::Branch { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// First direct child branch with the given tag.
    pub fn find(&self, tag: &str) -> Option<&ParseNode> {
        self.children().iter().find(|child| {
            matches!(child, ParseNode::Branch { tag: t, .. } if *t == tag)
        })
    }
}

/// Collects the children of a branch before the branch itself exists.
///
/// `finish` only yields a node once at least one child was pushed, which keeps
/// optional clauses that matched nothing out of the tree.
#[derive(Debug)]
pub struct BranchBuilder {
    tag: &'static str,
    children: Vec<ParseNode>,
}

impl BranchBuilder {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, node: ParseNode) {
        self.children.push(node);
    }

    pub fn push_token(&mut self, token: Token) {
        self.children.push(ParseNode::Leaf(token));
    }

    /// Push a child that may have been suppressed.
    pub fn push_opt(&mut self, node: Option<ParseNode>) {
        if let Some(node) = node {
            self.children.push(node);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn finish(self) -> Option<ParseNode> {
        if self.children.is_empty() {
            return None;
        }
        Some(ParseNode::Branch {
            tag: self.tag,
            children: self.children,
        })
    }
}

//! Driver configuration
//!
//! Settings that decide which files the driver writes and how it reacts to a
//! file that fails to analyze. The library core takes none of these; they only
//! shape the batch run.

use crate::xml::DEFAULT_INDENT;
use anyhow::{bail, Result};
use std::path::PathBuf;

/// Default suffix of the parse tree document, e.g. `MainTest.xml`.
///
/// Distinct from `.xml` so the comparison files shipped next to each source
/// (`Main.xml`, `MainT.xml`) are never overwritten.
pub const DEFAULT_TREE_SUFFIX: &str = "Test.xml";
/// Default suffix of the tokens document, e.g. `MainTTest.xml`.
pub const DEFAULT_TOKENS_SUFFIX: &str = "TTest.xml";

/// Which documents to write for each source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Only the flat `<tokens>` document
    Tokens,
    /// Only the `<class>` parse tree
    Tree,
    /// Both documents
    #[default]
    Both,
}

impl OutputMode {
    pub fn writes_tokens(self) -> bool {
        matches!(self, OutputMode::Tokens | OutputMode::Both)
    }

    pub fn writes_tree(self) -> bool {
        matches!(self, OutputMode::Tree | OutputMode::Both)
    }
}

/// What to do when one file of a batch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Report the file and continue with the next one
    #[default]
    Skip,
    /// Stop the batch at the first failure
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: OutputMode,
    /// Appended to the source file stem for the tokens document
    pub tokens_suffix: String,
    /// Appended to the source file stem for the parse tree document
    pub tree_suffix: String,
    /// Spaces per nesting level in the parse tree document
    pub indent: usize,
    pub on_error: FailurePolicy,
    /// Write outputs here instead of next to each source file
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            tokens_suffix: DEFAULT_TOKENS_SUFFIX.to_string(),
            tree_suffix: DEFAULT_TREE_SUFFIX.to_string(),
            indent: DEFAULT_INDENT,
            on_error: FailurePolicy::default(),
            output_dir: None,
        }
    }
}

impl Config {
    /// Reject settings under which one document would overwrite the other.
    pub fn validate(&self) -> Result<()> {
        if self.mode == OutputMode::Both && self.tokens_suffix == self.tree_suffix {
            bail!(
                "tokens and tree documents share the suffix '{}'",
                self.tree_suffix
            );
        }
        Ok(())
    }
}

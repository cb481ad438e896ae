//! Batch driver: finds `.jack` files and writes their XML documents
//!
//! This is the only part of the crate that touches the filesystem. Each file
//! is analyzed independently; a failure in one never affects another, and the
//! [`FailurePolicy`] decides whether the batch carries on.

use crate::config::{Config, FailurePolicy};
use crate::xml::{self, XmlWriter};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of Jack source files.
pub const SOURCE_EXTENSION: &str = "jack";

/// Files written for one successfully analyzed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub written: Vec<PathBuf>,
}

/// Result of a batch run under [`FailurePolicy::Skip`].
#[derive(Debug, Default)]
pub struct Summary {
    pub succeeded: Vec<FileOutcome>,
    /// Failed sources with the rendered error chain
    pub failed: Vec<(PathBuf, String)>,
}

impl Summary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Collect the source files named by `path`.
///
/// A `.jack` file stands for itself; a directory contributes its `.jack`
/// entries (not recursively) in name order.
pub fn discover(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if !has_source_extension(path) {
            bail!("{} is not a .{} file", path.display(), SOURCE_EXTENSION);
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        bail!("invalid input path: {}", path.display());
    }

    let entries = fs::read_dir(path)
        .with_context(|| format!("failed to list {}", path.display()))?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to list {}", path.display()))?;
        let candidate = entry.path();
        if candidate.is_file() && has_source_extension(&candidate) {
            sources.push(candidate);
        }
    }
    sources.sort();

    log::debug!("found {} source files in {}", sources.len(), path.display());
    Ok(sources)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Where the document with `suffix` for `source` goes.
pub fn output_path(source: &Path, config: &Config, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = match &config.output_dir {
        Some(dir) => dir.clone(),
        None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    dir.join(format!("{stem}{suffix}"))
}

/// Analyze one source file and write its documents.
///
/// Nothing is written unless every stage the mode needs succeeds. If a later
/// document cannot be written, the ones already written are removed again.
pub fn analyze_file(source: &Path, config: &Config) -> Result<FileOutcome> {
    config.validate()?;

    let text = fs::read_to_string(source)
        .with_context(|| format!("failed to read {}", source.display()))?;

    let writer = XmlWriter::new(config.indent);
    let tokens = crate::tokenize(&text)?;

    let mut documents = Vec::new();
    if config.mode.writes_tokens() {
        documents.push((
            output_path(source, config, &config.tokens_suffix),
            xml::tokens_document(&tokens),
        ));
    }
    if config.mode.writes_tree() {
        let tree = crate::parse_tokens(tokens)?;
        documents.push((
            output_path(source, config, &config.tree_suffix),
            writer.tree_document(&tree),
        ));
    }

    if let Some(dir) = &config.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let mut written = Vec::with_capacity(documents.len());
    for (path, document) in documents {
        if let Err(err) = fs::write(&path, document) {
            remove_written(&written);
            return Err(err)
                .with_context(|| format!("failed to write {}", path.display()));
        }
        log::info!("wrote {}", path.display());
        written.push(path);
    }

    Ok(FileOutcome {
        source: source.to_path_buf(),
        written,
    })
}

fn remove_written(paths: &[PathBuf]) {
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => log::debug!("removed partial output {}", path.display()),
            Err(err) => log::warn!("failed to remove {}: {}", path.display(), err),
        }
    }
}

/// Analyze every source named by `path`.
///
/// Under [`FailurePolicy::Abort`] the first failing file ends the run with an
/// error; under [`FailurePolicy::Skip`] failures are collected in the summary.
pub fn run(path: &Path, config: &Config) -> Result<Summary> {
    config.validate()?;
    let sources = discover(path)?;
    let mut summary = Summary::default();

    for source in sources {
        match analyze_file(&source, config) {
            Ok(outcome) => summary.succeeded.push(outcome),
            Err(err) => match config.on_error {
                FailurePolicy::Abort => {
                    return Err(err.context(format!(
                        "failed to analyze {}",
                        source.display()
                    )));
                }
                FailurePolicy::Skip => {
                    log::error!("skipping {}: {:#}", source.display(), err);
                    summary.failed.push((source, format!("{err:#}")));
                }
            },
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_next_to_source() {
        let config = Config::default();
        let path = output_path(
            Path::new("proj/Square/Main.jack"),
            &config,
            &config.tree_suffix,
        );
        assert_eq!(path, PathBuf::from("proj/Square/MainTest.xml"));
    }

    #[test]
    fn test_output_path_in_output_dir() {
        let config = Config {
            output_dir: Some(PathBuf::from("out")),
            ..Config::default()
        };
        let path = output_path(Path::new("src/Main.jack"), &config, ".xml");
        assert_eq!(path, PathBuf::from("out/Main.xml"));
    }

    #[test]
    fn test_source_extension() {
        assert!(has_source_extension(Path::new("a/Main.jack")));
        assert!(!has_source_extension(Path::new("a/Main.xml")));
        assert!(!has_source_extension(Path::new("a/jack")));
    }
}

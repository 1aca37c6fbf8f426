//! Error taxonomy of a scan.
//!
//! - [`ExtractionError`]: a defect in a call site. Fatal for the file it occurs in.
//! - [`SkippedFile`]: a file that could not be read or evaluated. Logged and skipped.
//! - [`ConfigurationError`]: the run cannot produce a meaningful result.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Defect found while extracting a key from a call site.
///
/// Positions are 1-based and point at the start of the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("unbalanced parentheses in call at {line}:{col}: `{snippet}`")]
    UnbalancedParentheses {
        line: usize,
        col: usize,
        snippet: String,
    },
    #[error(
        "\"{key}\" at {line}:{col} ends with a space. As this is a localization key, this is illegal!"
    )]
    TrailingSpace { key: String, line: usize, col: usize },
    #[error(
        "\"{key}\" at {line}:{col} contains a new line character. As this is a localization key, this is illegal!"
    )]
    EmbeddedNewline { key: String, line: usize, col: usize },
}

impl ExtractionError {
    pub fn line(&self) -> usize {
        match self {
            ExtractionError::UnbalancedParentheses { line, .. }
            | ExtractionError::TrailingSpace { line, .. }
            | ExtractionError::EmbeddedNewline { line, .. } => *line,
        }
    }

    pub fn col(&self) -> usize {
        match self {
            ExtractionError::UnbalancedParentheses { col, .. }
            | ExtractionError::TrailingSpace { col, .. }
            | ExtractionError::EmbeddedNewline { col, .. } => *col,
        }
    }
}

/// An [`ExtractionError`] tagged with the file it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file_path}: {error}")]
pub struct FileExtractionError {
    pub file_path: String,
    #[source]
    pub error: ExtractionError,
}

/// Why a file's contribution was dropped without failing the run.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("cannot read file: {0}")]
    Read(#[from] io::Error),
    #[error("cannot evaluate markup: {0}")]
    Markup(#[from] MarkupError),
}

/// A file left out of the entry set.
#[derive(Debug, Error)]
#[error("{file_path}: {reason}")]
pub struct SkippedFile {
    pub file_path: String,
    #[source]
    pub reason: SkipReason,
}

/// Failure of a markup evaluator on one document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct MarkupError {
    pub message: String,
}

impl MarkupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Malformed content in a key/value resource file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertiesError {
    #[error("malformed \\uxxxx encoding on line {line}")]
    MalformedUnicodeEscape { line: usize },
}

/// Fatal to the whole run.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("base resource file {} could not be read", .path.display())]
    UnreadableBundle {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("base resource file {} is malformed", .path.display())]
    MalformedBundle {
        path: PathBuf,
        #[source]
        source: PropertiesError,
    },
    #[error("source root {} does not exist", .path.display())]
    MissingSourceRoot { path: PathBuf },
}

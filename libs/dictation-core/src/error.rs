//! Error types for dictation-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using DictationError.
pub type Result<T> = std::result::Result<T, DictationError>;

/// Stable, machine-checkable category of a [`DictationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Scheme or settings authoring problems. Never reach a running session.
    Configuration,
    /// Sheet/scheme incompatibility or malformed cells. Block session creation.
    Validation,
    /// Nothing left after filtering. Blocks session creation.
    Selection,
    /// Persistence failures. Retryable by the user.
    Runtime,
    /// Failures that are reported once and otherwise ignored.
    BestEffort,
    /// The host called the session API out of order.
    Usage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Validation => "validation",
            Self::Selection => "selection",
            Self::Runtime => "runtime",
            Self::BestEffort => "best_effort",
            Self::Usage => "usage",
        }
    }
}

/// Errors that can occur while preparing, running or persisting a dictation.
#[derive(Debug, Error)]
pub enum DictationError {
    #[error("indexes of translation, status, word and information columns must be unique: {indexes:?}")]
    DuplicateIndexes { indexes: Vec<usize> },

    #[error("scheme for sheet `{sheet}` has no test blocks")]
    EmptyScheme { sheet: String },

    #[error("scheme with the name `{name}` already exists")]
    SchemeExists { name: String },

    #[error("no scheme named `{name}`")]
    UnknownScheme { name: String },

    #[error("settings file {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings format: {0}")]
    SettingsFormat(#[from] serde_json::Error),

    #[error("scheme for sheet `{sheet}` is incompatible with it: column index {index} is out of range 0..{bound}")]
    IncompatibleScheme {
        sheet: String,
        index: usize,
        bound: usize,
    },

    #[error("invalid status `{value}` in sheet `{sheet}`, column {column}, row {row}")]
    InvalidStatusFormat {
        sheet: String,
        column: usize,
        value: String,
        row: usize,
    },

    #[error("invalid status `{value}`")]
    InvalidStatus { value: String },

    #[error("malformed sheet `{sheet}` at line {line}: {reason}")]
    MalformedSheet {
        sheet: String,
        line: usize,
        reason: String,
    },

    #[error("no words with status {filter} in rows {first}..={last}")]
    NoWordsMatch {
        filter: String,
        first: usize,
        last: usize,
    },

    #[error("invalid range of rows {first}..={last}: choose rows within {min}..={max}")]
    InvalidRange {
        first: usize,
        last: usize,
        min: usize,
        max: usize,
    },

    #[error("workbook {path} is opened in another application; close it and try again")]
    WorkbookLocked { path: PathBuf },

    #[error("failed to write statuses to sheet `{sheet}`: {reason}")]
    StatusWrite { sheet: String, reason: String },

    #[error("narration failed: {0}")]
    Narration(String),

    #[error("dictation is not running")]
    SessionNotRunning,

    #[error("no word is awaiting an answer")]
    NoPendingWord,
}

impl DictationError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateIndexes { .. }
            | Self::EmptyScheme { .. }
            | Self::SchemeExists { .. }
            | Self::UnknownScheme { .. }
            | Self::SettingsIo { .. }
            | Self::SettingsFormat(_) => ErrorKind::Configuration,
            Self::IncompatibleScheme { .. }
            | Self::InvalidStatusFormat { .. }
            | Self::InvalidStatus { .. }
            | Self::MalformedSheet { .. } => ErrorKind::Validation,
            Self::NoWordsMatch { .. } | Self::InvalidRange { .. } => ErrorKind::Selection,
            Self::WorkbookLocked { .. } | Self::StatusWrite { .. } => ErrorKind::Runtime,
            Self::Narration(_) => ErrorKind::BestEffort,
            Self::SessionNotRunning | Self::NoPendingWord => ErrorKind::Usage,
        }
    }

    /// Whether this error should abort the flow in progress.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Validation | ErrorKind::Selection | ErrorKind::Runtime
        )
    }
}

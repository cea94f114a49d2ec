//! Error types for loading tables and configuration files.

use audit_core::AuditError;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for table loading.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors that can occur while loading a table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Data file does not exist.
    #[error("data file not found: {path}")]
    NotFound { path: PathBuf },

    /// Data file exists but holds no columns or no data rows.
    #[error("data file is empty: {path}")]
    Empty { path: PathBuf },

    /// Failed to open or read the file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV reader rejected the input (invalid UTF-8, broken quoting, ...).
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A record has more fields than the header.
    #[error("malformed CSV {path}: expected {expected} fields on line {line}, saw {found}")]
    Malformed {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Parsed records could not form a table.
    #[error("invalid table in {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: AuditError,
    },
}

/// Coarse classification of a load failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadErrorKind {
    /// Source does not exist
    NotFound,
    /// Source exists but has nothing to audit
    Empty,
    /// Any other failure
    Unexpected,
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "load-not-found"),
            Self::Empty => write!(f, "load-empty"),
            Self::Unexpected => write!(f, "load-unexpected"),
        }
    }
}

impl LoadError {
    /// Classifies the error.
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            Self::NotFound { .. } => LoadErrorKind::NotFound,
            Self::Empty { .. } => LoadErrorKind::Empty,
            Self::Io { .. } | Self::Csv { .. } | Self::Malformed { .. } | Self::Table { .. } => {
                LoadErrorKind::Unexpected
            }
        }
    }

    /// The path of the source that failed to load.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::Empty { path }
            | Self::Io { path, .. }
            | Self::Csv { path, .. }
            | Self::Malformed { path, .. }
            | Self::Table { path, .. } => path,
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Errors that can occur while parsing a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// Parsed configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] AuditError),
}

//! Parse errors.

use std::path::PathBuf;

/// Errors that can occur while reading a prediction pickle.
///
/// Only [`ParseError::NotFound`] and [`ParseError::Truncated`] are per-artifact problems that a
/// run may skip over. The rest mean the payload does not have the shape this crate understands.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("File could not be found: {path}")]
    NotFound { path: PathBuf },

    #[error("Data could not be found, {path} ended before the pickle was complete")]
    Truncated { path: PathBuf },

    #[error("Unrecognised pickle payload in {path}: {message}")]
    Unrecognized { path: PathBuf, message: String },

    #[error("Unexpected record layout in {path}: {message}")]
    Schema { path: PathBuf, message: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A confidence sequence that cannot back a record.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("`plddt` is empty, its mean is undefined")]
    EmptyConfidence,
}

impl ParseError {
    /// True when the artifact can be skipped and the run continued.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Truncated { .. })
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path }
            | Self::Truncated { path }
            | Self::Unrecognized { path, .. }
            | Self::Schema { path, .. }
            | Self::Io { path, .. } => path,
        }
    }

    /// Short machine-friendly name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Truncated { .. } => "truncated",
            Self::Unrecognized { .. } => "unrecognized",
            Self::Schema { .. } => "schema",
            Self::Io { .. } => "io",
        }
    }
}

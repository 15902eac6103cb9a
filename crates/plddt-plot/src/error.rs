//! Render errors.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Could not create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to draw {path}: {message}")]
    Draw { path: PathBuf, message: String },

    #[error("Nothing to plot: no confidence sequences were collected")]
    EmptyAggregate,
}

impl RenderError {
    pub(crate) fn draw<E: std::fmt::Display>(path: &std::path::Path) -> impl Fn(E) -> Self + '_ {
        move |err| Self::Draw {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Creates `dir` and any missing parents. An existing directory is fine.
pub(crate) fn ensure_dir(dir: &std::path::Path) -> Result<(), RenderError> {
    std::fs::create_dir_all(dir).map_err(|source| RenderError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

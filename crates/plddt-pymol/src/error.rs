use std::path::PathBuf;
use std::process::ExitStatus;

/// Failures of the external structure-coloring step.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("--pdb requires a .pdb file as input, got {path}")]
    NotAPdb { path: PathBuf },

    #[error("Could not read structure {path}: {message}")]
    Structure { path: PathBuf, message: String },

    #[error("Could not create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: ExitStatus },

    #[error("Visualisation failed, no session was written to {path}")]
    SessionMissing { path: PathBuf },
}

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of the pickled prediction results written by the structure predictor.
pub const ARTIFACT_EXTENSION: &str = "pkl";

/// Path to one serialized prediction result.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PredictionArtifact {
    path: PathBuf,
}

impl PredictionArtifact {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its extension, e.g. `result_model_1` for `.../result_model_1.pkl`.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Recursively collects every `*.pkl` file below `root`, sorted by full path.
///
/// A missing or unreadable root yields an empty list.
pub fn discover_artifacts(root: impl AsRef<Path>) -> Vec<PredictionArtifact> {
    let root = root.as_ref();
    let mut artifacts: Vec<PredictionArtifact> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(root = %root.display(), error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension() == Some(OsStr::new(ARTIFACT_EXTENSION)))
        .map(|entry| PredictionArtifact::new(entry.into_path()))
        .collect();

    artifacts.sort();
    artifacts
}

/// Name used to label an overlapped plot of everything under `root`.
pub fn collection_label(root: impl AsRef<Path>) -> String {
    let root = root.as_ref();
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .or_else(|| {
            let abs = root.canonicalize().ok()?;
            abs.file_name().map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "plddt".to_string())
}

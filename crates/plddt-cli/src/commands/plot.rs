use anyhow::Context;
use plddt_core::{
    collection_label, discover_artifacts, Aggregate, PredictionArtifact, PredictionRecord,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Where the prediction pickles come from.
#[derive(Debug, Clone)]
pub enum ArtifactSource {
    /// Every `*.pkl` below a directory.
    Directory(PathBuf),
    /// One explicitly named pickle.
    Single(PathBuf),
}

impl ArtifactSource {
    pub fn artifacts(&self) -> Vec<PredictionArtifact> {
        match self {
            Self::Directory(root) => discover_artifacts(root),
            Self::Single(path) => vec![PredictionArtifact::new(path)],
        }
    }

    /// Name given to the overlapped plot.
    pub fn label(&self) -> String {
        match self {
            Self::Directory(root) => collection_label(root),
            Self::Single(path) => collection_label(
                path.parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(Path::new(".")),
            ),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Directory(p) | Self::Single(p) => p.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One chart per artifact.
    PerModel,
    /// All artifacts on one chart.
    Overlapped,
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Discovery found no artifacts.
    NothingToDo,
    /// Images written, in discovery order.
    Plotted(Vec<PathBuf>),
}

pub fn execute(source: &ArtifactSource, output: &Path, mode: Mode) -> anyhow::Result<Outcome> {
    let artifacts = source.artifacts();
    if artifacts.is_empty() {
        tracing::info!(
            source = %source.describe(),
            "no pickle file provided, skipping pLDDT plotting"
        );
        return Ok(Outcome::NothingToDo);
    }
    tracing::debug!(count = artifacts.len(), "discovered prediction pickles");

    let written = match mode {
        Mode::PerModel => plot_each(&artifacts, output)?,
        Mode::Overlapped => plot_together(&artifacts, &source.label(), output)?
            .into_iter()
            .collect(),
    };
    Ok(Outcome::Plotted(written))
}

/// `Ok(None)` when the artifact is missing or truncated and should be skipped.
fn parse(artifact: &PredictionArtifact) -> anyhow::Result<Option<PredictionRecord>> {
    match PredictionRecord::load(artifact) {
        Ok(record) => {
            tracing::debug!(
                artifact = %artifact.path().display(),
                residues = record.residue_count(),
                mean = record.mean_confidence(),
                bands = %record.band_summary(),
                "parsed prediction"
            );
            Ok(Some(record))
        }
        Err(err) if err.is_recoverable() => {
            tracing::warn!(
                artifact = %artifact.path().display(),
                reason = err.kind(),
                "{err}, skipping"
            );
            Ok(None)
        }
        Err(err) => Err(err)
            .with_context(|| format!("cannot use prediction {}", artifact.path().display())),
    }
}

fn plot_each(artifacts: &[PredictionArtifact], output: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(artifacts.len());
    let mut stems = HashSet::new();
    for artifact in artifacts {
        tracing::info!(artifact = %artifact.path().display(), "plotting pLDDT");
        let Some(record) = parse(artifact)? else {
            continue;
        };
        let stem = artifact.stem();
        if !stems.insert(stem.clone()) {
            tracing::warn!(
                artifact = %artifact.path().display(),
                "another pickle named {stem} was already plotted; its image is overwritten"
            );
        }
        let path = plddt_plot::plot_single_model(&record, &stem, output)
            .with_context(|| format!("plotting {}", artifact.path().display()))?;
        tracing::info!(path = %path.display(), "pLDDT plot written");
        written.push(path);
    }
    Ok(written)
}

/// Parses every artifact in order; skipped artifacts leave no gap in the labels.
fn collect(artifacts: &[PredictionArtifact]) -> anyhow::Result<Aggregate> {
    let mut aggregate = Aggregate::new();
    for artifact in artifacts {
        tracing::info!(artifact = %artifact.path().display(), "collecting pLDDT");
        if let Some(record) = parse(artifact)? {
            aggregate.push(record);
        }
    }
    Ok(aggregate)
}

fn plot_together(
    artifacts: &[PredictionArtifact],
    label: &str,
    output: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    let aggregate = collect(artifacts)?;
    if aggregate.is_empty() {
        tracing::warn!(
            count = artifacts.len(),
            "none of the pickles could be read, skipping overlapped plot"
        );
        return Ok(None);
    }

    let path = plddt_plot::plot_overlapped(&aggregate, label, output)
        .with_context(|| format!("plotting overlapped pLDDT for {label}"))?;
    tracing::info!(path = %path.display(), models = aggregate.len(), "overlapped pLDDT plot written");
    Ok(Some(path))
}

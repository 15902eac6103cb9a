use anyhow::Context;
use std::path::{Path, PathBuf};

pub fn execute(output: &Path) -> anyhow::Result<PathBuf> {
    let path = plddt_plot::plot_confidence_legend(output)
        .with_context(|| format!("writing pLDDT legend to {}", output.display()))?;
    tracing::info!(path = %path.display(), "pLDDT legend written");
    Ok(path)
}

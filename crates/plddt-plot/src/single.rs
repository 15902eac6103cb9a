use crate::error::{ensure_dir, RenderError};
use crate::figure::{mean_annotation, series_color, Line, LineChart};
use plddt_core::PredictionRecord;
use std::path::{Path, PathBuf};

pub const SINGLE_SUFFIX: &str = "_plddt.png";

/// `{output_dir}/{stem}_plddt.png`
pub fn single_model_output(output_dir: &Path, stem: &str) -> PathBuf {
    output_dir.join(format!("{stem}{SINGLE_SUFFIX}"))
}

pub fn single_model_chart<'a>(stem: &str, record: &'a PredictionRecord) -> LineChart<'a> {
    LineChart::new(
        format!("{stem} Predicted LDDT"),
        mean_annotation(record.mean_confidence()),
    )
    .with_line(Line {
        label: None,
        values: record.confidence(),
        color: series_color(0),
    })
}

/// Plots one model's confidence and returns the written image path.
///
/// `output_dir` is created if it does not exist yet.
pub fn plot_single_model(
    record: &PredictionRecord,
    stem: &str,
    output_dir: &Path,
) -> Result<PathBuf, RenderError> {
    ensure_dir(output_dir)?;
    let path = single_model_output(output_dir, stem);
    single_model_chart(stem, record).render(&path)?;
    Ok(path)
}

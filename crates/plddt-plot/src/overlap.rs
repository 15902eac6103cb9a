use crate::error::{ensure_dir, RenderError};
use crate::figure::{mean_annotation, series_color, Line, LineChart};
use plddt_core::Aggregate;
use std::path::{Path, PathBuf};

pub const OVERLAP_SUFFIX: &str = "_plddt+overlapped.png";

/// `{output_dir}/{label}_plddt+overlapped.png`
pub fn overlap_output(output_dir: &Path, label: &str) -> PathBuf {
    output_dir.join(format!("{label}{OVERLAP_SUFFIX}"))
}

/// One line per collected sequence, labeled `plddt_{i}` in collection order.
///
/// Sequences of different lengths each keep their own residue range; the x-axis covers the
/// longest one.
pub fn overlap_chart<'a>(
    label: &str,
    aggregate: &'a Aggregate,
) -> Result<LineChart<'a>, RenderError> {
    let mean = aggregate.mean_of_means().ok_or(RenderError::EmptyAggregate)?;

    if let Some(lengths) = aggregate.length_mismatch() {
        tracing::warn!(
            ?lengths,
            span = aggregate.residue_span(),
            "models have different residue counts; each line is drawn over its own length"
        );
    }

    let chart = aggregate.series().fold(
        LineChart::new(format!("{label} Predicted LDDT"), mean_annotation(mean)).with_legend(),
        |chart, series| {
            chart.with_line(Line {
                label: Some(series.label()),
                values: series.confidence,
                color: series_color(series.index),
            })
        },
    );
    Ok(chart)
}

/// Plots every collected sequence on one chart and returns the written image path.
pub fn plot_overlapped(
    aggregate: &Aggregate,
    label: &str,
    output_dir: &Path,
) -> Result<PathBuf, RenderError> {
    let chart = overlap_chart(label, aggregate)?;
    ensure_dir(output_dir)?;
    let path = overlap_output(output_dir, label);
    chart.render(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plddt_core::PredictionRecord;

    fn aggregate(models: &[&[f64]]) -> Aggregate {
        models
            .iter()
            .map(|values| PredictionRecord::from_confidence(values.to_vec()).unwrap())
            .collect()
    }

    #[test]
    fn test_labels_follow_collection_order() {
        let agg = aggregate(&[&[10.0, 20.0], &[30.0, 40.0], &[50.0, 60.0]]);
        let chart = overlap_chart("design_07", &agg).unwrap();
        assert_eq!(chart.labels(), vec!["plddt_0", "plddt_1", "plddt_2"]);
        assert_eq!(chart.lines[2].values, &[50.0, 60.0]);
        assert_eq!(chart.title, "design_07 Predicted LDDT");
        assert!(chart.show_legend);
    }

    #[test]
    fn test_annotation_is_mean_of_means() {
        let agg = aggregate(&[&[50.0], &[90.0, 90.0, 90.0, 90.0, 90.0]]);
        let chart = overlap_chart("x", &agg).unwrap();
        assert_eq!(chart.annotation, "Average pLDDT: 70.00");
    }

    #[test]
    fn test_unequal_lengths_keep_their_own_range() {
        let agg = aggregate(&[&[10.0, 20.0, 30.0, 40.0], &[90.0, 90.0]]);
        let chart = overlap_chart("x", &agg).unwrap();
        assert_eq!(chart.residue_span(), 4);
        assert_eq!(chart.lines[1].values.len(), 2);
    }

    #[test]
    fn test_empty_aggregate() {
        let dir = tempfile::tempdir().unwrap();
        let err = plot_overlapped(&Aggregate::new(), "x", dir.path()).unwrap_err();
        assert!(matches!(err, RenderError::EmptyAggregate));
        assert!(!overlap_output(dir.path(), "x").exists());
    }

    #[test]
    fn test_plot_overlapped_writes_one_image() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("plots");
        let agg = aggregate(&[&[70.0, 80.0, 90.0], &[60.0, 65.0, 95.0]]);
        let written = plot_overlapped(&agg, "campaign", &out).unwrap();
        assert_eq!(written, out.join("campaign_plddt+overlapped.png"));
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);
    }
}

//! plddt-plot
//!
//! PNG charts of per-residue confidence:
//!
//! - one chart per model ([`plot_single_model`])
//! - every model overlapped on one chart ([`plot_overlapped`])
//! - the confidence band legend ([`plot_confidence_legend`])
//!
mod error;
mod figure;
mod legend;
mod overlap;
mod single;

pub use error::RenderError;
pub use figure::{mean_annotation, series_color, Line, LineChart, FIGURE_SIZE};
pub use legend::{plot_confidence_legend, LEGEND_FILE};
pub use overlap::{overlap_chart, overlap_output, plot_overlapped, OVERLAP_SUFFIX};
pub use single::{plot_single_model, single_model_chart, single_model_output, SINGLE_SUFFIX};

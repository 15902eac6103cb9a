//! Legend image for the pLDDT coloring scheme.
use crate::error::{ensure_dir, RenderError};
use plddt_core::ConfidenceBand;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

pub const LEGEND_FILE: &str = "plddt_legend.png";
const LEGEND_SIZE: (u32, u32) = (720, 420);

fn band_color(band: ConfidenceBand) -> RGBColor {
    let (r, g, b) = band.rgb();
    RGBColor(r, g, b)
}

/// Writes `{output_dir}/plddt_legend.png`: one swatch and label per confidence band.
pub fn plot_confidence_legend(output_dir: &Path) -> Result<PathBuf, RenderError> {
    ensure_dir(output_dir)?;
    let path = output_dir.join(LEGEND_FILE);
    draw_legend(&path)?;
    Ok(path)
}

fn draw_legend(path: &Path) -> Result<(), RenderError> {
    let root = BitMapBackend::new(path, LEGEND_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(RenderError::draw(path))?;
    let body = root
        .titled("Model Confidence", ("sans-serif", 40))
        .map_err(RenderError::draw(path))?;

    let label_style = ("sans-serif", 30).into_font().color(&BLACK);
    for (row, band) in ConfidenceBand::iter().enumerate() {
        let top = 30 + 80 * row as i32;
        body.draw(&Rectangle::new(
            [(40, top), (100, top + 50)],
            band_color(band).filled(),
        ))
        .map_err(RenderError::draw(path))?;
        body.draw_text(band.legend_label(), &label_style, (130, top + 10))
            .map_err(RenderError::draw(path))?;
    }

    root.present().map_err(RenderError::draw(path))
}

//! Line charts of pLDDT against residue index.
//!
//! A [`LineChart`] is a complete description of one image. Drawing it opens a fresh bitmap,
//! renders every line, writes the PNG and releases the backend before returning, so no drawing
//! state outlives a single call to [`LineChart::render`].
use crate::error::RenderError;
use plotters::prelude::*;
use std::path::Path;

/// Output size in pixels (8 x 6 inches at 200 dpi).
pub const FIGURE_SIZE: (u32, u32) = (1600, 1200);
const FOOTER_HEIGHT: u32 = 70;
const FONT: &str = "sans-serif";

pub const X_DESC: &str = "Residue";
pub const Y_DESC: &str = "pLDDT";

/// matplotlib's default color cycle.
pub const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

pub fn series_color(index: usize) -> RGBColor {
    TAB10[index % TAB10.len()]
}

/// Text written under the axes, e.g. `Average pLDDT: 50.00`.
pub fn mean_annotation(mean: f64) -> String {
    format!("Average pLDDT: {mean:.2}")
}

#[derive(Debug, Clone)]
pub struct Line<'a> {
    pub label: Option<String>,
    pub values: &'a [f64],
    pub color: RGBColor,
}

#[derive(Debug, Clone)]
pub struct LineChart<'a> {
    pub title: String,
    pub annotation: String,
    pub lines: Vec<Line<'a>>,
    pub show_legend: bool,
}

impl<'a> LineChart<'a> {
    pub fn new(title: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            annotation: annotation.into(),
            lines: Vec::new(),
            show_legend: false,
        }
    }

    pub fn with_line(mut self, line: Line<'a>) -> Self {
        self.lines.push(line);
        self
    }

    pub fn with_legend(mut self) -> Self {
        self.show_legend = true;
        self
    }

    pub fn labels(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|line| line.label.as_deref())
            .collect()
    }

    /// Residue positions covered by the longest line.
    pub fn residue_span(&self) -> usize {
        self.lines.iter().map(|l| l.values.len()).max().unwrap_or(0)
    }

    /// `[0, 100]`, widened if any value falls outside it.
    pub fn y_range(&self) -> (f64, f64) {
        self.lines
            .iter()
            .flat_map(|l| l.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold((0.0, 100.0), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }

    pub fn render(&self, path: &Path) -> Result<(), RenderError> {
        let (width, height) = FIGURE_SIZE;
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(RenderError::draw(path))?;
        let (plot_area, footer) = root.split_vertically((height - FOOTER_HEIGHT) as i32);

        let x_max = self.residue_span().saturating_sub(1).max(1) as f64;
        let (y_min, y_max) = self.y_range();

        let mut chart = ChartBuilder::on(&plot_area)
            .caption(&self.title, (FONT, 40))
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(90)
            .build_cartesian_2d(0f64..x_max, y_min..y_max)
            .map_err(RenderError::draw(path))?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .label_style((FONT, 24))
            .axis_desc_style((FONT, 28))
            .draw()
            .map_err(RenderError::draw(path))?;

        for line in &self.lines {
            let style = ShapeStyle::from(&line.color).stroke_width(2);
            let points = line
                .values
                .iter()
                .enumerate()
                .map(|(residue, &value)| (residue as f64, value));
            let series = chart
                .draw_series(LineSeries::new(points, style))
                .map_err(RenderError::draw(path))?;
            if let Some(label) = &line.label {
                series
                    .label(label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], style));
            }
        }

        if self.show_legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::LowerRight)
                .label_font((FONT, 22))
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(RenderError::draw(path))?;
        }

        footer
            .draw_text(
                &self.annotation,
                &(FONT, 28).into_font().color(&BLACK),
                (90, 10),
            )
            .map_err(RenderError::draw(path))?;

        root.present().map_err(RenderError::draw(path))?;
        tracing::debug!(path = %path.display(), width, height, lines = self.lines.len(), "wrote chart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_format() {
        assert_eq!(mean_annotation(50.0), "Average pLDDT: 50.00");
        assert_eq!(mean_annotation(78.7), "Average pLDDT: 78.70");
    }

    #[test]
    fn test_y_range_widens() {
        let values = [-5.0, 40.0, 120.0];
        let chart = LineChart::new("t", "a").with_line(Line {
            label: None,
            values: &values,
            color: series_color(0),
        });
        assert_eq!(chart.y_range(), (-5.0, 120.0));

        let inside = [30.0, 70.0];
        let chart = LineChart::new("t", "a").with_line(Line {
            label: None,
            values: &inside,
            color: series_color(0),
        });
        assert_eq!(chart.y_range(), (0.0, 100.0));
    }

    #[test]
    fn test_colors_cycle() {
        assert_eq!(series_color(0), series_color(10));
        assert_ne!(series_color(0), series_color(1));
    }

    #[test]
    fn test_render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let values = [50.0, 60.0, 70.0];
        LineChart::new("chart Predicted LDDT", mean_annotation(60.0))
            .with_line(Line {
                label: Some("plddt_0".into()),
                values: &values,
                color: series_color(0),
            })
            .with_legend()
            .render(&path)
            .unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

use super::adapters::{LineChartData, PieChartData};
use super::colors::SeriesColor;
use super::styles::{ChartStyle, ChartTheme};
use super::ChartError;
use crate::utils::compact_number;

pub const LANGUAGE_CHART_FILE: &str = "language_distribution.png";
pub const TIMELINE_CHART_FILE: &str = "repository_timeline.png";

/// Rasterises chart series to PNG files.
///
/// Created once at startup through [`ChartRenderer::init`] and handed to
/// whatever draws charts; nothing is registered globally.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    theme: ChartTheme,
    style: ChartStyle,
    output_dir: PathBuf,
}

impl ChartRenderer {
    /// One-time chart setup: prepares the output directory.
    pub fn init(
        output_dir: impl Into<PathBuf>,
        theme: ChartTheme,
        style: ChartStyle,
    ) -> Result<Self, ChartError> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        tracing::info!(output_dir = %output_dir.display(), "Chart renderer initialized");

        Ok(Self {
            theme,
            style,
            output_dir,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Draw the language distribution pie and return the image path.
    pub fn render_language_pie(&self, data: &PieChartData) -> Result<PathBuf, ChartError> {
        if data.total() == 0 {
            return Err(ChartError::NoData);
        }

        let path = self.output_dir.join(LANGUAGE_CHART_FILE);
        {
            let root =
                BitMapBackend::new(&path, (self.style.width, self.style.height)).into_drawing_area();
            // Background goes to disk before any text, which needs system fonts.
            root.fill(&self.theme.background_color)?;
            root.present()?;
            self.draw_pie(&root, data)?;
            root.present()?;
        }

        tracing::debug!(path = %path.display(), slices = data.labels.len(), "Rendered language chart");
        Ok(path)
    }

    /// Draw the repository timeline and return the image path.
    pub fn render_timeline(&self, data: &LineChartData) -> Result<PathBuf, ChartError> {
        if data.values.is_empty() {
            return Err(ChartError::NoData);
        }

        let path = self.output_dir.join(TIMELINE_CHART_FILE);
        {
            let root =
                BitMapBackend::new(&path, (self.style.width, self.style.height)).into_drawing_area();
            // Background goes to disk before any text, which needs system fonts.
            root.fill(&self.theme.background_color)?;
            root.present()?;
            self.draw_timeline(&root, data)?;
            root.present()?;
        }

        tracing::debug!(path = %path.display(), points = data.values.len(), "Rendered timeline chart");
        Ok(path)
    }

    fn text_style(&self, size: u32) -> TextStyle<'static> {
        ("sans-serif", size as i32)
            .into_font()
            .color(&self.theme.text_color)
    }

    fn draw_pie(
        &self,
        root: &DrawingArea<BitMapBackend, Shift>,
        data: &PieChartData,
    ) -> Result<(), ChartError> {
        let area = root.titled("Language Distribution", self.text_style(self.style.caption_size))?;

        let (width, height) = area.dim_in_pixel();
        let center = ((width / 2) as i32, (height / 2) as i32);
        let radius = f64::from(width.min(height)) * 0.35;

        let sizes: Vec<f64> = data.values.iter().map(|v| *v as f64).collect();
        let colors: Vec<RGBColor> = data.colors.iter().map(to_plot_color).collect();
        let labels: Vec<String> = data
            .labels
            .iter()
            .zip(&data.values)
            .map(|(label, value)| format!("{} ({})", label, value))
            .collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(self.text_style(self.style.font_size));
        pie.label_offset(f64::from(self.style.margin) * 2.0);
        area.draw(&pie)?;

        if data.border_width > 0 {
            area.draw(&Circle::new(
                center,
                radius as i32,
                self.theme.axis_color.stroke_width(data.border_width),
            ))?;
        }

        Ok(())
    }

    fn draw_timeline(
        &self,
        root: &DrawingArea<BitMapBackend, Shift>,
        data: &LineChartData,
    ) -> Result<(), ChartError> {

        let max_value = data.values.iter().copied().max().unwrap_or(0).max(1) as f64;
        let x_max = (data.values.len().saturating_sub(1)).max(1) as f64;

        let mut chart = ChartBuilder::on(root)
            .caption("Repository Timeline", self.text_style(self.style.caption_size))
            .margin(self.style.margin)
            .set_all_label_area_size(self.style.label_area_size)
            .build_cartesian_2d(0f64..x_max, 0f64..max_value * 1.1)?;

        let dates = data.labels.clone();
        let x_label_formatter = move |x: &f64| date_tick_label(&dates, *x);

        chart
            .configure_mesh()
            .light_line_style(TRANSPARENT)
            .bold_line_style(self.theme.grid_color)
            .axis_style(self.theme.axis_color)
            .y_desc(data.series_label.as_str())
            .label_style(self.text_style(self.style.font_size))
            .x_label_formatter(&x_label_formatter)
            .y_label_formatter(&|y: &f64| compact_number(*y))
            .x_label_style(
                self.text_style(self.style.font_size)
                    .transform(FontTransform::Rotate90)
                    .pos(Pos::new(HPos::Right, VPos::Center)),
            )
            .draw()?;

        let line_color = to_plot_color(&data.line_color);
        let points: Vec<(f64, f64)> = data
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v as f64))
            .collect();

        if data.fill {
            chart.draw_series(AreaSeries::new(
                points.iter().copied(),
                0.0,
                line_color.mix(0.2),
            ))?;
        }

        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                line_color.stroke_width(self.style.line_width),
            ))?
            .label(data.series_label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color));

        chart.draw_series(
            points
                .iter()
                .map(|point| Circle::new(*point, 3, line_color.filled())),
        )?;

        chart
            .configure_series_labels()
            .background_style(self.theme.background_color)
            .border_style(self.theme.axis_color)
            .label_font(self.text_style(self.style.font_size))
            .draw()?;

        Ok(())
    }
}

/// Plotting color for a series; unparseable colors render gray.
fn to_plot_color(color: &SeriesColor) -> RGBColor {
    color
        .to_rgb()
        .map(|(r, g, b)| RGBColor(r, g, b))
        .unwrap_or(RGBColor(128, 128, 128))
}

/// Show the first, the last and roughly every quarter of the dates so the
/// rotated labels do not overlap.
fn date_tick_label(dates: &[String], x: f64) -> String {
    if x < 0.0 || x.fract() != 0.0 {
        return String::new();
    }
    let idx = x as usize;
    let Some(date) = dates.get(idx) else {
        return String::new();
    };
    let last = dates.len() - 1;
    let step = (dates.len() / 4).max(1);
    if idx == 0 || idx == last || idx % step == 0 {
        date.clone()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod label_tests {
    use super::*;

    #[test]
    fn test_date_tick_label() {
        let dates: Vec<String> = (1..=9).map(|d| format!("2024-01-0{}", d)).collect();
        assert_eq!(date_tick_label(&dates, 0.0), "2024-01-01");
        assert_eq!(date_tick_label(&dates, 8.0), "2024-01-09");
        assert_eq!(date_tick_label(&dates, 2.0), "2024-01-03");
        assert_eq!(date_tick_label(&dates, 3.0), "");
        assert_eq!(date_tick_label(&dates, 1.5), "");
        assert_eq!(date_tick_label(&dates, 42.0), "");
    }
}

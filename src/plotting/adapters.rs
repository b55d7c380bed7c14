//! Shaping of backend statistics into chart series.
//!
//! Both adapters are pure: they borrow their input and return `None` when
//! there is nothing to plot.

use super::colors::{language_color, SeriesColor, TIMELINE_COLOR};
use crate::types::{CountMap, TimelinePoint};

/// Input for the language distribution pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChartData {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: Vec<SeriesColor>,
    pub border_width: u32,
}

impl PieChartData {
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }
}

/// Input for the repository timeline line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartData {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub series_label: String,
    pub line_color: SeriesColor,
    pub fill: bool,
}

/// Build the pie series for a language distribution, one slice per language
/// in the order the backend sent them.
pub fn language_chart_data(distribution: Option<&CountMap>) -> Option<PieChartData> {
    let distribution = distribution.filter(|d| !d.is_empty())?;

    let mut labels = Vec::with_capacity(distribution.len());
    let mut values = Vec::with_capacity(distribution.len());
    let mut colors = Vec::with_capacity(distribution.len());
    for (language, count) in distribution.iter() {
        labels.push(language.to_string());
        values.push(count);
        colors.push(language_color(language));
    }

    Some(PieChartData {
        labels,
        values,
        colors,
        border_width: 1,
    })
}

/// Build the line series for a creation timeline. Points are neither sorted
/// nor merged.
pub fn timeline_chart_data(timeline: Option<&[TimelinePoint]>) -> Option<LineChartData> {
    let timeline = timeline.filter(|t| !t.is_empty())?;

    Some(LineChartData {
        labels: timeline.iter().map(|point| point.date.clone()).collect(),
        values: timeline.iter().map(|point| point.repos).collect(),
        series_label: "Repositories".to_string(),
        line_color: TIMELINE_COLOR,
        fill: false,
    })
}

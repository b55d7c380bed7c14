//! # Charts
//!
//! Turning backend statistics into chart series ([`adapters`]) and drawing
//! those series to images ([`chart`]).

pub mod adapters;
pub mod chart;
pub mod colors;
pub mod styles;


pub use adapters::{language_chart_data, timeline_chart_data, LineChartData, PieChartData};
pub use chart::ChartRenderer;
pub use colors::{language_color, SeriesColor};
pub use styles::{ChartStyle, ChartTheme};

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("nothing to plot")]
    NoData,

    #[error("chart drawing failed: {0}")]
    Drawing(String),

    #[error("chart output error: {0}")]
    Io(#[from] std::io::Error),
}

impl<E> From<DrawingAreaErrorKind<E>> for ChartError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(e.to_string())
    }
}

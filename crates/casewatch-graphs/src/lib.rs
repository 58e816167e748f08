//! # casewatch graphs
//!
//! Renders the aggregated series as a PNG line chart using plotters.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod renderer;
pub mod style;

pub use renderer::{chart_title, ChartRenderer, LineChartRenderer};
pub use style::{parse_color, ChartStyle};

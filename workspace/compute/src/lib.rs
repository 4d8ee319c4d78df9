//! Presentation pipeline for the forecast dashboard.
//!
//! Turns one [`AnalysisResult`] into the two chart specifications and the
//! formatted metrics the dashboard shows, and drives the single load through
//! the [`DashboardController`] state machine.

pub mod controller;
pub mod metrics;
pub mod series;

#[cfg(test)]
pub(crate) mod testing;

pub use common::{AnalysisResult, ChartSpec, DashboardError};
pub use controller::{AnalysisSource, DashboardController, DashboardState, DashboardView, RenderSink};
pub use metrics::{format_metrics, MetricsSummary};
pub use series::{build_compare_chart, build_main_chart};

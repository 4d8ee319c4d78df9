//! Common transport-layer types shared between the compute pipeline and the frontend.
//! The analysis structs mirror the backend's `/api/analizar` payload so both sides
//! deserialize it without duplicating shapes.

mod analysis;
mod chart;
mod date_label;
mod error;

pub use analysis::{
    parse_analysis, AnalysisResult, KeyDates, PredictionPoint, SeriesPoint, Stats, Validation,
    ANALYSIS_ENDPOINT,
};
pub use chart::{ChartKind, ChartSpec, DashStyle, Dataset, LineStyle};
pub use date_label::calendar_day;
pub use error::{DashboardError, Result};

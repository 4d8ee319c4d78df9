//! Metrics formatter: accuracy and call-center statistics as display strings.

use common::{AnalysisResult, DashboardError};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{instrument, warn};

/// Placeholder shown when a day set is empty
pub const NO_DAYS_PLACEHOLDER: &str = "None";

const ERROR_PLACES: u32 = 2;
const R2_PLACES: u32 = 3;
const RATE_PLACES: u32 = 2;

/// Formatted metrics panel content
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub rmse: String,
    pub mae: String,
    pub r2: String,
    pub average_sla: String,
    pub average_abandonment: String,
    pub peak_days_text: String,
    pub trough_days_text: String,
    /// Mean daily calls, when the backend sent it
    pub mean: Option<String>,
    /// Standard deviation of daily calls, when the backend sent it
    pub std_dev: Option<String>,
}

/// Fixed-precision decimal text of the exact binary value, ties rounded away
/// from zero.
///
/// `1.005` is stored as `1.00499...` and renders as `1.00`, matching what a
/// browser's `toFixed` shows. Non-finite input never panics; it renders as
/// `NaN`, `inf` or `-inf`.
pub fn format_fixed(value: f64, places: u32) -> String {
    if !value.is_finite() {
        warn!(value, "Non-finite metric value");
        return value.to_string();
    }

    match Decimal::from_f64_retain(value) {
        Some(decimal) => {
            let mut rounded =
                decimal.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
            if rounded.is_zero() {
                rounded.set_sign_positive(true);
            }
            format!("{:.*}", places as usize, rounded)
        }
        // Outside the Decimal range, fall back to float formatting
        None => format!("{:.*}", places as usize, value),
    }
}

fn required(value: Option<f64>, field: &'static str) -> Result<f64, DashboardError> {
    value.ok_or_else(|| {
        warn!(field, "Required metric is absent");
        DashboardError::Format { field }
    })
}

fn join_days(days: &[String]) -> String {
    if days.is_empty() {
        NO_DAYS_PLACEHOLDER.to_string()
    } else {
        days.join(", ")
    }
}

/// Formats the metrics panel.
///
/// Fails with [`DashboardError::Format`] naming the first required metric that
/// is absent, so a missing value is never shown as zero.
#[instrument(level = "debug", skip_all)]
pub fn format_metrics(result: &AnalysisResult) -> Result<MetricsSummary, DashboardError> {
    let validation = &result.validation;
    let stats = &result.stats;

    let rmse = required(validation.rmse, "rmse")?;
    let mae = required(validation.mae, "mae")?;
    let r2 = required(validation.r2, "r2")?;
    let average_sla = required(stats.average_sla, "average_sla")?;
    let average_abandonment = required(stats.average_abandonment, "average_abandonment")?;

    Ok(MetricsSummary {
        rmse: format_fixed(rmse, ERROR_PLACES),
        mae: format_fixed(mae, ERROR_PLACES),
        r2: format_fixed(r2, R2_PLACES),
        average_sla: format_fixed(average_sla, RATE_PLACES),
        average_abandonment: format_fixed(average_abandonment, RATE_PLACES),
        peak_days_text: join_days(&stats.peak_days),
        trough_days_text: join_days(&stats.trough_days),
        mean: stats.mean.map(|mean| format_fixed(mean, RATE_PLACES)),
        std_dev: stats.std_dev.map(|std_dev| format_fixed(std_dev, RATE_PLACES)),
    })
}

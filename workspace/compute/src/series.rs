//! Series mapper: analysis payload to chart specifications.
//!
//! The main chart overlays training, forecast and validation on one category
//! axis. The three sources cover different date ranges, so their values are
//! aligned by date on a unified, deduplicated and sorted axis rather than by
//! position.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use common::{calendar_day, AnalysisResult, ChartKind, ChartSpec, Dataset, LineStyle};
use tracing::{debug, instrument, warn};

pub const TRAINING_DATASET: &str = "Training";
pub const FORECAST_DATASET: &str = "Forecast";
pub const VALIDATION_DATASET: &str = "Actual (validation)";
pub const ACTUAL_DATASET: &str = "Actual";
pub const PREDICTED_DATASET: &str = "Predicted";

pub const COMPARE_TITLE: &str = "Validation window: Predicted vs Actual";

const TRAINING_COLOR: &str = "steelblue";
const FORECAST_COLOR: &str = "orange";
const ACTUAL_COLOR: &str = "green";

const MAIN_TENSION: f64 = 0.3;
const MAX_X_TICKS: usize = 10;

/// Position on the category axis. Calendar days sort chronologically and come
/// before any label that is not a date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum AxisKey {
    Day(NaiveDate),
    Text(String),
}

impl AxisKey {
    fn from_label(label: &str) -> Self {
        match calendar_day(label) {
            Some(day) => AxisKey::Day(day),
            None => AxisKey::Text(label.to_string()),
        }
    }

    fn label(&self) -> String {
        match self {
            AxisKey::Day(day) => day.to_string(),
            AxisKey::Text(text) => text.clone(),
        }
    }
}

/// Values of one source keyed by axis position. A repeated date keeps its last value.
fn keyed_values<'a, I>(source: &str, points: I) -> BTreeMap<AxisKey, Option<f64>>
where
    I: IntoIterator<Item = (&'a str, Option<f64>)>,
{
    let mut keyed = BTreeMap::new();
    let mut repeated = 0usize;
    for (label, value) in points {
        if keyed.insert(AxisKey::from_label(label), value).is_some() {
            repeated += 1;
        }
    }
    if repeated > 0 {
        debug!(source, repeated, "Repeated dates collapsed, last value kept");
    }
    keyed
}

fn aligned(axis: &BTreeSet<AxisKey>, keyed: &BTreeMap<AxisKey, Option<f64>>) -> Vec<Option<f64>> {
    axis.iter()
        .map(|key| keyed.get(key).copied().flatten())
        .collect()
}

/// Pads with `None` or truncates so the dataset has exactly one value per label.
fn fit_to_labels(name: &str, values: &[Option<f64>], len: usize) -> Vec<Option<f64>> {
    if values.len() != len {
        warn!(
            dataset = name,
            values = values.len(),
            labels = len,
            "Dataset length differs from label count, aligning to labels"
        );
    }
    values
        .iter()
        .copied()
        .chain(std::iter::repeat(None))
        .take(len)
        .collect()
}

pub fn main_chart_title(result: &AnalysisResult) -> String {
    format!(
        "SARIMA - Training until {}, validation from {}",
        result.key_dates.train_until, result.key_dates.valid_from
    )
}

/// Training, forecast and validation actuals on one timeline.
#[instrument(level = "debug", skip_all)]
pub fn build_main_chart(result: &AnalysisResult) -> ChartSpec {
    let training = keyed_values(
        TRAINING_DATASET,
        result
            .series
            .iter()
            .map(|point| (point.date.as_str(), point.total_calls)),
    );
    let forecast = keyed_values(
        FORECAST_DATASET,
        result
            .predictions
            .iter()
            .map(|point| (point.date.as_str(), point.predicted_value)),
    );
    let validation = keyed_values(
        VALIDATION_DATASET,
        result
            .validation
            .dates
            .iter()
            .map(String::as_str)
            .zip(result.validation.actual.iter().copied()),
    );

    // Validation dates without a matching actual still belong on the axis.
    let axis: BTreeSet<AxisKey> = training
        .keys()
        .chain(forecast.keys())
        .cloned()
        .chain(
            result
                .validation
                .dates
                .iter()
                .map(|label| AxisKey::from_label(label)),
        )
        .collect();

    debug!(labels = axis.len(), "Built unified main chart axis");

    ChartSpec {
        kind: ChartKind::Line,
        title: main_chart_title(result),
        labels: axis.iter().map(AxisKey::label).collect(),
        datasets: vec![
            Dataset {
                name: TRAINING_DATASET.to_string(),
                values: aligned(&axis, &training),
                style: LineStyle::solid(TRAINING_COLOR, MAIN_TENSION),
            },
            Dataset {
                name: FORECAST_DATASET.to_string(),
                values: aligned(&axis, &forecast),
                style: LineStyle::dashed(FORECAST_COLOR, MAIN_TENSION),
            },
            Dataset {
                name: VALIDATION_DATASET.to_string(),
                values: aligned(&axis, &validation),
                style: LineStyle::solid(ACTUAL_COLOR, MAIN_TENSION),
            },
        ],
        y_begin_at_zero: true,
        max_x_ticks: Some(MAX_X_TICKS),
    }
}

/// Actual against predicted over the validation window only.
#[instrument(level = "debug", skip_all)]
pub fn build_compare_chart(result: &AnalysisResult) -> ChartSpec {
    let validation = &result.validation;
    let len = validation.dates.len();

    ChartSpec {
        kind: ChartKind::Line,
        title: COMPARE_TITLE.to_string(),
        labels: validation.dates.clone(),
        datasets: vec![
            Dataset {
                name: ACTUAL_DATASET.to_string(),
                values: fit_to_labels(ACTUAL_DATASET, &validation.actual, len),
                style: LineStyle::solid(ACTUAL_COLOR, 0.0),
            },
            Dataset {
                name: PREDICTED_DATASET.to_string(),
                values: fit_to_labels(PREDICTED_DATASET, &validation.predicted, len),
                style: LineStyle::dashed(FORECAST_COLOR, 0.0),
            },
        ],
        y_begin_at_zero: true,
        max_x_ticks: None,
    }
}

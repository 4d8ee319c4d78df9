use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use common::{
    AnalysisResult, ChartSpec, DashboardError, Dataset, KeyDates, PredictionPoint, SeriesPoint,
    Stats, Validation,
};

use crate::controller::{AnalysisSource, DashboardView, RenderSink};

pub fn dataset_named<'a>(chart: &'a ChartSpec, name: &str) -> Option<&'a Dataset> {
    chart.datasets.iter().find(|dataset| dataset.name == name)
}

/// Builds an analysis from `(date, value)` training/forecast points and
/// `(date, actual, predicted)` validation rows. Metrics are filled with the
/// values of [`single_point_analysis`].
pub fn analysis_with(
    series: &[(&str, f64)],
    predictions: &[(&str, f64)],
    validation: &[(&str, f64, f64)],
) -> AnalysisResult {
    AnalysisResult {
        series: series
            .iter()
            .map(|(date, value)| SeriesPoint {
                date: date.to_string(),
                total_calls: Some(*value),
            })
            .collect(),
        predictions: predictions
            .iter()
            .map(|(date, value)| PredictionPoint {
                date: date.to_string(),
                predicted_value: Some(*value),
            })
            .collect(),
        validation: Validation {
            dates: validation.iter().map(|(date, _, _)| date.to_string()).collect(),
            actual: validation.iter().map(|(_, actual, _)| Some(*actual)).collect(),
            predicted: validation.iter().map(|(_, _, predicted)| Some(*predicted)).collect(),
            rmse: Some(5.0),
            mae: Some(4.0),
            r2: Some(0.9),
        },
        stats: Stats {
            average_sla: Some(87.456),
            average_abandonment: Some(4.2),
            peak_days: vec!["2025-08-15".to_string(), "2025-08-22".to_string()],
            trough_days: Vec::new(),
            mean: None,
            std_dev: None,
        },
        key_dates: KeyDates {
            train_until: "2025-08-31".to_string(),
            valid_from: "2025-10-01".to_string(),
        },
    }
}

/// One training day, one forecast day and one validation day.
pub fn single_point_analysis() -> AnalysisResult {
    analysis_with(
        &[("2025-08-01", 120.0)],
        &[("2025-09-01", 130.0)],
        &[("2025-10-01", 140.0, 135.0)],
    )
}

/// Sink that records every call it receives
#[derive(Default)]
pub struct RecordingSink {
    views: RefCell<Vec<DashboardView>>,
    errors: RefCell<Vec<DashboardError>>,
}

impl RecordingSink {
    pub fn views(&self) -> Vec<DashboardView> {
        self.views.borrow().clone()
    }

    pub fn errors(&self) -> Vec<DashboardError> {
        self.errors.borrow().clone()
    }
}

impl RenderSink for RecordingSink {
    fn render(&self, view: &DashboardView) {
        self.views.borrow_mut().push(view.clone());
    }

    fn fail(&self, error: &DashboardError) {
        self.errors.borrow_mut().push(error.clone());
    }
}

/// Source that resolves immediately with a fixed outcome
pub struct StubSource {
    outcome: Result<AnalysisResult, DashboardError>,
    calls: Cell<usize>,
}

impl StubSource {
    pub fn ok(result: AnalysisResult) -> Self {
        Self {
            outcome: Ok(result),
            calls: Cell::new(0),
        }
    }

    pub fn err(error: DashboardError) -> Self {
        Self {
            outcome: Err(error),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl AnalysisSource for StubSource {
    async fn fetch_analysis(&self) -> Result<AnalysisResult, DashboardError> {
        self.calls.set(self.calls.get() + 1);
        self.outcome.clone()
    }
}

/// Source that suspends once before resolving, leaving room for a teardown
pub struct YieldingSource {
    result: AnalysisResult,
    started: Cell<bool>,
}

impl YieldingSource {
    pub fn new(result: AnalysisResult) -> Self {
        Self {
            result,
            started: Cell::new(false),
        }
    }

    pub fn started(&self) -> bool {
        self.started.get()
    }
}

#[async_trait(?Send)]
impl AnalysisSource for YieldingSource {
    async fn fetch_analysis(&self) -> Result<AnalysisResult, DashboardError> {
        self.started.set(true);
        tokio::task::yield_now().await;
        Ok(self.result.clone())
    }
}

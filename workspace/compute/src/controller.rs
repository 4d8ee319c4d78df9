//! Dashboard controller: one load per mount, `Loading` → `Ready` | `Failed`.
//!
//! The controller is single-threaded. State lives behind `Rc` so the frontend
//! can hand a clone to a `spawn_local` task while the component keeps another
//! for teardown. A result that resolves after teardown is dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use common::{AnalysisResult, ChartSpec, DashboardError, KeyDates};
use tracing::{debug, info, instrument, warn};

use crate::metrics::{format_metrics, MetricsSummary};
use crate::series::{build_compare_chart, build_main_chart};

/// Where the analysis payload comes from
#[async_trait(?Send)]
pub trait AnalysisSource {
    /// Performs exactly one fetch
    async fn fetch_analysis(&self) -> Result<AnalysisResult, DashboardError>;
}

/// Consumer of render-ready structures
pub trait RenderSink {
    /// Called once when the controller enters `Ready`
    fn render(&self, view: &DashboardView);

    /// Called once when the controller enters `Failed`
    fn fail(&self, error: &DashboardError);
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashboardState {
    #[default]
    Loading,
    Ready(Rc<AnalysisResult>),
    Failed(DashboardError),
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Ready(result) => Some(result.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DashboardError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Everything one render of the dashboard needs
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub main: ChartSpec,
    pub compare: ChartSpec,
    /// A missing metric only affects the metrics panel, the charts still render
    pub metrics: Result<MetricsSummary, DashboardError>,
    pub key_dates: KeyDates,
}

impl DashboardView {
    pub fn from_analysis(result: &AnalysisResult) -> Self {
        Self {
            main: build_main_chart(result),
            compare: build_compare_chart(result),
            metrics: format_metrics(result),
            key_dates: result.key_dates.clone(),
        }
    }
}

pub struct DashboardController<S> {
    state: Rc<RefCell<DashboardState>>,
    alive: Rc<Cell<bool>>,
    started: Rc<Cell<bool>>,
    sink: Rc<S>,
}

impl<S> Clone for DashboardController<S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            alive: Rc::clone(&self.alive),
            started: Rc::clone(&self.started),
            sink: Rc::clone(&self.sink),
        }
    }
}

impl<S: RenderSink> DashboardController<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: Rc::new(RefCell::new(DashboardState::Loading)),
            alive: Rc::new(Cell::new(true)),
            started: Rc::new(Cell::new(false)),
            sink: Rc::new(sink),
        }
    }

    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    #[cfg(test)]
    pub(crate) fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// Render-ready structures for the current result, if any
    pub fn view(&self) -> Option<DashboardView> {
        self.state.borrow().result().map(DashboardView::from_analysis)
    }

    /// Marks the owning view as gone. Pending loads will not commit.
    pub fn teardown(&self) {
        if self.alive.replace(false) {
            debug!("Dashboard controller torn down");
        }
    }

    /// Runs the single load for this mount.
    ///
    /// Only the first call fetches; later calls return immediately. Fetch
    /// failures end in `Failed` and are not propagated.
    #[instrument(level = "debug", skip_all)]
    pub async fn mount<C>(&self, source: &C)
    where
        C: AnalysisSource + ?Sized,
    {
        if self.started.replace(true) {
            debug!("Dashboard already mounted, ignoring repeated mount");
            return;
        }

        if !self.is_alive() {
            debug!("Dashboard torn down before mount, skipping fetch");
            return;
        }

        let outcome = source.fetch_analysis().await;

        if !self.is_alive() {
            debug!("Dashboard torn down while loading, discarding result");
            return;
        }

        match outcome {
            Ok(result) => self.enter_ready(result),
            Err(error) => self.enter_failed(error),
        }
    }

    fn enter_ready(&self, result: AnalysisResult) {
        let result = Rc::new(result);
        *self.state.borrow_mut() = DashboardState::Ready(Rc::clone(&result));
        info!(
            series = result.series.len(),
            predictions = result.predictions.len(),
            validation = result.validation.dates.len(),
            "Dashboard ready"
        );

        let view = DashboardView::from_analysis(&result);
        if let Err(error) = &view.metrics {
            warn!(%error, "Metrics panel cannot be formatted");
        }
        self.sink.render(&view);
    }

    fn enter_failed(&self, error: DashboardError) {
        warn!(%error, "Dashboard load failed");
        *self.state.borrow_mut() = DashboardState::Failed(error.clone());
        self.sink.fail(&error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{single_point_analysis, RecordingSink, StubSource, YieldingSource};

    #[tokio::test]
    async fn test_successful_load_renders_once() {
        let controller = DashboardController::new(RecordingSink::default());
        let source = StubSource::ok(single_point_analysis());

        assert!(controller.state().is_loading());
        controller.mount(&source).await;

        let state = controller.state();
        assert!(state.is_ready());
        assert_eq!(state.result(), Some(&single_point_analysis()));

        let views = controller.sink().views();
        assert_eq!(views.len(), 1);
        assert!(controller.sink().errors().is_empty());

        let view = &views[0];
        let counts: Vec<usize> = view.main.datasets.iter().map(|d| d.point_count()).collect();
        assert_eq!(counts, vec![1, 1, 1]);
        assert_eq!(view.compare.datasets.len(), 2);
        assert_eq!(view.compare.labels, vec!["2025-10-01"]);
        for dataset in &view.compare.datasets {
            assert_eq!(dataset.values.len(), 1);
        }
        let metrics = view.metrics.as_ref().unwrap();
        assert_eq!(metrics.rmse, "5.00");
        assert_eq!(metrics.r2, "0.900");
    }

    #[tokio::test]
    async fn test_network_failure_enters_failed_without_render() {
        let controller = DashboardController::new(RecordingSink::default());
        let error = DashboardError::Network("connection refused".to_string());
        let source = StubSource::err(error.clone());

        controller.mount(&source).await;

        assert_eq!(controller.state(), DashboardState::Failed(error.clone()));
        assert!(controller.sink().views().is_empty());
        assert_eq!(controller.sink().errors(), vec![error]);
        assert_eq!(controller.view(), None);
    }

    #[tokio::test]
    async fn test_parse_failure_enters_failed() {
        let controller = DashboardController::new(RecordingSink::default());
        let source = StubSource::err(DashboardError::Parse("expected value".to_string()));

        controller.mount(&source).await;

        assert!(controller.state().is_failed());
        assert!(controller.sink().views().is_empty());
    }

    #[tokio::test]
    async fn test_mount_fetches_only_once() {
        let controller = DashboardController::new(RecordingSink::default());
        let source = StubSource::ok(single_point_analysis());

        controller.mount(&source).await;
        controller.mount(&source).await;
        controller.clone().mount(&source).await;

        assert_eq!(source.calls(), 1);
        assert_eq!(controller.sink().views().len(), 1);
    }

    #[tokio::test]
    async fn test_teardown_while_loading_discards_result() {
        let controller = DashboardController::new(RecordingSink::default());
        let source = YieldingSource::new(single_point_analysis());

        tokio::join!(controller.mount(&source), async {
            assert!(source.started());
            controller.teardown();
        });

        assert!(!controller.is_alive());
        assert!(controller.state().is_loading());
        assert!(controller.sink().views().is_empty());
        assert!(controller.sink().errors().is_empty());
    }

    #[tokio::test]
    async fn test_teardown_before_mount_skips_fetch() {
        let controller = DashboardController::new(RecordingSink::default());
        let source = StubSource::ok(single_point_analysis());

        controller.teardown();
        controller.mount(&source).await;

        assert_eq!(source.calls(), 0);
        assert!(controller.state().is_loading());
    }

    #[tokio::test]
    async fn test_missing_metric_still_renders_charts() {
        let mut result = single_point_analysis();
        result.validation.mae = None;
        let controller = DashboardController::new(RecordingSink::default());

        controller.mount(&StubSource::ok(result)).await;

        assert!(controller.state().is_ready());
        let views = controller.sink().views();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].metrics, Err(DashboardError::Format { field: "mae" }));
        assert_eq!(views[0].main.datasets.len(), 3);
    }

    #[tokio::test]
    async fn test_same_result_renders_identically() {
        let first = DashboardController::new(RecordingSink::default());
        let second = DashboardController::new(RecordingSink::default());

        first.mount(&StubSource::ok(single_point_analysis())).await;
        second.mount(&StubSource::ok(single_point_analysis())).await;

        assert_eq!(first.sink().views(), second.sink().views());
        assert_eq!(first.view().as_ref(), first.sink().views().first());
    }
}

use std::rc::Rc;

use common::DashboardError;
use compute::{AnalysisSource, DashboardController, DashboardView, RenderSink};
use yew::prelude::*;

/// What the dashboard page currently shows
#[derive(Clone, PartialEq, Default)]
pub enum DashboardPhase {
    #[default]
    Loading,
    Ready(Rc<DashboardView>),
    Failed(DashboardError),
}

/// Render sink that hands controller output to Yew state
pub struct PhaseSink {
    phase: UseStateHandle<DashboardPhase>,
}

impl RenderSink for PhaseSink {
    fn render(&self, view: &DashboardView) {
        log::debug!("Dashboard view ready, scheduling render");
        self.phase.set(DashboardPhase::Ready(Rc::new(view.clone())));
    }

    fn fail(&self, error: &DashboardError) {
        log::error!("Dashboard failed to load: {}", error);
        self.phase.set(DashboardPhase::Failed(error.clone()));
    }
}

/// Mounts a [`DashboardController`] for the lifetime of the calling component.
///
/// The load runs once on mount. When the component unmounts the controller is
/// torn down, so a response arriving later never touches the dropped state.
#[hook]
pub fn use_dashboard<C>(source: C) -> UseStateHandle<DashboardPhase>
where
    C: AnalysisSource + 'static,
{
    let phase = use_state(DashboardPhase::default);

    {
        let phase = phase.clone();
        use_effect_with((), move |_| {
            let controller = DashboardController::new(PhaseSink { phase });
            let task = controller.clone();

            wasm_bindgen_futures::spawn_local(async move {
                task.mount(&source).await;
            });

            move || {
                log::trace!("Dashboard unmounted");
                controller.teardown();
            }
        });
    }

    phase
}

use yew::prelude::*;

use super::chart::AnalysisChart;
use super::metrics::MetricsPanel;
use crate::api_client::HttpAnalysisClient;
use crate::hooks::{use_dashboard, DashboardPhase};
use crate::status::{Failure, Loading};

const MAIN_CHART_ID: &str = "chart-forecast-main";
const COMPARE_CHART_ID: &str = "chart-forecast-compare";

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let phase = use_dashboard(HttpAnalysisClient::from_settings());

    match &*phase {
        DashboardPhase::Loading => html! {
            <Loading text="Loading call-center analysis..." />
        },
        DashboardPhase::Failed(error) => html! {
            <Failure error={error.clone()} />
        },
        DashboardPhase::Ready(view) => html! {
            <>
                <p class="mb-6 text-gray-600">
                    {"Training until "}<strong>{&view.key_dates.train_until}</strong>
                    {" · Validation from "}<strong>{&view.key_dates.valid_from}</strong>
                </p>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <AnalysisChart spec={view.main.clone()} surface_id={MAIN_CHART_ID} />
                    </div>
                </div>
                <div class="card bg-base-100 shadow mt-6">
                    <div class="card-body">
                        <AnalysisChart spec={view.compare.clone()} surface_id={COMPARE_CHART_ID} />
                    </div>
                </div>
                <div class="card bg-base-200 shadow mt-6">
                    <div class="card-body">
                        <h3 class="card-title">{"Model metrics (validation window)"}</h3>
                        <MetricsPanel metrics={view.metrics.clone()} />
                    </div>
                </div>
            </>
        },
    }
}

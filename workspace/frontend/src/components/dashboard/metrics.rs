use common::DashboardError;
use compute::MetricsSummary;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MetricsPanelProps {
    pub metrics: Result<MetricsSummary, DashboardError>,
}

#[derive(Properties, PartialEq)]
struct StatProps {
    title: AttrValue,
    value: AttrValue,
    #[prop_or_default]
    desc: Option<AttrValue>,
}

#[function_component(Stat)]
fn stat(props: &StatProps) -> Html {
    html! {
        <div class="stat">
            <div class="stat-title">{props.title.clone()}</div>
            <div class="stat-value text-2xl">{props.value.clone()}</div>
            {if let Some(desc) = &props.desc {
                html! { <div class="stat-desc">{desc.clone()}</div> }
            } else {
                html! {}
            }}
        </div>
    }
}

/// Model accuracy and call-center statistics
#[function_component(MetricsPanel)]
pub fn metrics_panel(props: &MetricsPanelProps) -> Html {
    let metrics = match &props.metrics {
        Ok(metrics) => metrics,
        Err(error) => {
            return html! {
                <div class="alert alert-warning" role="alert" data-error-kind={error.kind()}>
                    <i class="fas fa-exclamation-triangle"></i>
                    <span>{format!("Metrics unavailable: {}", error)}</span>
                </div>
            };
        }
    };

    html! {
        <div class="flex flex-col gap-4">
            <div class="stats stats-vertical md:stats-horizontal shadow bg-base-100">
                <Stat title="RMSE" value={metrics.rmse.clone()} />
                <Stat title="MAE" value={metrics.mae.clone()} />
                <Stat title="R²" value={metrics.r2.clone()} />
            </div>
            <div class="stats stats-vertical md:stats-horizontal shadow bg-base-100">
                <Stat title="Average SLA" value={format!("{}%", metrics.average_sla)} />
                <Stat title="Average abandonment" value={format!("{}%", metrics.average_abandonment)} />
                {if let (Some(mean), Some(std_dev)) = (&metrics.mean, &metrics.std_dev) {
                    html! {
                        <Stat
                            title="Daily calls"
                            value={mean.clone()}
                            desc={AttrValue::from(format!("σ {}", std_dev))}
                        />
                    }
                } else {
                    html! {}
                }}
            </div>
            <div class="text-sm leading-relaxed">
                <p><strong>{"Peak days: "}</strong>{&metrics.peak_days_text}</p>
                <p><strong>{"Trough days: "}</strong>{&metrics.trough_days_text}</p>
            </div>
        </div>
    }
}

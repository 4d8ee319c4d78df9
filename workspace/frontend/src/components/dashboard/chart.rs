use common::ChartSpec;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::charts::{draw_chart, ChartError};

#[derive(Properties, PartialEq)]
pub struct AnalysisChartProps {
    pub spec: ChartSpec,
    /// Element id Plotly draws into
    pub surface_id: AttrValue,
}

#[function_component(AnalysisChart)]
pub fn analysis_chart(props: &AnalysisChartProps) -> Html {
    let container_ref = use_node_ref();
    let draw_error = use_state_eq(|| None::<ChartError>);

    {
        let draw_error = draw_error.clone();
        use_effect_with(
            (container_ref.clone(), props.spec.clone(), props.surface_id.clone()),
            move |(container_ref, spec, surface_id)| {
                if let Some(element) = container_ref.cast::<HtmlElement>() {
                    element.set_id(surface_id);
                    match draw_chart(surface_id, spec) {
                        Ok(()) => draw_error.set(None),
                        Err(err) => {
                            log::error!("Failed to draw chart #{}: {}", surface_id, err);
                            draw_error.set(Some(err));
                        }
                    }
                }
                || ()
            },
        );
    }

    html! {
        <>
            if let Some(err) = (*draw_error).as_ref() {
                <div class="alert alert-warning" data-chart-error={props.surface_id.clone()}>
                    <span>{format!("{}: {}", props.spec.title, err)}</span>
                </div>
            }
            <div ref={container_ref} class="chart-container" style="width:100%; min-height:420px;"></div>
        </>
    }
}

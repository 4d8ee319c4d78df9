//! Plotly rendering sink for [`ChartSpec`]s.

use std::cell::OnceCell;

use common::{ChartSpec, DashStyle, Dataset};
use plotly::common::{DashType, Line, LineShape, Mode, Title};
use plotly::layout::{Axis, RangeMode};
use plotly::{Layout, Scatter};
use thiserror::Error;
use wasm_bindgen::prelude::*;

const CHART_HEIGHT: usize = 420;
const PLOT_CONFIG: &str = r#"{"responsive": true, "displayModeBar": false}"#;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

/// Why a chart could not be drawn
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("Chart library is not loaded")]
    RuntimeUnavailable,

    #[error("Chart data could not be encoded: {0}")]
    Encode(String),

    #[error("Chart library rejected the plot: {0}")]
    Script(String),
}

impl From<JsValue> for ChartError {
    fn from(value: JsValue) -> Self {
        ChartError::Script(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

thread_local! {
    static CHART_RUNTIME: OnceCell<()> = const { OnceCell::new() };
}

/// One-time initialization of the Plotly runtime.
///
/// Once Plotly has been found, later calls return without touching the page.
/// A miss is not remembered, so a script that finishes loading late is still
/// picked up by the next draw. Returns whether charts can be drawn.
pub fn init_chart_runtime() -> bool {
    CHART_RUNTIME.with(|runtime| {
        if runtime.get().is_some() {
            return true;
        }

        let available = js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("Plotly"))
            .unwrap_or(false);
        if available {
            log::info!("Chart runtime initialized (Plotly)");
            let _ = runtime.set(());
        } else {
            log::warn!("Plotly is not loaded yet, charts cannot be drawn");
        }
        available
    })
}

fn trace_for(labels: &[String], dataset: &Dataset) -> Box<Scatter<String, Option<f64>>> {
    let mut line = Line::new()
        .color(dataset.style.color.clone())
        .width(dataset.style.width);

    line = match dataset.style.dash {
        DashStyle::Solid => line.dash(DashType::Solid),
        DashStyle::Dashed => line.dash(DashType::Dash),
    };

    if dataset.style.tension > 0.0 {
        line = line.shape(LineShape::Spline).smoothing(dataset.style.tension);
    }

    Scatter::new(labels.to_vec(), dataset.values.clone())
        .mode(Mode::Lines)
        .name(&dataset.name)
        .connect_gaps(true)
        .line(line)
}

fn layout_for(spec: &ChartSpec) -> Layout {
    let mut x_axis = Axis::new();
    if let Some(max_ticks) = spec.max_x_ticks {
        x_axis = x_axis.n_ticks(max_ticks);
    }

    let y_axis = if spec.y_begin_at_zero {
        Axis::new().range_mode(RangeMode::ToZero)
    } else {
        Axis::new()
    };

    Layout::new()
        .title(Title::with_text(&spec.title))
        .x_axis(x_axis)
        .y_axis(y_axis)
        .show_legend(true)
        .height(CHART_HEIGHT)
}

fn to_js_json<T: serde::Serialize>(value: &T) -> Result<JsValue, ChartError> {
    let json = serde_json::to_string(value).map_err(|e| ChartError::Encode(e.to_string()))?;
    Ok(js_sys::JSON::parse(&json)?)
}

/// Draws `spec` into the element with id `surface_id`, replacing any previous plot.
pub fn draw_chart(surface_id: &str, spec: &ChartSpec) -> Result<(), ChartError> {
    if !init_chart_runtime() {
        return Err(ChartError::RuntimeUnavailable);
    }

    let data = js_sys::Array::new();
    for dataset in &spec.datasets {
        data.push(&to_js_json(&trace_for(&spec.labels, dataset))?);
    }

    let layout = to_js_json(&layout_for(spec))?;
    let config = js_sys::JSON::parse(PLOT_CONFIG)?;

    log::debug!(
        "Drawing chart '{}' into #{} ({} labels, {} datasets, {} points)",
        spec.title,
        surface_id,
        spec.labels.len(),
        spec.datasets.len(),
        spec.datasets.iter().map(Dataset::point_count).sum::<usize>()
    );
    newPlot(surface_id, data.into(), layout, config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{ChartKind, LineStyle};
    use serde_json::Value;

    fn sample_spec() -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Line,
            title: "SARIMA - Training until 2025-08-31, validation from 2025-10-01".to_string(),
            labels: vec!["2025-08-31".to_string(), "2025-09-01".to_string()],
            datasets: vec![
                Dataset {
                    name: "Training".to_string(),
                    values: vec![Some(120.0), None],
                    style: LineStyle::solid("steelblue", 0.3),
                },
                Dataset {
                    name: "Forecast".to_string(),
                    values: vec![None, Some(130.0)],
                    style: LineStyle::dashed("orange", 0.0),
                },
            ],
            y_begin_at_zero: true,
            max_x_ticks: Some(10),
        }
    }

    #[test]
    fn test_trace_keeps_gaps_as_null() {
        let spec = sample_spec();
        let trace: Value = serde_json::to_value(trace_for(&spec.labels, &spec.datasets[0])).unwrap();

        assert_eq!(trace["name"], "Training");
        assert_eq!(trace["x"][1], "2025-09-01");
        assert_eq!(trace["y"][0], 120.0);
        assert!(trace["y"][1].is_null());
        assert_eq!(trace["line"]["color"], "steelblue");
        assert_eq!(trace["line"]["shape"], "spline");
    }

    #[test]
    fn test_dashed_trace() {
        let spec = sample_spec();
        let trace: Value = serde_json::to_value(trace_for(&spec.labels, &spec.datasets[1])).unwrap();

        assert_eq!(trace["line"]["dash"], "dash");
        assert!(trace["line"].get("shape").is_none());
    }

    #[test]
    fn test_chart_error_messages() {
        assert_eq!(
            ChartError::RuntimeUnavailable.to_string(),
            "Chart library is not loaded"
        );
        assert_eq!(
            ChartError::Encode("bad float".to_string()).to_string(),
            "Chart data could not be encoded: bad float"
        );
    }

    #[test]
    fn test_layout_carries_title() {
        let layout: Value = serde_json::to_value(layout_for(&sample_spec())).unwrap();

        assert_eq!(
            layout["title"]["text"],
            "SARIMA - Training until 2025-08-31, validation from 2025-10-01"
        );
        assert_eq!(layout["yaxis"]["rangemode"], "tozero");
    }
}

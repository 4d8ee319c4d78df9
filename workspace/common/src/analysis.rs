use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};

/// Path of the analysis endpoint, relative to the API base URL.
pub const ANALYSIS_ENDPOINT: &str = "/api/analizar";

/// Full forecast, validation and statistics payload for one dashboard load.
///
/// Field names on the wire are the backend's (`fecha`, `llamadas_totales`, ...).
/// Every field tolerates being absent or `null`: sequences become empty, metrics
/// become `None`, so downstream code can tell "absent" apart from zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub series: Vec<SeriesPoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub predictions: Vec<PredictionPoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub validation: Validation,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stats: Stats,
    #[serde(rename = "fechas_clave", default, deserialize_with = "null_as_default")]
    pub key_dates: KeyDates,
}

/// One day of the historical (training) series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(rename = "fecha", default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(rename = "llamadas_totales", default)]
    pub total_calls: Option<f64>,
}

/// One day of the model forecast.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionPoint {
    #[serde(rename = "fecha", default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(rename = "pred", default)]
    pub predicted_value: Option<f64>,
}

/// Held-out comparison window. `dates`, `actual` and `predicted` are parallel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Validation {
    #[serde(rename = "fechas", default, deserialize_with = "null_as_default")]
    pub dates: Vec<String>,
    #[serde(rename = "real", default, deserialize_with = "null_as_default")]
    pub actual: Vec<Option<f64>>,
    #[serde(rename = "pred", default, deserialize_with = "null_as_default")]
    pub predicted: Vec<Option<f64>>,
    #[serde(default)]
    pub rmse: Option<f64>,
    #[serde(default)]
    pub mae: Option<f64>,
    #[serde(default)]
    pub r2: Option<f64>,
}

impl Validation {
    /// True when the three parallel sequences have the same length
    pub fn is_parallel(&self) -> bool {
        self.dates.len() == self.actual.len() && self.dates.len() == self.predicted.len()
    }
}

/// Call-center statistics computed over the whole series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(rename = "promedio_sla", default)]
    pub average_sla: Option<f64>,
    #[serde(rename = "promedio_abandono", default)]
    pub average_abandonment: Option<f64>,
    #[serde(rename = "dias_pico", default, deserialize_with = "null_as_default")]
    pub peak_days: Vec<String>,
    #[serde(rename = "dias_valle", default, deserialize_with = "null_as_default")]
    pub trough_days: Vec<String>,
    #[serde(rename = "media", default)]
    pub mean: Option<f64>,
    #[serde(rename = "desviacion", default)]
    pub std_dev: Option<f64>,
}

/// Train/validation split boundaries, used for titling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeyDates {
    #[serde(rename = "train_hasta", default, deserialize_with = "null_as_default")]
    pub train_until: String,
    #[serde(rename = "valid_desde", default, deserialize_with = "null_as_default")]
    pub valid_from: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses a response body from the analysis endpoint.
///
/// The backend answers some failures (missing CSV, not enough data) with a
/// `{"error": "..."}` object and a success status; those become
/// [`DashboardError::Backend`]. Anything that is not a JSON object, or whose
/// fields have the wrong type, is a [`DashboardError::Parse`].
pub fn parse_analysis(body: &str) -> Result<AnalysisResult> {
    let value: Value = serde_json::from_str(body)?;

    let Value::Object(ref object) = value else {
        warn!("Analysis payload is not a JSON object");
        return Err(DashboardError::Parse(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    if let Some(message) = object.get("error").and_then(Value::as_str) {
        warn!(%message, "Backend reported an analysis error");
        return Err(DashboardError::Backend(message.to_string()));
    }

    let result: AnalysisResult = serde_json::from_value(value)?;
    if !result.validation.is_parallel() {
        warn!(
            dates = result.validation.dates.len(),
            actual = result.validation.actual.len(),
            predicted = result.validation.predicted.len(),
            "Validation sequences have different lengths"
        );
    }
    debug!(
        series = result.series.len(),
        predictions = result.predictions.len(),
        validation = result.validation.dates.len(),
        "Parsed analysis payload"
    );
    Ok(result)
}

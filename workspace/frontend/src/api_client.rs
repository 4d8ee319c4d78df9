use async_trait::async_trait;
use common::{parse_analysis, AnalysisResult, DashboardError, ANALYSIS_ENDPOINT};
use compute::AnalysisSource;
use gloo_net::http::Request;

use crate::settings;

/// Full analysis URL for a configured base, e.g. `http://localhost:8000/api/analizar`
pub fn analysis_url(base_url: &str) -> String {
    format!("{}{}", settings::normalize_api_base(base_url), ANALYSIS_ENDPOINT)
}

/// Fetches the analysis payload from `{base_url}/api/analizar`.
///
/// Single attempt, no retry, browser default timeout.
pub async fn fetch_analysis(base_url: &str) -> Result<AnalysisResult, DashboardError> {
    let url = analysis_url(base_url);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        let error_msg = format!("Request failed: {}", e);
        log::error!("GET {} - {}", ANALYSIS_ENDPOINT, error_msg);
        DashboardError::Network(error_msg)
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| {
        let error_msg = format!("Failed to read response body: {}", e);
        log::error!("GET {} - {}", ANALYSIS_ENDPOINT, error_msg);
        DashboardError::Network(error_msg)
    })?;

    if !response.ok() {
        log::warn!("GET {} - Non-OK response: {}", ANALYSIS_ENDPOINT, status);
        return Err(match parse_analysis(&body) {
            Err(DashboardError::Backend(message)) => {
                log::error!("GET {} - API error: {}", ANALYSIS_ENDPOINT, message);
                DashboardError::Backend(message)
            }
            _ => {
                let error_msg = format!("HTTP error: {} {}", status, response.status_text());
                log::error!("GET {} - {}", ANALYSIS_ENDPOINT, error_msg);
                DashboardError::Backend(error_msg)
            }
        });
    }

    log::trace!("GET {} - Response received, parsing JSON", ANALYSIS_ENDPOINT);
    let result = parse_analysis(&body).inspect_err(|e| {
        log::error!("GET {} - {}", ANALYSIS_ENDPOINT, e);
    })?;

    log::info!("GET {} - Success", ANALYSIS_ENDPOINT);
    Ok(result)
}

/// Analysis source backed by the HTTP API
#[derive(Debug, Clone, PartialEq)]
pub struct HttpAnalysisClient {
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: settings::normalize_api_base(&base_url.into()),
        }
    }

    /// Client pointed at the configured API base
    pub fn from_settings() -> Self {
        Self::new(settings::get_settings().api_base)
    }
}

#[async_trait(?Send)]
impl AnalysisSource for HttpAnalysisClient {
    async fn fetch_analysis(&self) -> Result<AnalysisResult, DashboardError> {
        fetch_analysis(&self.base_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_normalizes_base_url() {
        let client = HttpAnalysisClient::new("http://10.0.0.5:8000/");
        assert_eq!(client.base_url, "http://10.0.0.5:8000");
    }

    #[test]
    fn test_analysis_url() {
        assert_eq!(
            analysis_url("http://localhost:8000/"),
            "http://localhost:8000/api/analizar"
        );
        assert_eq!(analysis_url(""), "http://localhost:8000/api/analizar");
    }
}

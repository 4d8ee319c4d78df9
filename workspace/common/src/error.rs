use thiserror::Error;

/// Error types surfaced by the dashboard pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// Transport-level failure: unreachable host, connection refused, timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Response body is not well-formed or does not match the analysis shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Backend answered, but reported a failure (HTTP status or `error` field)
    #[error("Backend error: {0}")]
    Backend(String),

    /// A metric required for display is absent from the payload
    #[error("Format error: metric `{field}` is missing")]
    Format { field: &'static str },
}

impl DashboardError {
    /// Short label for the failure category, used in the UI heading
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::Network(_) => "network",
            DashboardError::Parse(_) => "parse",
            DashboardError::Backend(_) => "backend",
            DashboardError::Format { .. } => "format",
        }
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(error: serde_json::Error) -> Self {
        DashboardError::Parse(error.to_string())
    }
}

/// Type alias for Result with DashboardError
pub type Result<T> = std::result::Result<T, DashboardError>;

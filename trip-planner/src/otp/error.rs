//! Routing client error types.
//!
//! Two failure channels are kept apart: transport/HTTP failures
//! (`Api`, `Timeout`, `Json`) and a domain-level failure the backend
//! reports inside a successful HTTP 200 response (`TripPlanningFailed`).

/// Errors from the routing client.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingError {
    /// Transport failure or non-200 HTTP status
    #[error("API error{}: {message}", fmt_status(.status))]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// The request did not complete within the configured timeout
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Response body could not be decoded
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Backend answered with HTTP 200 but reported a planning error
    #[error("trip planning failed ({id}): {message}")]
    TripPlanningFailed {
        id: i32,
        message: String,
        no_path: bool,
    },

    /// Client configuration is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" {s}")).unwrap_or_default()
}

impl RoutingError {
    /// HTTP status code, for errors that carry one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RoutingError::Api { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RoutingError::Timeout(err.to_string())
        } else if err.is_decode() {
            RoutingError::Json {
                message: err.to_string(),
                body: None,
            }
        } else {
            RoutingError::Api {
                status: err.status().map(|s| s.as_u16()),
                message: err.to_string(),
            }
        }
    }
}

//! OTP HTTP client.
//!
//! Sends plan requests to an OpenTripPlanner REST endpoint and classifies
//! the result. The client never retries; that is the caller's decision.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::domain::Itinerary;

use super::backend::RoutingBackend;
use super::convert::convert_response;
use super::error::RoutingError;
use super::request::RoutingRequest;
use super::types::RoutingResponse;

/// Router path segment some region directories leave off their base URL.
const ROUTERS_SEGMENT: &str = "routers/default";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default `User-Agent` header.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Maximum number of body characters kept in decode errors.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the OTP client.
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// Base URL of the OTP server, with or without `routers/default`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl OtpConfig {
    /// Create a new config for the given server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Append `routers/default` to a base URL that lacks it.
///
/// Some server directory entries were published without the router
/// segment, e.g. `https://host:9091/otp`. Trailing slashes are ignored.
///
/// ```
/// use trip_planner::otp::normalize_base_url;
///
/// assert_eq!(
///     normalize_base_url("https://host:9091/otp"),
///     "https://host:9091/otp/routers/default"
/// );
/// assert_eq!(
///     normalize_base_url("https://host:9091/otp/routers/default/"),
///     "https://host:9091/otp/routers/default"
/// );
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.ends_with(ROUTERS_SEGMENT) {
        trimmed.to_string()
    } else {
        format!("{trimmed}/{ROUTERS_SEGMENT}")
    }
}

/// OTP plan API client.
#[derive(Debug, Clone)]
pub struct OtpClient {
    http: reqwest::Client,
    plan_url: String,
}

impl OtpClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OtpConfig) -> Result<Self, RoutingError> {
        let base = config.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(RoutingError::InvalidConfig(format!(
                "base URL must be http(s): {:?}",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            plan_url: format!("{}/plan", normalize_base_url(base)),
        })
    }

    /// The effective plan endpoint URL.
    pub fn plan_url(&self) -> &str {
        &self.plan_url
    }

    /// Fetch and decode the raw plan response.
    ///
    /// Only transport failures and non-200 statuses are errors here; a
    /// backend `error` payload is returned as part of the response.
    pub async fn fetch_response(
        &self,
        request: &RoutingRequest,
    ) -> Result<RoutingResponse, RoutingError> {
        debug!(
            url = %self.plan_url,
            from = %request.origin,
            to = %request.destination,
            mode = %request.modes,
            "requesting plan"
        );

        let response = self
            .http
            .get(&self.plan_url)
            .query(&request.query_pairs())
            .send()
            .await?;

        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "plan request failed");

            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("unexpected status").to_string()
            } else {
                body.chars().take(BODY_EXCERPT_CHARS).collect()
            };
            return Err(RoutingError::Api {
                status: Some(status.as_u16()),
                message,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RoutingError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
        })
    }
}

impl RoutingBackend for OtpClient {
    async fn fetch_plan(&self, request: &RoutingRequest) -> Result<Vec<Itinerary>, RoutingError> {
        let response = self.fetch_response(request).await?;
        let itineraries = convert_response(response);

        match &itineraries {
            Ok(found) => debug!(count = found.len(), "plan decoded"),
            Err(e) => warn!(error = %e, "plan response carried no itineraries"),
        }

        itineraries
    }
}

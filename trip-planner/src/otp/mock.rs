//! Mock routing backend for running without an OTP server.
//!
//! Serves a canned plan response loaded from a JSON file (or string) as if
//! it were a live answer, and records what it was asked.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::Itinerary;

use super::backend::RoutingBackend;
use super::convert::convert_response;
use super::error::RoutingError;
use super::request::RoutingRequest;
use super::types::RoutingResponse;

/// Mock backend that answers every request the same way.
#[derive(Debug)]
pub struct MockRoutingBackend {
    outcome: Result<RoutingResponse, RoutingError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<RoutingRequest>>,
}

impl MockRoutingBackend {
    /// Load a canned `RoutingResponse` from a JSON file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, RoutingError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            RoutingError::InvalidConfig(format!("failed to read mock plan {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Parse a canned `RoutingResponse` from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RoutingError> {
        let response: RoutingResponse =
            serde_json::from_str(json).map_err(|e| RoutingError::Json {
                message: e.to_string(),
                body: None,
            })?;
        Ok(Self::with_outcome(Ok(response)))
    }

    /// A backend whose every request fails with `error`.
    pub fn failing(error: RoutingError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<RoutingResponse, RoutingError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of `fetch_plan` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request received.
    pub fn last_request(&self) -> Option<RoutingRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RoutingBackend for MockRoutingBackend {
    async fn fetch_plan(&self, request: &RoutingRequest) -> Result<Vec<Itinerary>, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(request.clone());

        match &self.outcome {
            Ok(response) => convert_response(response.clone()),
            Err(e) => Err(e.clone()),
        }
    }
}

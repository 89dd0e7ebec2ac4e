//! The routing backend seam.

use std::future::Future;

use crate::domain::Itinerary;

use super::error::RoutingError;
use super::request::RoutingRequest;

/// Anything that can answer a plan request.
///
/// Implemented by the HTTP client and by the mock backend, so the planning
/// session can be tested without a server.
pub trait RoutingBackend {
    /// Fetch itineraries for `request`.
    ///
    /// An empty list is a successful answer. Every failure is returned as a
    /// `RoutingError`; implementations must not retry.
    fn fetch_plan(
        &self,
        request: &RoutingRequest,
    ) -> impl Future<Output = Result<Vec<Itinerary>, RoutingError>> + Send;
}

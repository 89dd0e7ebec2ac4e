//! OpenTripPlanner routing client.
//!
//! This module turns user selections into OTP plan requests and answers
//! them, either over HTTP or from a canned mock response.
//!
//! Key characteristics of the OTP plan endpoint:
//! - Dates are `MM-dd-yyyy` and times `HH:mm`, both backend-local
//! - Response timestamps are epoch milliseconds
//! - "No route" is reported inside an HTTP 200 body, not as a status code

mod backend;
mod client;
mod convert;
mod error;
mod mock;
mod request;
mod types;

pub use backend::RoutingBackend;
pub use client::{OtpClient, OtpConfig, normalize_base_url};
pub use convert::{ConversionError, convert_itinerary, convert_response};
pub use error::RoutingError;
pub use mock::MockRoutingBackend;
pub use request::{DATE_FORMAT, RoutingRequest, TIME_FORMAT};
pub use types::{
    EncodedPolylineDto, ItineraryDto, LegDto, PlaceDto, PlannerErrorDto, RoutingResponse, StepDto,
    TripPlanDto,
};

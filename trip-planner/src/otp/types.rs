//! OTP plan endpoint response DTOs.
//!
//! These types map directly to the JSON returned by `/routers/default/plan`.
//! All timestamps are epoch milliseconds; any other representation is a
//! decode error. Fields OTP omits in some versions are `Option` or
//! `#[serde(default)]`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Top-level response from the plan endpoint.
///
/// On success exactly one of `plan` and `error` is present.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingResponse {
    /// Echo of the parameters the backend understood.
    #[serde(default)]
    pub request_parameters: Option<BTreeMap<String, serde_json::Value>>,

    pub plan: Option<TripPlanDto>,

    pub error: Option<PlannerErrorDto>,
}

/// A plan: origin, destination and candidate itineraries.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlanDto {
    /// The instant the plan was computed for.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub date: Option<DateTime<Utc>>,

    pub from: PlaceDto,

    pub to: PlaceDto,

    #[serde(default)]
    pub itineraries: Vec<ItineraryDto>,
}

/// A domain-level failure reported with HTTP 200.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerErrorDto {
    pub id: i32,

    /// Machine-readable code or message (e.g. `PATH_NOT_FOUND`).
    #[serde(default)]
    pub message: Option<String>,

    /// Human-readable message, when the backend provides one.
    #[serde(default)]
    pub msg: Option<String>,

    #[serde(default)]
    pub no_path: bool,
}

impl PlannerErrorDto {
    /// The most readable message available.
    pub fn display_message(&self) -> String {
        self.msg
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| format!("trip planning error {}", self.id))
    }
}

/// A leg endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDto {
    #[serde(default)]
    pub name: String,

    pub lon: f64,

    pub lat: f64,

    /// `NORMAL`, `TRANSIT`, `BIKESHARE`, ...
    #[serde(default)]
    pub vertex_type: Option<String>,

    #[serde(default)]
    pub stop_id: Option<String>,

    #[serde(default)]
    pub stop_code: Option<String>,
}

/// One candidate trip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDto {
    /// Seconds.
    pub duration: f64,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end_time: DateTime<Utc>,

    #[serde(default)]
    pub transfers: u32,

    #[serde(default)]
    pub walk_time: Option<i64>,

    #[serde(default)]
    pub transit_time: Option<i64>,

    #[serde(default)]
    pub waiting_time: Option<i64>,

    #[serde(default)]
    pub walk_distance: Option<f64>,

    #[serde(default)]
    pub legs: Vec<LegDto>,
}

/// One segment of an itinerary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end_time: DateTime<Utc>,

    /// `WALK`, `BUS`, `RAIL`, `BICYCLE`, `CAR`, ...
    pub mode: String,

    #[serde(default)]
    pub route: Option<String>,

    #[serde(default)]
    pub agency_name: Option<String>,

    #[serde(default)]
    pub headsign: Option<String>,

    #[serde(default)]
    pub transit_leg: bool,

    pub from: PlaceDto,

    pub to: PlaceDto,

    #[serde(default)]
    pub leg_geometry: Option<EncodedPolylineDto>,

    /// Metres.
    #[serde(default)]
    pub distance: f64,

    /// Seconds; OTP sends this as a float.
    pub duration: f64,

    #[serde(default)]
    pub steps: Option<Vec<StepDto>>,
}

/// Encoded leg geometry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedPolylineDto {
    pub points: String,

    /// Number of points encoded.
    #[serde(default)]
    pub length: Option<u32>,
}

/// A walking/driving instruction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDto {
    pub distance: f64,

    #[serde(default)]
    pub relative_direction: Option<String>,

    #[serde(default)]
    pub absolute_direction: Option<String>,

    #[serde(default)]
    pub street_name: String,

    pub lon: f64,

    pub lat: f64,
}

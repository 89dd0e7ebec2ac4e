//! Itineraries returned by the routing backend.
//!
//! These are validated domain types; the wire format lives in
//! `crate::otp::types` and is converted by `crate::otp::convert`.

use chrono::{DateTime, Utc};

use super::{Coordinate, RoutePreference};

/// An endpoint of a leg: a stop, a street vertex, or the trip origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    pub vertex_type: String,
    pub stop_id: Option<String>,
    pub stop_code: Option<String>,
}

impl Place {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

/// A turn-by-turn instruction within a walking, cycling or driving leg.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub distance_meters: f64,
    pub relative_direction: Option<String>,
    pub absolute_direction: Option<String>,
    pub street_name: String,
    pub lon: f64,
    pub lat: f64,
}

/// One uninterrupted segment of an itinerary.
///
/// `end_time >= start_time` and `duration_seconds` match the backend's
/// figures; neither is re-derived locally.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub mode: String,
    pub route: Option<String>,
    pub agency_name: Option<String>,
    pub headsign: Option<String>,
    pub transit_leg: bool,
    pub from: Place,
    pub to: Place,
    /// Encoded polyline of the leg's path.
    pub geometry_points: String,
    pub distance_meters: f64,
    pub duration_seconds: i64,
    pub steps: Option<Vec<Step>>,
}

impl Leg {
    pub fn is_walk(&self) -> bool {
        self.mode == "WALK"
    }
}

/// One complete proposed trip. `legs` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub duration_seconds: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub transfers: u32,
    pub legs: Vec<Leg>,
}

impl Itinerary {
    pub fn departure(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn arrival(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Total metres covered on foot.
    pub fn walk_distance_meters(&self) -> f64 {
        self.legs
            .iter()
            .filter(|leg| leg.is_walk())
            .map(|leg| leg.distance_meters)
            .sum()
    }

    pub fn transit_leg_count(&self) -> usize {
        self.legs.iter().filter(|leg| leg.transit_leg).count()
    }

    /// Short human-readable summary, e.g. `"WALK > BUS 8 > WALK"`.
    pub fn summary(&self) -> String {
        self.legs
            .iter()
            .map(|leg| match &leg.route {
                Some(route) if !route.is_empty() => format!("{} {}", leg.mode, route),
                _ => leg.mode.clone(),
            })
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

/// Order itineraries best-first for the user's route preference.
///
/// - `Fastest`: shorter duration, then fewer transfers
/// - `FewestTransfers`: fewer transfers, then shorter duration
///
/// The sort is stable, so ties keep the backend's order.
pub fn sort_by_preference(
    mut itineraries: Vec<Itinerary>,
    preference: RoutePreference,
) -> Vec<Itinerary> {
    match preference {
        RoutePreference::Fastest => itineraries.sort_by(|a, b| {
            a.duration_seconds
                .cmp(&b.duration_seconds)
                .then(a.transfers.cmp(&b.transfers))
        }),
        RoutePreference::FewestTransfers => itineraries.sort_by(|a, b| {
            a.transfers
                .cmp(&b.transfers)
                .then(a.duration_seconds.cmp(&b.duration_seconds))
        }),
    }
    itineraries
}

//! Routing request construction.
//!
//! Turns the user's selections into the flat parameter set OTP's plan
//! endpoint expects. Everything here is pure; the clock is passed in.

use chrono::NaiveDateTime;

use crate::domain::{
    Coordinate, DomainError, Location, TimePreference, TransportMode, TripPreferences,
};

/// Date format expected by OTP (`MM-dd-yyyy`).
pub const DATE_FORMAT: &str = "%m-%d-%Y";

/// Time format expected by OTP (24h, backend-local).
pub const TIME_FORMAT: &str = "%H:%M";

/// The normalized parameter set sent to the routing backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    /// `MM-dd-yyyy`
    pub date: String,
    /// `HH:mm`
    pub time: String,
    /// Comma-joined OTP mode tokens
    pub modes: String,
    pub arrive_by: bool,
    pub max_walk_distance: u32,
    pub wheelchair: bool,
}

impl RoutingRequest {
    /// Build a request from the user's selections.
    ///
    /// `now` is only consulted for [`TimePreference::LeaveNow`].
    ///
    /// Fails if origin and destination are the same location (by id).
    pub fn build(
        origin: &Location,
        destination: &Location,
        mode: TransportMode,
        prefs: &TripPreferences,
        now: NaiveDateTime,
    ) -> Result<Self, DomainError> {
        if origin.id == destination.id {
            return Err(DomainError::InvalidRequest(
                "origin and destination are the same location",
            ));
        }

        let (date, time) = match prefs.time_preference {
            TimePreference::LeaveNow => (now.date(), now.time()),
            TimePreference::DepartAt { date, time } | TimePreference::ArriveBy { date, time } => {
                (date, time)
            }
        };

        Ok(Self {
            origin: origin.coordinate(),
            destination: destination.coordinate(),
            date: date.format(DATE_FORMAT).to_string(),
            time: time.format(TIME_FORMAT).to_string(),
            modes: mode.query_value(),
            arrive_by: prefs.time_preference.is_arrive_by(),
            max_walk_distance: prefs.max_walking_distance_meters,
            wheelchair: prefs.wheelchair_accessible,
        })
    }

    /// Query parameters for the plan endpoint, one per field.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("fromPlace", self.origin.to_string()),
            ("toPlace", self.destination.to_string()),
            ("time", self.time.clone()),
            ("date", self.date.clone()),
            ("mode", self.modes.clone()),
            ("arriveBy", bool_str(self.arrive_by).to_string()),
            ("maxWalkDistance", self.max_walk_distance.to_string()),
            ("wheelchair", bool_str(self.wheelchair).to_string()),
        ]
    }
}

const fn bool_str(val: bool) -> &'static str {
    if val { "true" } else { "false" }
}

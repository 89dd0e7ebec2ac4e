//! Trip preferences chosen by the user.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One mile, the default walking limit.
pub const DEFAULT_MAX_WALK_METERS: u32 = 1609;

/// How results should be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoutePreference {
    #[default]
    Fastest,
    FewestTransfers,
}

/// When the trip should happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum TimePreference {
    /// Depart at the moment the request is built.
    #[default]
    LeaveNow,
    /// Depart at the given backend-local date and time.
    DepartAt { date: NaiveDate, time: NaiveTime },
    /// Arrive no later than the given backend-local date and time.
    ArriveBy { date: NaiveDate, time: NaiveTime },
}

impl TimePreference {
    pub fn is_arrive_by(&self) -> bool {
        matches!(self, TimePreference::ArriveBy { .. })
    }
}

/// Options that shape the routing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPreferences {
    pub wheelchair_accessible: bool,
    pub max_walking_distance_meters: u32,
    pub route_preference: RoutePreference,
    pub time_preference: TimePreference,
}

impl TripPreferences {
    pub fn with_wheelchair(mut self, accessible: bool) -> Self {
        self.wheelchair_accessible = accessible;
        self
    }

    pub fn with_max_walk(mut self, meters: u32) -> Self {
        self.max_walking_distance_meters = meters;
        self
    }

    pub fn with_route_preference(mut self, preference: RoutePreference) -> Self {
        self.route_preference = preference;
        self
    }

    pub fn with_time(mut self, preference: TimePreference) -> Self {
        self.time_preference = preference;
        self
    }
}

impl Default for TripPreferences {
    fn default() -> Self {
        Self {
            wheelchair_accessible: false,
            max_walking_distance_meters: DEFAULT_MAX_WALK_METERS,
            route_preference: RoutePreference::Fastest,
            time_preference: TimePreference::LeaveNow,
        }
    }
}

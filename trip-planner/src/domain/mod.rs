//! Domain types for the trip planner.
//!
//! Value types shared by the request builder, the routing client and the
//! planning session. Nothing here performs IO.

mod coordinate;
mod error;
mod itinerary;
mod mode;
mod preferences;

pub use coordinate::{Coordinate, Location, SAME_PLACE_TOLERANCE_DEG};
pub use error::DomainError;
pub use itinerary::{Itinerary, Leg, Place, Step, sort_by_preference};
pub use mode::TransportMode;
pub use preferences::{DEFAULT_MAX_WALK_METERS, RoutePreference, TimePreference, TripPreferences};

#[cfg(test)]
pub(crate) use itinerary::fixtures;

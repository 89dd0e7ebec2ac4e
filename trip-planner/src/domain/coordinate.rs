//! Coordinates and user-facing locations.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum per-axis difference (in degrees) for two locations to be
/// considered the same place.
pub const SAME_PLACE_TOLERANCE_DEG: f64 = 0.0001;

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both axes are within `tolerance` degrees of `other`.
    pub fn is_near(&self, other: &Coordinate, tolerance: f64) -> bool {
        (self.latitude - other.latitude).abs() <= tolerance
            && (self.longitude - other.longitude).abs() <= tolerance
    }

    /// Parse a `"lat,lon"` pair, as typed on the command line.
    ///
    /// ```
    /// use trip_planner::domain::Coordinate;
    ///
    /// let c = Coordinate::parse("47.6097,-122.3331").unwrap();
    /// assert_eq!(c.latitude, 47.6097);
    /// assert!(Coordinate::parse("47.6").is_none());
    /// assert!(Coordinate::parse("91.0,0.0").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let (lat, lon) = s.split_once(',')?;
        let latitude: f64 = lat.trim().parse().ok()?;
        let longitude: f64 = lon.trim().parse().ok()?;

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }

        Some(Self::new(latitude, longitude))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A named place the user can pick as origin or destination.
///
/// Identity is `id`. Two distinct locations describing the same place
/// (e.g. a recent and a fresh search result) are detected with
/// [`Location::is_same_place`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Create a location with a fresh random id.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            subtitle: subtitle.into(),
            latitude,
            longitude,
        }
    }

    /// A location for a bare coordinate that could not be named,
    /// e.g. a map tap that reverse geocoding could not resolve.
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Self::new(
            "Dropped Pin",
            format!("{:.5}, {:.5}", coordinate.latitude, coordinate.longitude),
            coordinate.latitude,
            coordinate.longitude,
        )
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Same title and coordinates within [`SAME_PLACE_TOLERANCE_DEG`] on both axes.
    pub fn is_same_place(&self, other: &Location) -> bool {
        self.title == other.title
            && self
                .coordinate()
                .is_near(&other.coordinate(), SAME_PLACE_TOLERANCE_DEG)
    }
}

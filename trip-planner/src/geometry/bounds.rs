//! Bounding boxes for map previews.

use crate::domain::Coordinate;

/// Axis-aligned latitude/longitude box.
///
/// Does not handle paths crossing the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// A zero-size box around a single point.
    pub fn around(point: Coordinate) -> Self {
        Self {
            min_lat: point.latitude,
            min_lon: point.longitude,
            max_lat: point.latitude,
            max_lon: point.longitude,
        }
    }

    /// The smallest box containing every coordinate, or `None` if there are none.
    pub fn from_coordinates<'a>(coords: impl IntoIterator<Item = &'a Coordinate>) -> Option<Self> {
        let mut iter = coords.into_iter();
        let mut bounds = Self::around(*iter.next()?);
        for coord in iter {
            bounds.extend(*coord);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: Coordinate) {
        self.min_lat = self.min_lat.min(point.latitude);
        self.min_lon = self.min_lon.min(point.longitude);
        self.max_lat = self.max_lat.max(point.latitude);
        self.max_lon = self.max_lon.max(point.longitude);
    }

    pub fn union(mut self, other: Bounds) -> Self {
        self.extend(Coordinate::new(other.min_lat, other.min_lon));
        self.extend(Coordinate::new(other.max_lat, other.max_lon));
        self
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lon..=self.max_lon).contains(&point.longitude)
    }
}

//! Route geometry.
//!
//! Leg shapes arrive from the backend as encoded polylines. This module
//! converts them to and from coordinate sequences and computes the map
//! bounds of a path.

mod bounds;
mod error;
mod polyline;

pub use bounds::Bounds;
pub use error::GeometryError;
pub use polyline::{PolylineDecoder, decode, encode};

//! Location resolution capability.

use std::future::Future;

use crate::domain::{Coordinate, Location};

/// Turns device position and map coordinates into named locations.
///
/// Both operations fail silently: `None` means "could not resolve", and
/// callers fall back to something sensible (e.g. a dropped pin).
pub trait LocationResolver {
    /// Name the place at `coordinate`.
    fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Option<Location>> + Send;

    /// The device's current location, if known and permitted.
    fn current_location(&self) -> impl Future<Output = Option<Location>> + Send;
}

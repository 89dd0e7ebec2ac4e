//! Observable session state.
//!
//! Every transition of the planning session produces a new immutable
//! [`SessionState`] snapshot. The presentation layer only ever sees these.

use crate::domain::{Coordinate, Itinerary, Location, TransportMode, TripPreferences};
use crate::geometry::{Bounds, GeometryError};
use crate::otp::RoutingError;

/// Discrete state of the planning session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Origin and destination not both chosen.
    Idle,
    /// A location-choosing sheet is open.
    SelectingLocations,
    /// Both locations chosen, nothing in flight.
    Ready,
    /// Exactly one plan request in flight.
    Planning,
    /// Itineraries received (possibly none).
    Results,
    /// One itinerary is shown on the map.
    Previewing,
    /// The last operation failed; see `last_error`.
    Error,
}

/// Which end of the trip a location sheet edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationSlot {
    Origin,
    Destination,
}

/// Sheets the presentation layer may show. Carries no view knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    /// Search for a location to fill `slot`.
    LocationPicker(LocationSlot),
    /// Pick `slot` from saved favourites.
    Favorites(LocationSlot),
    /// Pick `slot` from recent locations.
    Recents(LocationSlot),
    /// Wheelchair, walking distance, route and time preferences.
    AdvancedOptions,
    /// The list of itineraries.
    TripResults,
    /// Step-by-step directions for the selected itinerary.
    Directions,
}

impl SheetKind {
    /// True for sheets whose purpose is choosing a location.
    pub fn is_location_picker(&self) -> bool {
        matches!(
            self,
            SheetKind::LocationPicker(_) | SheetKind::Favorites(_) | SheetKind::Recents(_)
        )
    }
}

/// What went wrong, for presentation-layer branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// `plan_trip` was called without both locations.
    MissingOriginOrDestination,
    /// Origin and destination are the same location.
    InvalidRequest,
    /// Transport failure or non-200 status. `timed_out` marks transport timeouts.
    Api {
        status_code: Option<u16>,
        timed_out: bool,
    },
    /// The backend answered with a body that could not be decoded.
    InvalidResponse,
    /// The backend answered HTTP 200 with a planning error.
    TripPlanningFailed { id: i32 },
    /// A leg geometry could not be decoded for preview.
    GeometryDecode,
}

/// A failure as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub display_message: String,
    pub is_retryable: bool,
}

impl ErrorInfo {
    pub fn missing_origin_or_destination() -> Self {
        Self {
            kind: ErrorKind::MissingOriginOrDestination,
            display_message: "Choose both a starting point and a destination.".to_string(),
            is_retryable: false,
        }
    }

    pub fn invalid_request() -> Self {
        Self {
            kind: ErrorKind::InvalidRequest,
            display_message: "Origin and destination must be different places.".to_string(),
            is_retryable: false,
        }
    }

    pub fn geometry(error: &GeometryError) -> Self {
        Self {
            kind: ErrorKind::GeometryDecode,
            display_message: format!("The route shape could not be displayed ({error})."),
            is_retryable: false,
        }
    }
}

impl From<&RoutingError> for ErrorInfo {
    fn from(error: &RoutingError) -> Self {
        match error {
            RoutingError::Api {
                status: Some(status),
                ..
            } => Self {
                kind: ErrorKind::Api {
                    status_code: Some(*status),
                    timed_out: false,
                },
                display_message: format!(
                    "The trip planning server returned an error (HTTP {status})."
                ),
                is_retryable: true,
            },
            RoutingError::Api {
                status: None,
                message,
            } => Self {
                kind: ErrorKind::Api {
                    status_code: None,
                    timed_out: false,
                },
                display_message: format!("Could not reach the trip planning server: {message}"),
                is_retryable: true,
            },
            RoutingError::Timeout(_) => Self {
                kind: ErrorKind::Api {
                    status_code: None,
                    timed_out: true,
                },
                display_message: "The trip planning server took too long to respond.".to_string(),
                is_retryable: true,
            },
            RoutingError::Json { .. } => Self {
                kind: ErrorKind::InvalidResponse,
                display_message: "The trip planning server sent a response that could not be read."
                    .to_string(),
                is_retryable: false,
            },
            RoutingError::TripPlanningFailed { id, message, .. } => Self {
                kind: ErrorKind::TripPlanningFailed { id: *id },
                display_message: format!("Unable to plan this trip: {message}"),
                is_retryable: true,
            },
            RoutingError::InvalidConfig(message) => Self {
                kind: ErrorKind::Api {
                    status_code: None,
                    timed_out: false,
                },
                display_message: format!("The trip planner is misconfigured: {message}"),
                is_retryable: false,
            },
        }
    }
}

/// Decoded shapes of a previewed itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewGeometry {
    /// One decoded path per leg, in leg order.
    pub legs: Vec<Vec<Coordinate>>,
    /// Box around every leg path and endpoint.
    pub bounds: Bounds,
}

/// Snapshot of the planning session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub origin: Option<Location>,
    pub destination: Option<Location>,
    pub mode: TransportMode,
    pub preferences: TripPreferences,
    pub phase: Phase,
    /// Best first, per `preferences.route_preference`.
    pub itineraries: Vec<Itinerary>,
    pub preview_itinerary: Option<Itinerary>,
    /// Set together with `preview_itinerary`.
    pub preview_geometry: Option<PreviewGeometry>,
    /// The itinerary the user chose to follow.
    pub selected_itinerary: Option<Itinerary>,
    pub active_sheet: Option<SheetKind>,
    pub last_error: Option<ErrorInfo>,
}

impl SessionState {
    pub fn new(mode: TransportMode, preferences: TripPreferences) -> Self {
        Self {
            origin: None,
            destination: None,
            mode,
            preferences,
            phase: Phase::Idle,
            itineraries: Vec::new(),
            preview_itinerary: None,
            preview_geometry: None,
            selected_itinerary: None,
            active_sheet: None,
            last_error: None,
        }
    }

    /// Both locations chosen and no request in flight.
    pub fn can_plan_trip(&self) -> bool {
        self.origin.is_some() && self.destination.is_some() && self.phase != Phase::Planning
    }

    pub fn location(&self, slot: LocationSlot) -> Option<&Location> {
        match slot {
            LocationSlot::Origin => self.origin.as_ref(),
            LocationSlot::Destination => self.destination.as_ref(),
        }
    }

    pub(crate) fn location_mut(&mut self, slot: LocationSlot) -> &mut Option<Location> {
        match slot {
            LocationSlot::Origin => &mut self.origin,
            LocationSlot::Destination => &mut self.destination,
        }
    }

    /// The phase to settle in when nothing is in flight and no results are shown.
    pub(crate) fn resting_phase(&self) -> Phase {
        if self.active_sheet.is_some_and(|s| s.is_location_picker()) {
            Phase::SelectingLocations
        } else if self.origin.is_some() && self.destination.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    pub(crate) fn clear_preview(&mut self) {
        self.preview_itinerary = None;
        self.preview_geometry = None;
        self.selected_itinerary = None;
    }

    /// Drop results that no longer match the session's inputs.
    pub(crate) fn clear_results(&mut self) {
        self.itineraries.clear();
        self.clear_preview();
        self.last_error = None;
        if self.active_sheet == Some(SheetKind::TripResults)
            || self.active_sheet == Some(SheetKind::Directions)
        {
            self.active_sheet = None;
        }
    }
}

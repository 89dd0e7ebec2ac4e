//! Conversion from OTP DTOs to domain types.
//!
//! The wire format is lenient (optional fields, float durations); the domain
//! types are not. Anything that cannot be represented is a `ConversionError`,
//! which the client reports as a decode failure.

use crate::domain::{Itinerary, Leg, Place, Step};

use super::error::RoutingError;
use super::types::{ItineraryDto, LegDto, PlaceDto, RoutingResponse, StepDto};

/// Errors converting a decoded response into domain types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Itinerary has no legs
    #[error("itinerary {0} has no legs")]
    EmptyItinerary(usize),

    /// A duration was negative or not a finite number
    #[error("invalid duration in {0}")]
    InvalidDuration(&'static str),
}

/// Resolve a decoded response to its itineraries.
///
/// A backend `error` payload wins over any plan it was sent with, and a
/// response carrying neither is malformed.
pub fn convert_response(response: RoutingResponse) -> Result<Vec<Itinerary>, RoutingError> {
    if let Some(error) = response.error {
        return Err(RoutingError::TripPlanningFailed {
            id: error.id,
            message: error.display_message(),
            no_path: error.no_path,
        });
    }

    let plan = response.plan.ok_or_else(|| RoutingError::Json {
        message: "response has neither plan nor error".to_string(),
        body: None,
    })?;

    plan.itineraries
        .into_iter()
        .enumerate()
        .map(|(idx, dto)| convert_itinerary(idx, dto))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| RoutingError::Json {
            message: e.to_string(),
            body: None,
        })
}

/// Convert one itinerary. `idx` is only used for error reporting.
pub fn convert_itinerary(idx: usize, dto: ItineraryDto) -> Result<Itinerary, ConversionError> {
    if dto.legs.is_empty() {
        return Err(ConversionError::EmptyItinerary(idx));
    }

    let legs = dto
        .legs
        .into_iter()
        .map(convert_leg)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Itinerary {
        duration_seconds: whole_seconds(dto.duration, "itinerary")?,
        start_time: dto.start_time,
        end_time: dto.end_time,
        transfers: dto.transfers,
        legs,
    })
}

fn convert_leg(dto: LegDto) -> Result<Leg, ConversionError> {
    Ok(Leg {
        start_time: dto.start_time,
        end_time: dto.end_time,
        duration_seconds: whole_seconds(dto.duration, "leg")?,
        mode: dto.mode,
        route: dto.route.filter(|r| !r.is_empty()),
        agency_name: dto.agency_name,
        headsign: dto.headsign,
        transit_leg: dto.transit_leg,
        from: convert_place(dto.from),
        to: convert_place(dto.to),
        geometry_points: dto.leg_geometry.map(|g| g.points).unwrap_or_default(),
        distance_meters: dto.distance,
        steps: dto
            .steps
            .map(|steps| steps.into_iter().map(convert_step).collect()),
    })
}

fn convert_place(dto: PlaceDto) -> Place {
    Place {
        name: dto.name,
        lon: dto.lon,
        lat: dto.lat,
        vertex_type: dto.vertex_type.unwrap_or_else(|| "NORMAL".to_string()),
        stop_id: dto.stop_id,
        stop_code: dto.stop_code,
    }
}

fn convert_step(dto: StepDto) -> Step {
    Step {
        distance_meters: dto.distance,
        relative_direction: dto.relative_direction,
        absolute_direction: dto.absolute_direction,
        street_name: dto.street_name,
        lon: dto.lon,
        lat: dto.lat,
    }
}

fn whole_seconds(value: f64, what: &'static str) -> Result<i64, ConversionError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConversionError::InvalidDuration(what));
    }
    Ok(value.round() as i64)
}

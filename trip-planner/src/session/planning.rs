//! The trip-planning session state machine.
//!
//! A session is mutated only through its own methods. Each mutation runs
//! under a short-lived lock and, if it changed anything, publishes exactly
//! one new snapshot, so observers never see an intermediate state.
//!
//! Only `plan_trip` suspends. Its request is built from a snapshot taken
//! when planning starts and tagged with a sequence number; the answer is
//! applied only if the session is still planning that same request from the
//! same inputs. Dropping a `plan_trip` future mid-flight abandons its request
//! and leaves `Planning`.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::{
    Coordinate, Itinerary, Location, RoutePreference, TransportMode, TripPreferences,
    sort_by_preference,
};
use crate::geometry::{self, Bounds, GeometryError};
use crate::locations::{LocationResolver, LocationStore, StoreError};
use crate::otp::{RoutingBackend, RoutingError, RoutingRequest};

use super::config::{Clock, SessionConfig};
use super::state::{ErrorInfo, LocationSlot, Phase, PreviewGeometry, SessionState, SheetKind};

/// Errors from itinerary selection and preview.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// The itinerary is not among the current results
    #[error("itinerary is not part of the current results")]
    UnknownItinerary,

    /// Results are being replaced by a request in flight
    #[error("a trip is being planned")]
    PlanningInProgress,

    /// A leg geometry could not be decoded
    #[error("could not decode itinerary geometry: {0}")]
    Geometry(#[from] GeometryError),
}

/// What a call to [`TripPlanningSession::plan_trip`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Results applied; the session is in `Results`.
    Completed { itineraries: usize },
    /// The session moved to `Error` with this info.
    Failed(ErrorInfo),
    /// A request was already in flight; nothing was sent.
    Ignored,
    /// The answer arrived after the session moved on and was dropped.
    Discarded,
}

struct Inner {
    state: SessionState,
    /// Tag of the most recently issued request.
    request_seq: u64,
}

/// The selections a request was built from.
///
/// Route preference is left out: results are ordered locally, so changing it
/// does not make an answer stale.
#[derive(Debug, PartialEq)]
struct PlanInputs {
    origin: Option<Location>,
    destination: Option<Location>,
    mode: TransportMode,
    preferences: TripPreferences,
}

impl PlanInputs {
    fn of(state: &SessionState) -> Self {
        Self {
            origin: state.origin.clone(),
            destination: state.destination.clone(),
            mode: state.mode,
            preferences: TripPreferences {
                route_preference: RoutePreference::default(),
                ..state.preferences
            },
        }
    }
}

/// Result of trying to start a request, decided under the lock.
enum Start {
    Sent {
        seq: u64,
        inputs: PlanInputs,
        request: RoutingRequest,
    },
    Ignored,
    Failed(ErrorInfo),
}

/// Trip-planning session for one planning surface.
pub struct TripPlanningSession<B> {
    backend: B,
    inner: Mutex<Inner>,
    updates: watch::Sender<SessionState>,
    store: Option<Arc<dyn LocationStore>>,
    clock: Clock,
}

impl<B> TripPlanningSession<B> {
    /// Run `f` under the lock and publish the new state if it changed.
    fn mutate<T>(&self, f: impl FnOnce(&mut Inner) -> T) -> T {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let before = inner.state.clone();
        let out = f(&mut inner);

        if inner.state != before {
            if inner.state.phase != before.phase {
                debug!(from = ?before.phase, to = ?inner.state.phase, "session phase changed");
            }
            self.updates.send_replace(inner.state.clone());
        }
        out
    }
}

impl<B: RoutingBackend> TripPlanningSession<B> {
    pub fn new(backend: B, config: SessionConfig) -> Self {
        let state = SessionState::new(config.default_mode, config.default_preferences);
        let (updates, _) = watch::channel(state.clone());

        Self {
            backend,
            inner: Mutex::new(Inner {
                state,
                request_seq: 0,
            }),
            updates,
            store: None,
            clock: config.clock,
        }
    }

    /// Read quick-pick favourites and recents from `store`.
    pub fn with_store(mut self, store: Arc<dyn LocationStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The current state.
    pub fn snapshot(&self) -> SessionState {
        self.updates.borrow().clone()
    }

    /// A receiver that sees every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.updates.subscribe()
    }

    pub fn set_origin(&self, location: Location) {
        self.set_location(LocationSlot::Origin, Some(location));
    }

    pub fn set_destination(&self, location: Location) {
        self.set_location(LocationSlot::Destination, Some(location));
    }

    pub fn clear_origin(&self) {
        self.set_location(LocationSlot::Origin, None);
    }

    pub fn clear_destination(&self) {
        self.set_location(LocationSlot::Destination, None);
    }

    /// Set or clear one end of the trip.
    ///
    /// Choosing a location closes any open location sheet. Outside of
    /// `Planning`, existing results no longer match and are dropped.
    pub fn set_location(&self, slot: LocationSlot, location: Option<Location>) {
        self.mutate(|inner| {
            let state = &mut inner.state;
            let confirmed = location.is_some();
            *state.location_mut(slot) = location;

            if confirmed && state.active_sheet.is_some_and(|s| s.is_location_picker()) {
                state.active_sheet = None;
            }
            if state.phase != Phase::Planning {
                state.clear_results();
                state.phase = state.resting_phase();
            }
        });
    }

    /// Exchange origin and destination.
    pub fn swap_locations(&self) {
        self.mutate(|inner| {
            let state = &mut inner.state;
            if state.origin.is_none() && state.destination.is_none() {
                return;
            }
            std::mem::swap(&mut state.origin, &mut state.destination);
            if state.phase != Phase::Planning {
                state.clear_results();
                state.phase = state.resting_phase();
            }
        });
    }

    /// Name the place at `coordinate` (e.g. a map tap) and use it for `slot`.
    ///
    /// Falls back to a dropped pin when the resolver cannot name it.
    pub async fn set_location_from_coordinate<R: LocationResolver>(
        &self,
        resolver: &R,
        slot: LocationSlot,
        coordinate: Coordinate,
    ) -> Location {
        let location = resolver
            .reverse_geocode(coordinate)
            .await
            .unwrap_or_else(|| Location::from_coordinate(coordinate));
        self.set_location(slot, Some(location.clone()));
        location
    }

    /// Use the device's current location for `slot`.
    ///
    /// Returns `None`, leaving the session untouched, if it is unavailable.
    pub async fn use_current_location<R: LocationResolver>(
        &self,
        resolver: &R,
        slot: LocationSlot,
    ) -> Option<Location> {
        let location = resolver.current_location().await?;
        self.set_location(slot, Some(location.clone()));
        Some(location)
    }

    pub fn select_transport_mode(&self, mode: TransportMode) {
        self.mutate(|inner| {
            let state = &mut inner.state;
            if state.mode == mode {
                return;
            }
            state.mode = mode;
            invalidate_results(state);
        });
    }

    /// Replace the trip preferences.
    ///
    /// A change to the route preference alone re-orders the current results;
    /// any other change makes them stale.
    pub fn set_preferences(&self, preferences: TripPreferences) {
        self.mutate(|inner| {
            let state = &mut inner.state;
            if state.preferences == preferences {
                return;
            }

            let only_ordering = TripPreferences {
                route_preference: state.preferences.route_preference,
                ..preferences
            } == state.preferences;
            state.preferences = preferences;

            if only_ordering {
                let itineraries = std::mem::take(&mut state.itineraries);
                state.itineraries = sort_by_preference(itineraries, preferences.route_preference);
            } else {
                invalidate_results(state);
            }
        });
    }

    /// Plan a trip for the current selections.
    ///
    /// At most one request is in flight: a call while `Planning` returns
    /// [`PlanOutcome::Ignored`] without contacting the backend. Failures are
    /// never returned as errors; they move the session to `Error`.
    ///
    /// If the selections change while the request is in flight, its answer
    /// is discarded once it arrives. Dropping the returned future abandons
    /// the request and the session settles back out of `Planning`.
    pub async fn plan_trip(&self) -> PlanOutcome {
        let (seq, inputs, request) = match self.mutate(|inner| self.start_request(inner)) {
            Start::Sent {
                seq,
                inputs,
                request,
            } => (seq, inputs, request),
            Start::Ignored => {
                debug!("plan_trip ignored: request already in flight");
                return PlanOutcome::Ignored;
            }
            Start::Failed(info) => return PlanOutcome::Failed(info),
        };

        let in_flight = InFlight {
            session: self,
            seq,
        };
        let result = self.backend.fetch_plan(&request).await;
        std::mem::forget(in_flight);

        self.mutate(|inner| finish_request(inner, seq, &inputs, result))
    }

    fn start_request(&self, inner: &mut Inner) -> Start {
        let state = &mut inner.state;

        if state.phase == Phase::Planning {
            return Start::Ignored;
        }

        let (Some(origin), Some(destination)) = (&state.origin, &state.destination) else {
            let info = ErrorInfo::missing_origin_or_destination();
            enter_error(state, info.clone());
            return Start::Failed(info);
        };

        let request = match RoutingRequest::build(
            origin,
            destination,
            state.mode,
            &state.preferences,
            self.clock.now(),
        ) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "refusing to plan");
                let info = ErrorInfo::invalid_request();
                enter_error(state, info.clone());
                return Start::Failed(info);
            }
        };

        let inputs = PlanInputs::of(state);
        inner.request_seq += 1;
        state.itineraries.clear();
        state.clear_preview();
        state.last_error = None;
        state.phase = Phase::Planning;

        Start::Sent {
            seq: inner.request_seq,
            inputs,
            request,
        }
    }

    /// Show `itinerary` on the map.
    ///
    /// Decodes every leg's geometry; the preview, its geometry and the phase
    /// change are published together. A previous preview is replaced.
    pub fn preview_itinerary(&self, itinerary: &Itinerary) -> Result<(), SessionError> {
        self.show_itinerary(itinerary, false)
    }

    /// Choose `itinerary` to follow: previews it and opens directions.
    pub fn select_itinerary(&self, itinerary: &Itinerary) -> Result<(), SessionError> {
        self.show_itinerary(itinerary, true)
    }

    fn show_itinerary(&self, itinerary: &Itinerary, select: bool) -> Result<(), SessionError> {
        self.mutate(|inner| {
            let state = &mut inner.state;

            if state.phase == Phase::Planning {
                return Err(SessionError::PlanningInProgress);
            }
            if !state.itineraries.contains(itinerary) {
                return Err(SessionError::UnknownItinerary);
            }

            let geometry = match preview_geometry(itinerary) {
                Ok(geometry) => geometry,
                Err(e) => {
                    warn!(error = %e, "itinerary geometry could not be decoded");
                    state.last_error = Some(ErrorInfo::geometry(&e));
                    return Err(e.into());
                }
            };

            state.preview_itinerary = Some(itinerary.clone());
            state.preview_geometry = Some(geometry);
            state.last_error = None;
            state.phase = Phase::Previewing;
            if select {
                state.selected_itinerary = Some(itinerary.clone());
                state.active_sheet = Some(SheetKind::Directions);
            }
            Ok(())
        })
    }

    /// Stop previewing. A no-op when nothing is previewed.
    pub fn clear_preview(&self) {
        self.mutate(|inner| {
            let state = &mut inner.state;
            if state.phase != Phase::Previewing {
                return;
            }
            leave_preview(state);
        });
    }

    /// Forget the trip: back to `Idle` with no locations or results.
    ///
    /// Mode and preferences are kept. A request in flight is not cancelled,
    /// but its answer will be discarded.
    pub fn reset_session(&self) {
        self.mutate(|inner| {
            inner.request_seq += 1;
            let (mode, preferences) = (inner.state.mode, inner.state.preferences);
            inner.state = SessionState::new(mode, preferences);
        });
    }

    pub fn present_sheet(&self, sheet: SheetKind) {
        self.mutate(|inner| {
            let state = &mut inner.state;
            state.active_sheet = Some(sheet);
            if sheet.is_location_picker() && matches!(state.phase, Phase::Idle | Phase::Ready) {
                state.phase = Phase::SelectingLocations;
            }
        });
    }

    /// Close the active sheet. Dismissing while previewing ends the preview.
    pub fn dismiss_sheet(&self) {
        self.mutate(|inner| {
            let state = &mut inner.state;
            if state.active_sheet.take().is_none() {
                return;
            }
            match state.phase {
                Phase::SelectingLocations => state.phase = state.resting_phase(),
                Phase::Previewing => leave_preview(state),
                _ => {}
            }
        });
    }

    /// Acknowledge the current error.
    pub fn dismiss_error(&self) {
        self.mutate(|inner| {
            let state = &mut inner.state;
            if state.phase != Phase::Error {
                return;
            }
            state.last_error = None;
            state.phase = state.resting_phase();
        });
    }

    /// Saved favourites for quick selection. Empty without a store.
    pub fn favorites(&self) -> Result<Vec<Location>, StoreError> {
        match &self.store {
            Some(store) => store.get_favorites(),
            None => Ok(Vec::new()),
        }
    }

    /// Recent locations for quick selection, most recent first.
    pub fn recents(&self) -> Result<Vec<Location>, StoreError> {
        match &self.store {
            Some(store) => store.get_recents(),
            None => Ok(Vec::new()),
        }
    }
}

/// Armed while a request is in flight; dropping it abandons the request.
struct InFlight<'a, B> {
    session: &'a TripPlanningSession<B>,
    seq: u64,
}

impl<B> Drop for InFlight<'_, B> {
    fn drop(&mut self) {
        let seq = self.seq;
        self.session.mutate(|inner| {
            if seq != inner.request_seq || inner.state.phase != Phase::Planning {
                return;
            }
            warn!(seq, "plan request abandoned before completion");
            inner.request_seq += 1;
            inner.state.phase = inner.state.resting_phase();
        });
    }
}

fn finish_request(
    inner: &mut Inner,
    seq: u64,
    inputs: &PlanInputs,
    result: Result<Vec<Itinerary>, RoutingError>,
) -> PlanOutcome {
    let state = &mut inner.state;

    if seq != inner.request_seq || state.phase != Phase::Planning {
        warn!(seq, current = inner.request_seq, "discarding stale plan result");
        return PlanOutcome::Discarded;
    }

    if PlanInputs::of(state) != *inputs {
        debug!(seq, "selections changed while planning, discarding result");
        state.phase = state.resting_phase();
        return PlanOutcome::Discarded;
    }

    match result {
        Ok(itineraries) => {
            let count = itineraries.len();
            info!(count, "trip planned");
            state.itineraries = sort_by_preference(itineraries, state.preferences.route_preference);
            state.phase = Phase::Results;
            state.active_sheet = Some(SheetKind::TripResults);
            PlanOutcome::Completed { itineraries: count }
        }
        Err(e) => {
            warn!(error = %e, "trip planning failed");
            let info = ErrorInfo::from(&e);
            enter_error(state, info.clone());
            PlanOutcome::Failed(info)
        }
    }
}

fn enter_error(state: &mut SessionState, info: ErrorInfo) {
    state.last_error = Some(info);
    state.phase = Phase::Error;
}

/// Inputs changed: results no longer apply. In-flight requests keep going.
fn invalidate_results(state: &mut SessionState) {
    if matches!(state.phase, Phase::Results | Phase::Previewing | Phase::Error) {
        state.clear_results();
        state.phase = state.resting_phase();
    }
}

fn leave_preview(state: &mut SessionState) {
    state.clear_preview();
    if state.active_sheet == Some(SheetKind::Directions) {
        state.active_sheet = Some(SheetKind::TripResults);
    }
    state.phase = Phase::Ready;
}

/// Decode every leg and bound the whole itinerary, endpoints included.
fn preview_geometry(itinerary: &Itinerary) -> Result<PreviewGeometry, GeometryError> {
    let legs = itinerary
        .legs
        .iter()
        .map(|leg| geometry::decode(&leg.geometry_points))
        .collect::<Result<Vec<_>, _>>()?;

    let endpoints = itinerary
        .legs
        .iter()
        .flat_map(|leg| [leg.from.coordinate(), leg.to.coordinate()])
        .collect::<Vec<_>>();

    // Legs are never empty, so there is always at least one endpoint.
    let bounds = Bounds::from_coordinates(legs.iter().flatten().chain(&endpoints))
        .unwrap_or_else(|| Bounds::around(Coordinate::new(0.0, 0.0)));

    Ok(PreviewGeometry { legs, bounds })
}

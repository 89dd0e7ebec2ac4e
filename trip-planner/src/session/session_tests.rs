//! Unit tests for the trip-planning session.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::Semaphore;

use super::*;
use crate::domain::{Coordinate, Itinerary, Location, RoutePreference, TransportMode, TripPreferences};
use crate::locations::{InMemoryLocationStore, LocationResolver, LocationStore};
use crate::otp::{MockRoutingBackend, RoutingBackend, RoutingError, RoutingRequest};

fn downtown() -> Location {
    Location::new("Downtown", "Seattle", 47.6097, -122.3331)
}

fn capitol_hill() -> Location {
    Location::new("Capitol Hill", "Seattle", 47.6154, -122.3208)
}

fn config() -> SessionConfig {
    let now = NaiveDate::from_ymd_opt(2026, 3, 5)
        .unwrap()
        .and_hms_opt(8, 7, 0)
        .unwrap();
    SessionConfig::default().with_clock(Clock::fixed(now))
}

fn itinerary_json(duration: i64, transfers: u32, mode: &str, points: &str) -> String {
    let start = 1_772_727_000_000i64;
    let end = start + duration * 1000;
    format!(
        r#"{{
            "duration": {duration},
            "startTime": {start},
            "endTime": {end},
            "transfers": {transfers},
            "legs": [{{
                "startTime": {start},
                "endTime": {end},
                "mode": "{mode}",
                "route": "8",
                "transitLeg": {transit},
                "from": {{"name": "Downtown", "lon": -122.3331, "lat": 47.6097}},
                "to": {{"name": "Capitol Hill", "lon": -122.3208, "lat": 47.6154}},
                "legGeometry": {{"points": "{points}"}},
                "distance": 1500.0,
                "duration": {duration}.0
            }}]
        }}"#,
        transit = mode != "WALK",
    )
}

/// A slow direct walk and a fast bus trip with two transfers.
fn plan_json() -> String {
    format!(
        r#"{{"plan": {{
            "from": {{"name": "Downtown", "lon": -122.3331, "lat": 47.6097}},
            "to": {{"name": "Capitol Hill", "lon": -122.3208, "lat": 47.6154}},
            "itineraries": [{}, {}]
        }}}}"#,
        itinerary_json(1800, 0, "WALK", "swqaHzdtiVsb@{kA"),
        itinerary_json(1200, 2, "BUS", "oyqaHncuiV_XgiB"),
    )
}

fn plan_backend() -> MockRoutingBackend {
    MockRoutingBackend::from_json(&plan_json()).unwrap()
}

fn session() -> TripPlanningSession<MockRoutingBackend> {
    TripPlanningSession::new(plan_backend(), config())
}

fn set_trip<B: RoutingBackend>(session: &TripPlanningSession<B>) {
    session.set_origin(downtown());
    session.set_destination(capitol_hill());
}

/// Holds every request until the test releases it.
struct GatedBackend {
    gate: Semaphore,
    calls: AtomicUsize,
    inner: MockRoutingBackend,
}

impl GatedBackend {
    fn new(inner: MockRoutingBackend) -> Self {
        Self {
            gate: Semaphore::new(0),
            calls: AtomicUsize::new(0),
            inner,
        }
    }

    fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RoutingBackend for GatedBackend {
    async fn fetch_plan(&self, request: &RoutingRequest) -> Result<Vec<Itinerary>, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.acquire().await.unwrap().forget();
        self.inner.fetch_plan(request).await
    }
}

fn gated_session() -> TripPlanningSession<GatedBackend> {
    TripPlanningSession::new(GatedBackend::new(plan_backend()), config())
}

struct StubResolver {
    named: Option<Location>,
    current: Option<Location>,
}

impl LocationResolver for StubResolver {
    async fn reverse_geocode(&self, _coordinate: Coordinate) -> Option<Location> {
        self.named.clone()
    }

    async fn current_location(&self) -> Option<Location> {
        self.current.clone()
    }
}

// ----- locations and sheets -----

#[test]
fn new_session_is_idle() {
    let state = session().snapshot();

    assert_eq!(state.phase, Phase::Idle);
    assert!(state.origin.is_none() && state.destination.is_none());
    assert_eq!(state.mode, TransportMode::Transit);
    assert_eq!(state.preferences, TripPreferences::default());
    assert!(!state.can_plan_trip());
}

#[test]
fn choosing_both_locations_makes_ready() {
    let session = session();

    session.set_origin(downtown());
    assert_eq!(session.snapshot().phase, Phase::Idle);

    session.set_destination(capitol_hill());
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Ready);
    assert!(state.can_plan_trip());
}

#[test]
fn location_sheet_enters_and_leaves_selecting() {
    let session = session();

    session.present_sheet(SheetKind::LocationPicker(LocationSlot::Origin));
    assert_eq!(session.snapshot().phase, Phase::SelectingLocations);

    session.set_origin(downtown());
    let state = session.snapshot();
    assert_eq!(state.active_sheet, None);
    assert_eq!(state.phase, Phase::Idle);

    session.present_sheet(SheetKind::Recents(LocationSlot::Destination));
    assert_eq!(session.snapshot().phase, Phase::SelectingLocations);
    session.dismiss_sheet();
    assert_eq!(session.snapshot().phase, Phase::Idle);

    session.present_sheet(SheetKind::Favorites(LocationSlot::Destination));
    session.set_destination(capitol_hill());
    assert_eq!(session.snapshot().phase, Phase::Ready);
}

#[test]
fn non_location_sheet_keeps_phase() {
    let session = session();
    set_trip(&session);

    session.present_sheet(SheetKind::AdvancedOptions);
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Ready);
    assert_eq!(state.active_sheet, Some(SheetKind::AdvancedOptions));

    session.dismiss_sheet();
    assert_eq!(session.snapshot().active_sheet, None);
}

#[test]
fn swap_locations_exchanges_ends() {
    let session = session();
    let (a, b) = (downtown(), capitol_hill());
    session.set_origin(a.clone());
    session.set_destination(b.clone());

    session.swap_locations();
    let state = session.snapshot();
    assert_eq!(state.origin, Some(b));
    assert_eq!(state.destination, Some(a));
    assert_eq!(state.phase, Phase::Ready);
}

#[test]
fn clearing_a_location_leaves_ready() {
    let session = session();
    set_trip(&session);

    session.clear_destination();
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Idle);
    assert!(state.destination.is_none());
}

// ----- planning -----

#[tokio::test]
async fn plan_trip_success_orders_fastest_first() {
    let session = session();
    set_trip(&session);

    let outcome = session.plan_trip().await;

    assert_eq!(outcome, PlanOutcome::Completed { itineraries: 2 });
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Results);
    assert_eq!(state.active_sheet, Some(SheetKind::TripResults));
    let durations: Vec<_> = state.itineraries.iter().map(|i| i.duration_seconds).collect();
    assert_eq!(durations, vec![1200, 1800]);
    assert!(state.last_error.is_none());
}

#[tokio::test]
async fn fewest_transfers_orders_direct_first() {
    let session = session();
    set_trip(&session);
    session.set_preferences(
        TripPreferences::default().with_route_preference(RoutePreference::FewestTransfers),
    );

    session.plan_trip().await;

    let transfers: Vec<_> = session
        .snapshot()
        .itineraries
        .iter()
        .map(|i| i.transfers)
        .collect();
    assert_eq!(transfers, vec![0, 2]);
}

#[tokio::test]
async fn route_preference_change_reorders_results() {
    let session = session();
    set_trip(&session);
    session.plan_trip().await;

    session.set_preferences(
        TripPreferences::default().with_route_preference(RoutePreference::FewestTransfers),
    );

    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Results);
    assert_eq!(state.itineraries[0].transfers, 0);
}

#[tokio::test]
async fn other_preference_change_invalidates_results() {
    let session = session();
    set_trip(&session);
    session.plan_trip().await;

    session.set_preferences(TripPreferences::default().with_wheelchair(true));

    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Ready);
    assert!(state.itineraries.is_empty());
    assert!(state.preferences.wheelchair_accessible);
}

#[tokio::test]
async fn mode_change_invalidates_results() {
    let session = session();
    set_trip(&session);
    session.plan_trip().await;

    session.select_transport_mode(TransportMode::Bike);

    let state = session.snapshot();
    assert_eq!(state.mode, TransportMode::Bike);
    assert_eq!(state.phase, Phase::Ready);
    assert!(state.itineraries.is_empty());
    assert_eq!(state.active_sheet, None);
}

#[tokio::test]
async fn request_is_built_from_session_selections() {
    let session = session();
    set_trip(&session);
    session.select_transport_mode(TransportMode::Transit);

    session.plan_trip().await;

    let request = session.backend().last_request().unwrap();
    assert_eq!(request.origin, Coordinate::new(47.6097, -122.3331));
    assert_eq!(request.destination, Coordinate::new(47.6154, -122.3208));
    assert_eq!(request.modes, "TRANSIT,WALK");
    assert_eq!(request.date, "03-05-2026");
    assert_eq!(request.time, "08:07");
    assert!(!request.arrive_by);
    assert!(!request.wheelchair);
}

#[tokio::test]
async fn plan_without_locations_fails_without_calling_backend() {
    let session = session();
    session.set_origin(downtown());

    let outcome = session.plan_trip().await;

    let info = ErrorInfo::missing_origin_or_destination();
    assert_eq!(outcome, PlanOutcome::Failed(info.clone()));
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Error);
    assert_eq!(state.last_error, Some(info));
    assert!(!state.last_error.unwrap().is_retryable);
    assert_eq!(session.backend().call_count(), 0);
}

#[tokio::test]
async fn same_origin_and_destination_is_invalid_request() {
    let session = session();
    let here = downtown();
    session.set_origin(here.clone());
    session.set_destination(here);

    let outcome = session.plan_trip().await;

    let PlanOutcome::Failed(info) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(info.kind, ErrorKind::InvalidRequest);
    assert!(!info.is_retryable);
    assert_eq!(session.backend().call_count(), 0);
}

#[tokio::test]
async fn backend_error_payload_is_trip_planning_failure() {
    let backend =
        MockRoutingBackend::from_json(r#"{"plan":null,"error":{"id":1,"message":"no path"}}"#)
            .unwrap();
    let session = TripPlanningSession::new(backend, config());
    set_trip(&session);

    session.plan_trip().await;

    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Error);
    let error = state.last_error.unwrap();
    assert_eq!(error.kind, ErrorKind::TripPlanningFailed { id: 1 });
    assert!(error.is_retryable);
}

#[tokio::test]
async fn http_500_is_api_error() {
    let backend = MockRoutingBackend::failing(RoutingError::Api {
        status: Some(500),
        message: "Internal Server Error".into(),
    });
    let session = TripPlanningSession::new(backend, config());
    set_trip(&session);

    session.plan_trip().await;

    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Error);
    let error = state.last_error.unwrap();
    assert_eq!(
        error.kind,
        ErrorKind::Api {
            status_code: Some(500),
            timed_out: false
        }
    );
    assert!(error.is_retryable);
}

#[tokio::test]
async fn timeout_is_retryable_api_error() {
    let backend = MockRoutingBackend::failing(RoutingError::Timeout("30s".into()));
    let session = TripPlanningSession::new(backend, config());
    set_trip(&session);

    let PlanOutcome::Failed(info) = session.plan_trip().await else {
        panic!("expected failure");
    };
    assert_eq!(
        info.kind,
        ErrorKind::Api {
            status_code: None,
            timed_out: true
        }
    );
    assert!(info.is_retryable);
}

#[tokio::test]
async fn error_can_be_retried_and_dismissed() {
    let backend = MockRoutingBackend::failing(RoutingError::Api {
        status: Some(503),
        message: String::new(),
    });
    let session = TripPlanningSession::new(backend, config());
    set_trip(&session);

    session.plan_trip().await;
    session.plan_trip().await;
    assert_eq!(session.backend().call_count(), 2);

    session.dismiss_error();
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Ready);
    assert!(state.last_error.is_none());
}

#[tokio::test]
async fn no_itineraries_is_a_result_not_an_error() {
    let backend = MockRoutingBackend::from_json(
        r#"{"plan":{"from":{"lon":0.0,"lat":0.0},"to":{"lon":1.0,"lat":1.0},"itineraries":[]}}"#,
    )
    .unwrap();
    let session = TripPlanningSession::new(backend, config());
    set_trip(&session);

    let outcome = session.plan_trip().await;

    assert_eq!(outcome, PlanOutcome::Completed { itineraries: 0 });
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Results);
    assert!(state.itineraries.is_empty());
    assert!(state.last_error.is_none());
}

#[tokio::test]
async fn subscribers_see_results() {
    let session = session();
    let mut updates = session.subscribe();
    set_trip(&session);

    session.plan_trip().await;

    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().phase, Phase::Results);
}

// ----- concurrency -----

#[tokio::test]
async fn concurrent_plan_calls_send_one_request() {
    let session = gated_session();
    set_trip(&session);

    let (first, second, ()) = tokio::join!(session.plan_trip(), session.plan_trip(), async {
        session.backend().release(1);
    });

    assert_eq!(first, PlanOutcome::Completed { itineraries: 2 });
    assert_eq!(second, PlanOutcome::Ignored);
    assert_eq!(session.backend().call_count(), 1);
}

#[tokio::test]
async fn reset_during_planning_discards_result() {
    let session = gated_session();
    set_trip(&session);

    let (outcome, ()) = tokio::join!(session.plan_trip(), async {
        assert_eq!(session.snapshot().phase, Phase::Planning);
        session.reset_session();
        session.backend().release(1);
    });

    assert_eq!(outcome, PlanOutcome::Discarded);
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Idle);
    assert!(state.itineraries.is_empty());
    assert!(state.origin.is_none() && state.destination.is_none());
}

#[tokio::test]
async fn only_latest_request_is_applied() {
    let session = gated_session();
    set_trip(&session);

    let (stale, fresh, ()) = tokio::join!(
        session.plan_trip(),
        async {
            session.reset_session();
            set_trip(&session);
            session.plan_trip().await
        },
        async {
            session.backend().release(2);
        }
    );

    assert_eq!(stale, PlanOutcome::Discarded);
    assert_eq!(fresh, PlanOutcome::Completed { itineraries: 2 });
    assert_eq!(session.snapshot().phase, Phase::Results);
    assert_eq!(session.backend().call_count(), 2);
}

#[tokio::test]
async fn location_change_during_planning_discards_result() {
    let session = gated_session();
    set_trip(&session);
    let elsewhere = Location::new("Fremont", "Seattle", 47.6505, -122.3493);

    let (outcome, ()) = tokio::join!(session.plan_trip(), async {
        session.set_origin(elsewhere.clone());
        assert_eq!(session.snapshot().phase, Phase::Planning);
        session.backend().release(1);
    });

    assert_eq!(outcome, PlanOutcome::Discarded);
    let request = session.backend().inner.last_request().unwrap();
    assert_eq!(request.origin, Coordinate::new(47.6097, -122.3331));
    let state = session.snapshot();
    assert_eq!(state.origin, Some(elsewhere));
    assert_eq!(state.phase, Phase::Ready);
    assert!(state.itineraries.is_empty());
}

#[tokio::test]
async fn clearing_origin_during_planning_settles_idle() {
    let session = gated_session();
    set_trip(&session);

    let (outcome, ()) = tokio::join!(session.plan_trip(), async {
        session.clear_origin();
        session.backend().release(1);
    });

    assert_eq!(outcome, PlanOutcome::Discarded);
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Idle);
    assert!(state.origin.is_none());
    assert!(state.itineraries.is_empty());
}

#[tokio::test]
async fn mode_change_during_planning_discards_result() {
    let session = gated_session();
    set_trip(&session);

    let (outcome, ()) = tokio::join!(session.plan_trip(), async {
        session.select_transport_mode(TransportMode::Car);
        session.backend().release(1);
    });

    assert_eq!(outcome, PlanOutcome::Discarded);
    assert_eq!(session.snapshot().phase, Phase::Ready);
}

#[tokio::test]
async fn route_preference_change_during_planning_keeps_result() {
    let session = gated_session();
    set_trip(&session);

    let (outcome, ()) = tokio::join!(session.plan_trip(), async {
        session.set_preferences(
            TripPreferences::default().with_route_preference(RoutePreference::FewestTransfers),
        );
        session.backend().release(1);
    });

    assert_eq!(outcome, PlanOutcome::Completed { itineraries: 2 });
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Results);
    assert_eq!(state.itineraries[0].transfers, 0);
}

#[tokio::test]
async fn dropped_plan_request_can_be_retried() {
    let session = gated_session();
    set_trip(&session);

    let timed_out = tokio::time::timeout(Duration::from_millis(20), session.plan_trip()).await;

    assert!(timed_out.is_err());
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Ready);
    assert!(state.last_error.is_none());

    session.backend().release(1);
    let outcome = session.plan_trip().await;

    assert_eq!(outcome, PlanOutcome::Completed { itineraries: 2 });
    assert_eq!(session.backend().call_count(), 2);
    assert_eq!(session.snapshot().phase, Phase::Results);
}

#[tokio::test]
async fn session_can_be_driven_from_a_spawned_task() {
    let session = Arc::new(session());
    let resolver = StubResolver {
        named: None,
        current: Some(downtown()),
    };

    let task = {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            session
                .use_current_location(&resolver, LocationSlot::Origin)
                .await;
            session.set_destination(capitol_hill());
            session.plan_trip().await
        })
    };

    assert_eq!(
        task.await.unwrap(),
        PlanOutcome::Completed { itineraries: 2 }
    );
    assert_eq!(session.snapshot().phase, Phase::Results);
}

// ----- preview and selection -----

#[tokio::test]
async fn preview_decodes_every_leg() {
    let session = session();
    set_trip(&session);
    session.plan_trip().await;
    let itinerary = session.snapshot().itineraries[0].clone();

    session.preview_itinerary(&itinerary).unwrap();

    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Previewing);
    assert_eq!(state.preview_itinerary.as_ref(), Some(&itinerary));
    let geometry = state.preview_geometry.unwrap();
    assert_eq!(geometry.legs.len(), itinerary.legs.len());
    assert_eq!(geometry.legs[0].len(), 2);
    assert!(geometry.bounds.contains(Coordinate::new(47.6100, -122.3380)));
    assert!(geometry.bounds.contains(Coordinate::new(47.6097, -122.3331)));
    assert!(geometry.bounds.contains(Coordinate::new(47.6154, -122.3208)));
}

#[tokio::test]
async fn previewing_another_itinerary_replaces_the_first() {
    let session = session();
    set_trip(&session);
    session.plan_trip().await;
    let itineraries = session.snapshot().itineraries;
    let mut updates = session.subscribe();

    session.preview_itinerary(&itineraries[0]).unwrap();
    updates.borrow_and_update();
    session.preview_itinerary(&itineraries[1]).unwrap();

    assert!(updates.has_changed().unwrap());
    let state = updates.borrow_and_update().clone();
    assert_eq!(state.phase, Phase::Previewing);
    assert_eq!(state.preview_itinerary.as_ref(), Some(&itineraries[1]));
    assert!(state.preview_geometry.is_some());
}

#[tokio::test]
async fn clear_preview_without_preview_is_noop() {
    let session = session();
    set_trip(&session);
    session.plan_trip().await;
    let before = session.snapshot();
    let mut updates = session.subscribe();
    updates.borrow_and_update();

    session.clear_preview();

    assert!(!updates.has_changed().unwrap());
    assert_eq!(session.snapshot(), before);
}

#[tokio::test]
async fn clear_preview_returns_to_ready() {
    let session = session();
    set_trip(&session);
    session.plan_trip().await;
    let itinerary = session.snapshot().itineraries[0].clone();
    session.preview_itinerary(&itinerary).unwrap();

    session.clear_preview();

    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Ready);
    assert!(state.preview_itinerary.is_none());
    assert!(state.preview_geometry.is_none());
    assert_eq!(state.itineraries.len(), 2);

    session.clear_preview();
    assert_eq!(session.snapshot(), state);
}

#[tokio::test]
async fn select_itinerary_opens_directions() {
    let session = session();
    set_trip(&session);
    session.plan_trip().await;
    let itinerary = session.snapshot().itineraries[1].clone();

    session.select_itinerary(&itinerary).unwrap();

    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Previewing);
    assert_eq!(state.selected_itinerary.as_ref(), Some(&itinerary));
    assert_eq!(state.active_sheet, Some(SheetKind::Directions));

    session.dismiss_sheet();
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Ready);
    assert!(state.selected_itinerary.is_none());
    assert!(state.preview_itinerary.is_none());
}

#[tokio::test]
async fn preview_of_unknown_itinerary_is_rejected() {
    let session = session();
    set_trip(&session);
    session.plan_trip().await;
    let mut foreign = session.snapshot().itineraries[0].clone();
    foreign.transfers += 5;

    assert_eq!(
        session.preview_itinerary(&foreign),
        Err(SessionError::UnknownItinerary)
    );
    assert_eq!(session.snapshot().phase, Phase::Results);
}

#[tokio::test]
async fn undecodable_geometry_is_reported() {
    let json = format!(
        r#"{{"plan": {{
            "from": {{"lon": 0.0, "lat": 0.0}},
            "to": {{"lon": 1.0, "lat": 1.0}},
            "itineraries": [{}]
        }}}}"#,
        itinerary_json(600, 0, "WALK", "_p~iF"),
    );
    let session = TripPlanningSession::new(MockRoutingBackend::from_json(&json).unwrap(), config());
    set_trip(&session);
    session.plan_trip().await;
    let itinerary = session.snapshot().itineraries[0].clone();

    let err = session.preview_itinerary(&itinerary).unwrap_err();

    assert!(matches!(err, SessionError::Geometry(_)));
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Results);
    assert!(state.preview_itinerary.is_none());
    assert_eq!(state.last_error.unwrap().kind, ErrorKind::GeometryDecode);
}

// ----- capabilities -----

#[tokio::test]
async fn coordinate_without_name_becomes_dropped_pin() {
    let session = session();
    let resolver = StubResolver {
        named: None,
        current: None,
    };

    let location = session
        .set_location_from_coordinate(
            &resolver,
            LocationSlot::Destination,
            Coordinate::new(47.6154, -122.3208),
        )
        .await;

    assert_eq!(location.title, "Dropped Pin");
    assert_eq!(session.snapshot().destination, Some(location));
}

#[tokio::test]
async fn coordinate_with_name_uses_resolved_location() {
    let session = session();
    let named = Location::new("Pike Place Market", "Seattle", 47.6097, -122.3422);
    let resolver = StubResolver {
        named: Some(named.clone()),
        current: None,
    };

    session
        .set_location_from_coordinate(&resolver, LocationSlot::Origin, named.coordinate())
        .await;

    assert_eq!(session.snapshot().origin, Some(named));
}

#[tokio::test]
async fn current_location_unavailable_leaves_session_untouched() {
    let session = session();
    let before = session.snapshot();
    let resolver = StubResolver {
        named: None,
        current: None,
    };

    assert!(
        session
            .use_current_location(&resolver, LocationSlot::Origin)
            .await
            .is_none()
    );
    assert_eq!(session.snapshot(), before);

    let here = downtown();
    let resolver = StubResolver {
        named: None,
        current: Some(here.clone()),
    };
    session
        .use_current_location(&resolver, LocationSlot::Origin)
        .await;
    assert_eq!(session.snapshot().origin, Some(here));
}

#[test]
fn quick_picks_come_from_the_store() {
    let store = Arc::new(InMemoryLocationStore::new());
    store.add_favorite(downtown()).unwrap();
    store.add_recent(capitol_hill()).unwrap();
    store.add_recent(downtown()).unwrap();

    let session = session().with_store(store);

    assert_eq!(session.favorites().unwrap().len(), 1);
    let recents: Vec<_> = session
        .recents()
        .unwrap()
        .into_iter()
        .map(|l| l.title)
        .collect();
    assert_eq!(recents, vec!["Downtown", "Capitol Hill"]);
}

#[test]
fn no_store_means_no_quick_picks() {
    let session = session();
    assert!(session.favorites().unwrap().is_empty());
    assert!(session.recents().unwrap().is_empty());
}

//! Integration tests for the OTP client (wiremock-based)

use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trip_planner::domain::{Location, TransportMode, TripPreferences};
use trip_planner::otp::{OtpClient, OtpConfig, RoutingBackend, RoutingError, RoutingRequest};
use trip_planner::session::{ErrorKind, Phase, PlanOutcome, SessionConfig, TripPlanningSession};

const PLAN_PATH: &str = "/otp/routers/default/plan";

fn seattle_plan_json() -> &'static str {
    include_str!("../data/mock_plans/seattle.json")
}

fn no_path_json() -> &'static str {
    r#"{
        "requestParameters": {"fromPlace": "47.6097,-122.3331"},
        "plan": null,
        "error": {"id": 404, "msg": "No trip found.", "message": "PATH_NOT_FOUND", "noPath": true}
    }"#
}

fn downtown() -> Location {
    Location::new("Downtown", "Seattle", 47.6097, -122.3331)
}

fn capitol_hill() -> Location {
    Location::new("Capitol Hill", "Seattle", 47.6154, -122.3208)
}

fn request() -> RoutingRequest {
    let now = chrono::NaiveDate::from_ymd_opt(2026, 3, 5)
        .unwrap()
        .and_hms_opt(8, 7, 0)
        .unwrap();
    RoutingRequest::build(
        &downtown(),
        &capitol_hill(),
        TransportMode::Transit,
        &TripPreferences::default(),
        now,
    )
    .unwrap()
}

fn client_for(server: &MockServer) -> OtpClient {
    OtpClient::new(OtpConfig::new(format!("{}/otp", server.uri())).with_timeout(5)).unwrap()
}

async fn session_for(server: &MockServer) -> TripPlanningSession<OtpClient> {
    let session = TripPlanningSession::new(client_for(server), SessionConfig::default());
    session.set_origin(downtown());
    session.set_destination(capitol_hill());
    session
}

#[tokio::test]
async fn sends_every_query_parameter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .and(query_param("fromPlace", "47.6097,-122.3331"))
        .and(query_param("toPlace", "47.6154,-122.3208"))
        .and(query_param("date", "03-05-2026"))
        .and(query_param("time", "08:07"))
        .and(query_param("mode", "TRANSIT,WALK"))
        .and(query_param("arriveBy", "false"))
        .and(query_param("maxWalkDistance", "1609"))
        .and(query_param("wheelchair", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string(seattle_plan_json()))
        .expect(1)
        .mount(&server)
        .await;

    let itineraries = client_for(&server).fetch_plan(&request()).await.unwrap();

    assert_eq!(itineraries.len(), 2);
    assert_eq!(itineraries[0].legs.len(), 4);
    assert_eq!(itineraries[0].transfers, 1);
}

#[tokio::test]
async fn base_url_gains_router_segment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(seattle_plan_json()))
        .expect(2)
        .mount(&server)
        .await;

    let bare = client_for(&server);
    let full = OtpClient::new(OtpConfig::new(format!(
        "{}/otp/routers/default/",
        server.uri()
    )))
    .unwrap();

    assert_eq!(bare.plan_url(), full.plan_url());
    assert!(bare.fetch_plan(&request()).await.is_ok());
    assert!(full.fetch_plan(&request()).await.is_ok());
}

#[tokio::test]
async fn server_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("router exploded"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_plan(&request()).await.unwrap_err();

    assert_eq!(
        err,
        RoutingError::Api {
            status: Some(500),
            message: "router exploded".into()
        }
    );
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn empty_error_body_uses_status_reason() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_plan(&request()).await.unwrap_err();

    assert_eq!(
        err,
        RoutingError::Api {
            status: Some(503),
            message: "Service Unavailable".into()
        }
    );
}

#[tokio::test]
async fn error_payload_is_trip_planning_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(no_path_json()))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let raw = client.fetch_response(&request()).await.unwrap();
    assert!(raw.plan.is_none());
    assert!(raw.request_parameters.is_some());

    let err = client.fetch_plan(&request()).await.unwrap_err();
    assert_eq!(
        err,
        RoutingError::TripPlanningFailed {
            id: 404,
            message: "No trip found.".into(),
            no_path: true
        }
    );
}

#[tokio::test]
async fn malformed_body_is_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_plan(&request()).await.unwrap_err();

    let RoutingError::Json { body, .. } = err else {
        panic!("expected JSON error, got {err:?}");
    };
    assert_eq!(body.as_deref(), Some("<html>maintenance</html>"));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(seattle_plan_json())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client =
        OtpClient::new(OtpConfig::new(format!("{}/otp", server.uri())).with_timeout(1)).unwrap();
    let err = client.fetch_plan(&request()).await.unwrap_err();

    assert!(matches!(err, RoutingError::Timeout(_)), "got {err:?}");
}

#[test]
fn non_http_base_url_is_rejected() {
    let err = OtpClient::new(OtpConfig::new("ftp://example.com/otp")).unwrap_err();
    assert!(matches!(err, RoutingError::InvalidConfig(_)));
}

#[tokio::test]
async fn session_plans_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(seattle_plan_json()))
        .mount(&server)
        .await;

    let session = session_for(&server).await;
    let outcome = session.plan_trip().await;

    assert_eq!(outcome, PlanOutcome::Completed { itineraries: 2 });
    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Results);
    assert_eq!(state.itineraries[0].duration_seconds, 1140);

    let itinerary = state.itineraries[1].clone();
    session.preview_itinerary(&itinerary).unwrap();
    let geometry = session.snapshot().preview_geometry.unwrap();
    assert_eq!(geometry.legs.len(), 4);
}

#[tokio::test]
async fn session_reports_no_path_as_retryable_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(no_path_json()))
        .mount(&server)
        .await;

    let session = session_for(&server).await;
    session.plan_trip().await;

    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Error);
    let error = state.last_error.unwrap();
    assert_eq!(error.kind, ErrorKind::TripPlanningFailed { id: 404 });
    assert_eq!(error.display_message, "Unable to plan this trip: No trip found.");
    assert!(error.is_retryable);
}

#[tokio::test]
async fn session_reports_http_500_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PLAN_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let session = session_for(&server).await;
    session.plan_trip().await;

    let state = session.snapshot();
    assert_eq!(state.phase, Phase::Error);
    assert_eq!(
        state.last_error.unwrap().kind,
        ErrorKind::Api {
            status_code: Some(500),
            timed_out: false
        }
    );
}

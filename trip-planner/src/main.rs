use std::process::ExitCode;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trip_planner::domain::{Coordinate, Location, TransportMode};
use trip_planner::otp::{MockRoutingBackend, OtpClient, OtpConfig, RoutingBackend};
use trip_planner::session::{PlanOutcome, SessionConfig, TripPlanningSession};

/// Used when `OTP_BASE_URL` is not set.
const DEFAULT_BASE_URL: &str = "http://localhost:8080/otp";

const USAGE: &str = "usage: trip-planner <from lat,lon> <to lat,lon> [transit|walk|bike|car]";

struct Trip {
    from: Coordinate,
    to: Coordinate,
    mode: TransportMode,
}

fn parse_args(args: &[String]) -> Result<Trip, String> {
    let [from, to, rest @ ..] = args else {
        return Err(USAGE.to_string());
    };
    let from = Coordinate::parse(from).ok_or_else(|| format!("bad origin {from:?}"))?;
    let to = Coordinate::parse(to).ok_or_else(|| format!("bad destination {to:?}"))?;
    let mode = match rest {
        [] => TransportMode::default(),
        [mode] => TransportMode::parse(mode).ok_or_else(|| format!("unknown mode {mode:?}"))?,
        _ => return Err(USAGE.to_string()),
    };
    Ok(Trip { from, to, mode })
}

async fn run<B: RoutingBackend>(backend: B, trip: Trip) -> ExitCode {
    let session = TripPlanningSession::new(backend, SessionConfig::default().with_mode(trip.mode));
    session.set_origin(Location::from_coordinate(trip.from));
    session.set_destination(Location::from_coordinate(trip.to));

    match session.plan_trip().await {
        PlanOutcome::Completed { itineraries: 0 } => {
            println!("No itineraries found.");
            ExitCode::SUCCESS
        }
        PlanOutcome::Completed { .. } => {
            for (i, itinerary) in session.snapshot().itineraries.iter().enumerate() {
                println!(
                    "{}. {} min, {} transfer(s), {:.0} m walking",
                    i + 1,
                    itinerary.duration_seconds / 60,
                    itinerary.transfers,
                    itinerary.walk_distance_meters(),
                );
                println!(
                    "   {} -> {}  {}",
                    itinerary.departure().format("%H:%M"),
                    itinerary.arrival().format("%H:%M"),
                    itinerary.summary(),
                );
            }
            ExitCode::SUCCESS
        }
        PlanOutcome::Failed(error) => {
            let hint = if error.is_retryable { " (try again)" } else { "" };
            eprintln!("Trip planning failed: {}{hint}", error.display_message);
            ExitCode::FAILURE
        }
        PlanOutcome::Ignored | PlanOutcome::Discarded => ExitCode::FAILURE,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let trip = match parse_args(&args) {
        Ok(trip) => trip,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    if let Ok(path) = std::env::var("OTP_MOCK_PLAN") {
        info!(%path, "using mock plan");
        return match MockRoutingBackend::new(&path) {
            Ok(backend) => run(backend, trip).await,
            Err(e) => {
                eprintln!("Failed to load mock plan: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let base_url = std::env::var("OTP_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let mut config = OtpConfig::new(base_url);
    if let Ok(secs) = std::env::var("OTP_TIMEOUT_SECS") {
        match secs.parse() {
            Ok(secs) => config = config.with_timeout(secs),
            Err(_) => warn!(%secs, "ignoring invalid OTP_TIMEOUT_SECS"),
        }
    }

    match OtpClient::new(config) {
        Ok(client) => {
            info!(url = client.plan_url(), "planning trip");
            run(client, trip).await
        }
        Err(e) => {
            eprintln!("Failed to create OTP client: {e}");
            ExitCode::FAILURE
        }
    }
}

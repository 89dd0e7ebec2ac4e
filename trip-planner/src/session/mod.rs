//! Trip-planning session.
//!
//! This module owns the state machine that sits between the presentation
//! layer and the routing backend:
//!
//! ```text
//! Idle -> SelectingLocations -> Ready -> Planning -> Results -> Previewing
//!                               ^  ^        |                      |
//!                               |  +----- Error                    |
//!                               +----------- clear_preview --------+
//! ```
//!
//! The presentation layer calls the session's methods and renders the
//! [`SessionState`] snapshots it publishes.

mod config;
mod planning;
mod state;

#[cfg(test)]
mod session_tests;

pub use config::{Clock, SessionConfig};
pub use planning::{PlanOutcome, SessionError, TripPlanningSession};
pub use state::{
    ErrorInfo, ErrorKind, LocationSlot, Phase, PreviewGeometry, SessionState, SheetKind,
};

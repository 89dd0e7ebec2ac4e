//! Trip planner core.
//!
//! Drives one trip-planning session against an OpenTripPlanner backend:
//! choose an origin and destination, plan, then preview or select one of
//! the returned itineraries.

pub mod domain;
pub mod geometry;
pub mod locations;
pub mod otp;
pub mod session;

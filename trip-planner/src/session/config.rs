//! Session configuration.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::domain::{TransportMode, TripPreferences};

/// Source of "now" in backend-local time, used for `LeaveNow` requests.
#[derive(Clone)]
pub struct Clock(Arc<dyn Fn() -> NaiveDateTime + Send + Sync>);

impl Clock {
    pub fn new(f: impl Fn() -> NaiveDateTime + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// The host's local wall clock.
    pub fn local() -> Self {
        Self::new(|| chrono::Local::now().naive_local())
    }

    /// Always returns `at`.
    pub fn fixed(at: NaiveDateTime) -> Self {
        Self::new(move || at)
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.0)()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::local()
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Clock({})", self.now())
    }
}

/// Initial choices for a new session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub default_mode: TransportMode,
    pub default_preferences: TripPreferences,
    pub clock: Clock,
}

impl SessionConfig {
    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.default_mode = mode;
        self
    }

    pub fn with_preferences(mut self, preferences: TripPreferences) -> Self {
        self.default_preferences = preferences;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

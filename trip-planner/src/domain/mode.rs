//! Transport modes offered to the user.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the user wants to travel.
///
/// Each mode maps to one or more OTP mode tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Transit,
    Walk,
    Bike,
    Car,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Transit,
        TransportMode::Walk,
        TransportMode::Bike,
        TransportMode::Car,
    ];

    /// Backend mode tokens, in the order they are sent.
    pub fn backend_tokens(&self) -> &'static [&'static str] {
        match self {
            TransportMode::Transit => &["TRANSIT", "WALK"],
            TransportMode::Walk => &["WALK"],
            TransportMode::Bike => &["BICYCLE"],
            TransportMode::Car => &["CAR"],
        }
    }

    /// The comma-joined `mode` query value.
    pub fn query_value(&self) -> String {
        self.backend_tokens().join(",")
    }

    /// Parse a user-facing name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "transit" => Some(TransportMode::Transit),
            "walk" => Some(TransportMode::Walk),
            "bike" | "bicycle" => Some(TransportMode::Bike),
            "car" | "drive" => Some(TransportMode::Car),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Transit => "transit",
            TransportMode::Walk => "walk",
            TransportMode::Bike => "bike",
            TransportMode::Car => "car",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

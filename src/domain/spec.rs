//! Per-request path specification.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Minutes, StopId};

/// Which way the itinerary is being built.
///
/// Outbound requests fix the destination arrival (the traveler wants to
/// be there by the preferred time); inbound requests fix the origin
/// departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Outbound,
    Inbound,
}

impl Direction {
    /// True for [`Direction::Outbound`].
    pub fn is_outbound(self) -> bool {
        matches!(self, Direction::Outbound)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Outbound => "outbound",
            Direction::Inbound => "inbound",
        })
    }
}

/// Which phase of the search is appending segments.
///
/// The exploratory labeling phase and the final enumeration phase grow
/// paths in opposite temporal orders for a given [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Labeling,
    Enumerating,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Labeling => "labeling",
            Phase::Enumerating => "enumerating",
        })
    }
}

/// Immutable traveler/request parameters for one path-finding request.
///
/// Fixed for the lifetime of a request; every append and costing call
/// receives the same specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSpec {
    /// Travel direction for this request.
    pub direction: Direction,

    /// Preferred time in minutes after midnight: destination arrival
    /// for outbound requests, origin departure for inbound ones.
    pub preferred_time: Minutes,

    /// Traveler's user class in the weight tables.
    pub user_class: String,

    /// Trip purpose in the weight tables.
    pub purpose: String,

    /// Demand mode name for access segments (e.g. "walk").
    pub access_mode: String,

    /// Demand mode name for egress segments.
    pub egress_mode: String,

    /// Demand mode name for transit segments.
    pub transit_mode: String,

    /// Origin zone, keys access attribute lookups.
    pub origin: StopId,

    /// Destination zone, keys egress attribute lookups.
    pub destination: StopId,

    /// Emit detailed append/costing traces for this request.
    pub trace: bool,
}

impl PathSpec {
    /// Create a specification with neutral mode names and tracing off.
    ///
    /// Callers fill in the remaining public fields as needed.
    pub fn new(direction: Direction, preferred_time: Minutes) -> Self {
        Self {
            direction,
            preferred_time,
            user_class: String::new(),
            purpose: String::new(),
            access_mode: "walk".to_string(),
            egress_mode: "walk".to_string(),
            transit_mode: "transit".to_string(),
            origin: StopId(0),
            destination: StopId(0),
            trace: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_spec_defaults() {
        let spec = PathSpec::new(Direction::Inbound, 510.0);

        assert_eq!(spec.direction, Direction::Inbound);
        assert_eq!(spec.preferred_time, 510.0);
        assert_eq!(spec.access_mode, "walk");
        assert!(!spec.trace);
    }
}

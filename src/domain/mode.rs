//! Travel mode of a single segment.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of travel a segment represents.
///
/// The `Ord` implementation is used as a deterministic tie-break when
/// ranking otherwise equal paths, so the variant order here is part of
/// the path-set ordering contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Walk from the traveler's origin to a transit stop.
    Access,
    /// Walk from a transit stop to the traveler's destination.
    Egress,
    /// Walk between two transit stops mid-journey.
    Transfer,
    /// Ride a scheduled vehicle trip between two stops.
    Trip,
}

impl Mode {
    /// Lowercase name used in reports and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Access => "access",
            Mode::Egress => "egress",
            Mode::Transfer => "transfer",
            Mode::Trip => "trip",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

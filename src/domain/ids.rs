//! Identifier newtypes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric key for a concrete supply mode (a vehicle technology or a
/// non-transit mode such as "walk access") in the weight tables.
pub type SupplyModeId = i32;

/// A stop or zone identifier.
///
/// Access and egress segments use zone identifiers on their street side;
/// everything else refers to transit stops. Both live in the same
/// numeric namespace, as supplied by the network tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StopId(pub i32);

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scheduled trip identifier.
///
/// For access, egress and transfer segments the trip slot instead
/// carries the [`SupplyModeId`] of the walking mode, since those
/// segments have no vehicle trip; the segment's [`Mode`] disambiguates.
///
/// [`Mode`]: super::Mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TripId(pub i32);

impl TripId {
    /// The supply-mode reading of the identifier, for segments whose
    /// trip slot carries a mode rather than a vehicle trip.
    pub fn as_supply_mode(self) -> SupplyModeId {
        self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_bare_number() {
        assert_eq!(StopId(17).to_string(), "17");
        assert_eq!(TripId(-3).to_string(), "-3");
    }

    #[test]
    fn ids_order_numerically() {
        assert!(StopId(2) < StopId(10));
        assert!(TripId(5) > TripId(-5));
    }
}

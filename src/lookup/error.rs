//! Lookup error types.
//!
//! A [`LookupError`](crate::lookup::LookupError) means the schedule or
//! weight tables could not answer a query the core needed. These are
//! data problems signalled by the collaborator, distinct from the
//! non-error infeasibility outcome of appending out-of-order segments.

use crate::domain::{Mode, StopId, TripId};

/// Failure to resolve schedule, weight or attribute data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    /// No scheduled departure for the trip at the given stop/sequence.
    #[error("no scheduled departure for trip {trip} at stop {stop} (sequence {seq})")]
    UnknownDeparture { trip: TripId, stop: StopId, seq: i32 },

    /// No weight row for the demand segmentation.
    #[error("no weights for user class {user_class:?}, purpose {purpose:?}, {mode} mode {demand_mode:?}")]
    UnknownWeights {
        user_class: String,
        purpose: String,
        mode: Mode,
        demand_mode: String,
    },

    /// No access/egress attribute vector for the zone/stop pair.
    #[error("no access attributes for zone {zone} to stop {stop}")]
    UnknownAccess { zone: StopId, stop: StopId },

    /// No transfer attribute vector for the stop pair.
    #[error("no transfer attributes between stops {from} and {to}")]
    UnknownTransfer { from: StopId, to: StopId },

    /// The trip is not in the schedule tables.
    #[error("unknown trip {0}")]
    UnknownTrip(TripId),
}

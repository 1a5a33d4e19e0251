//! Read-only schedule, weight and attribute lookups.
//!
//! The core never owns network data. Everything it needs to time and
//! cost a segment — scheduled departures, weight rows, attribute
//! vectors, trip occupancy — is answered by a [`CostLookup`]
//! implementation supplied by the enclosing system. The trait must be
//! cheap and safe to query concurrently from many workers; the core
//! only ever reads through a shared reference.

mod error;
pub mod mock;

use std::collections::BTreeMap;

use tracing::{trace, warn};

use crate::domain::{Minutes, Mode, PathSpec, StopId, SupplyModeId, TripId};

pub use error::LookupError;

/// Named attribute vector for one segment, in minutes/indicator units.
///
/// A `BTreeMap` keeps iteration order deterministic, which makes both
/// the tallied float sum and the trace output reproducible across runs.
pub type Attributes = BTreeMap<String, f64>;

/// Named per-minute (or per-indicator) weights for one demand segment.
pub type NamedWeights = BTreeMap<String, f64>;

/// Attribute injected with the schedule-preference delay on access and
/// egress segments.
pub const ATTR_PREFERRED_DELAY: &str = "preferred_delay_min";
/// Attribute injected with a trip segment's in-vehicle minutes.
pub const ATTR_IN_VEHICLE_TIME: &str = "in_vehicle_time_min";
/// Attribute injected with a trip segment's wait minutes.
pub const ATTR_WAIT_TIME: &str = "wait_time_min";
/// Attribute injected with a trip's clamped occupancy margin.
pub const ATTR_OVERCAP: &str = "overcap";
/// Attribute injected with the binary at-capacity indicator.
pub const ATTR_AT_CAPACITY: &str = "at_capacity";

/// Static description of a scheduled trip: which supply mode prices it
/// and the base attribute vector shared by all of its segments.
#[derive(Debug, Clone, PartialEq)]
pub struct TripInfo {
    pub supply_mode: SupplyModeId,
    pub attributes: Attributes,
}

/// Read-only provider of schedule times, weights, attributes and
/// occupancy.
///
/// This abstraction keeps the itinerary core independent of how the
/// network tables are stored and lets it be tested with mock data
/// ([`mock::MockLookup`]).
pub trait CostLookup {
    /// Scheduled departure of `trip` from `stop`.
    ///
    /// A negative `seq` is a wildcard: the first schedule entry for the
    /// stop on that trip matches regardless of its sequence index.
    fn scheduled_departure(
        &self,
        trip: TripId,
        stop: StopId,
        seq: i32,
    ) -> Result<Minutes, LookupError>;

    /// Weight row for a (user class, purpose, mode, demand mode,
    /// supply mode) demand segmentation.
    fn named_weights(
        &self,
        user_class: &str,
        purpose: &str,
        mode: Mode,
        demand_mode: &str,
        supply_mode: SupplyModeId,
    ) -> Result<NamedWeights, LookupError>;

    /// Attribute vector for walking between a zone and a transit stop
    /// with the given non-transit supply mode. Serves both access and
    /// egress segments.
    fn access_attributes(
        &self,
        zone: StopId,
        supply_mode: SupplyModeId,
        stop: StopId,
    ) -> Result<Attributes, LookupError>;

    /// Attribute vector for a transfer walk between two stops.
    fn transfer_attributes(&self, from: StopId, to: StopId) -> Result<Attributes, LookupError>;

    /// Supply mode and base attributes for a scheduled trip.
    fn trip_info(&self, trip: TripId) -> Result<TripInfo, LookupError>;

    /// Occupancy margin of the trip at a stop sequence: negative while
    /// seats remain, non-negative once the vehicle is at or over
    /// capacity.
    fn occupancy_margin(&self, trip: TripId, seq: i32) -> Result<f64, LookupError>;

    /// The supply mode that prices transfer walks.
    fn transfer_supply_mode(&self) -> SupplyModeId;

    /// Display name for a stop in reports. Defaults to the numeric id.
    fn stop_name(&self, stop: StopId) -> String {
        stop.to_string()
    }

    /// Display name for a trip in reports. Defaults to the numeric id.
    fn trip_name(&self, trip: TripId) -> String {
        trip.to_string()
    }

    /// Display name for a supply mode. Defaults to the numeric id.
    fn supply_mode_name(&self, mode: SupplyModeId) -> String {
        mode.to_string()
    }

    /// Tally one segment's generalized cost as the weighted sum of its
    /// attributes.
    ///
    /// Weights with no matching attribute contribute nothing and are
    /// reported; every implementation shares this provided method so a
    /// cost is derivable from the weight and attribute tables alone.
    fn tally_cost(
        &self,
        supply_mode: SupplyModeId,
        spec: &PathSpec,
        weights: &NamedWeights,
        attributes: &Attributes,
        quiet: bool,
    ) -> f64 {
        let mut cost = 0.0;
        for (name, weight) in weights {
            match attributes.get(name) {
                Some(value) => {
                    cost += weight * value;
                    if spec.trace && !quiet {
                        trace!(
                            supply_mode = %self.supply_mode_name(supply_mode),
                            attribute = %name,
                            weight,
                            value,
                            "cost term"
                        );
                    }
                }
                None => {
                    warn!(
                        supply_mode = %self.supply_mode_name(supply_mode),
                        attribute = %name,
                        "weight has no matching attribute"
                    );
                }
            }
        }
        if spec.trace && !quiet {
            trace!(supply_mode = %self.supply_mode_name(supply_mode), cost, "segment tallied");
        }
        cost
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockLookup;
    use super::*;
    use crate::domain::Direction;

    fn spec() -> PathSpec {
        PathSpec::new(Direction::Outbound, 510.0)
    }

    #[test]
    fn tally_sums_weighted_attributes() {
        let lookup = MockLookup::new();
        let weights = NamedWeights::from([
            ("time_min".to_string(), 2.0),
            ("penalty".to_string(), 10.0),
        ]);
        let attributes = Attributes::from([
            ("time_min".to_string(), 7.5),
            ("penalty".to_string(), 1.0),
        ]);

        let cost = lookup.tally_cost(1, &spec(), &weights, &attributes, true);
        assert_eq!(cost, 2.0 * 7.5 + 10.0);
    }

    #[test]
    fn tally_skips_missing_attributes() {
        let lookup = MockLookup::new();
        let weights = NamedWeights::from([
            ("time_min".to_string(), 2.0),
            ("not_supplied".to_string(), 99.0),
        ]);
        let attributes = Attributes::from([("time_min".to_string(), 3.0)]);

        let cost = lookup.tally_cost(1, &spec(), &weights, &attributes, true);
        assert_eq!(cost, 6.0);
    }

    #[test]
    fn tally_of_empty_weights_is_zero() {
        let lookup = MockLookup::new();
        let cost = lookup.tally_cost(1, &spec(), &NamedWeights::new(), &Attributes::new(), true);
        assert_eq!(cost, 0.0);
    }
}

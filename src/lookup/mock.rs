//! In-memory mock lookup for tests and development.
//!
//! Lets the itinerary core be driven without real schedule or weight
//! tables: populate exactly the entries a scenario needs, optionally
//! with catch-all defaults, and every query is answered from memory.

use std::collections::HashMap;

use crate::domain::{Minutes, Mode, StopId, SupplyModeId, TripId};

use super::{Attributes, CostLookup, LookupError, NamedWeights, TripInfo};

type WeightKey = (String, String, Mode, String, SupplyModeId);

/// Mock [`CostLookup`] backed by hash maps.
///
/// Built with chained `with_*` calls:
///
/// ```
/// use assign_core::domain::{StopId, TripId};
/// use assign_core::lookup::mock::MockLookup;
/// use assign_core::lookup::CostLookup;
///
/// let lookup = MockLookup::new()
///     .with_departure(TripId(12), StopId(3), 1, 480.0)
///     .with_occupancy(TripId(12), 1, -4.0);
///
/// assert_eq!(
///     lookup.scheduled_departure(TripId(12), StopId(3), 1).unwrap(),
///     480.0
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockLookup {
    departures: HashMap<(TripId, StopId), Vec<(i32, Minutes)>>,
    weights: HashMap<WeightKey, NamedWeights>,
    default_weights: Option<NamedWeights>,
    access: HashMap<(StopId, SupplyModeId, StopId), Attributes>,
    default_access: Option<Attributes>,
    transfers: HashMap<(StopId, StopId), Attributes>,
    default_transfer: Option<Attributes>,
    trips: HashMap<TripId, TripInfo>,
    occupancy: HashMap<(TripId, i32), f64>,
    transfer_mode: SupplyModeId,
    stop_names: HashMap<StopId, String>,
    trip_names: HashMap<TripId, String>,
}

impl MockLookup {
    /// Empty mock: every non-defaulted query fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one scheduled departure entry.
    pub fn with_departure(mut self, trip: TripId, stop: StopId, seq: i32, depart: Minutes) -> Self {
        self.departures
            .entry((trip, stop))
            .or_default()
            .push((seq, depart));
        self
    }

    /// Add a weight row for one demand segmentation.
    pub fn with_weights(
        mut self,
        user_class: &str,
        purpose: &str,
        mode: Mode,
        demand_mode: &str,
        supply_mode: SupplyModeId,
        weights: NamedWeights,
    ) -> Self {
        self.weights.insert(
            (
                user_class.to_string(),
                purpose.to_string(),
                mode,
                demand_mode.to_string(),
                supply_mode,
            ),
            weights,
        );
        self
    }

    /// Weight row returned for any segmentation without a specific one.
    pub fn with_default_weights(mut self, weights: NamedWeights) -> Self {
        self.default_weights = Some(weights);
        self
    }

    /// Add an access/egress attribute vector.
    pub fn with_access_attributes(
        mut self,
        zone: StopId,
        supply_mode: SupplyModeId,
        stop: StopId,
        attributes: Attributes,
    ) -> Self {
        self.access.insert((zone, supply_mode, stop), attributes);
        self
    }

    /// Attributes returned for any access query without a specific
    /// entry.
    pub fn with_default_access_attributes(mut self, attributes: Attributes) -> Self {
        self.default_access = Some(attributes);
        self
    }

    /// Add a transfer attribute vector for a stop pair.
    pub fn with_transfer_attributes(
        mut self,
        from: StopId,
        to: StopId,
        attributes: Attributes,
    ) -> Self {
        self.transfers.insert((from, to), attributes);
        self
    }

    /// Attributes returned for any transfer query without a specific
    /// entry.
    pub fn with_default_transfer_attributes(mut self, attributes: Attributes) -> Self {
        self.default_transfer = Some(attributes);
        self
    }

    /// Register a scheduled trip's supply mode and base attributes.
    pub fn with_trip(mut self, trip: TripId, info: TripInfo) -> Self {
        self.trips.insert(trip, info);
        self
    }

    /// Set the occupancy margin at one trip/sequence.
    pub fn with_occupancy(mut self, trip: TripId, seq: i32, margin: f64) -> Self {
        self.occupancy.insert((trip, seq), margin);
        self
    }

    /// Supply mode used to price transfer walks.
    pub fn with_transfer_supply_mode(mut self, mode: SupplyModeId) -> Self {
        self.transfer_mode = mode;
        self
    }

    /// Human-readable stop name for reports.
    pub fn with_stop_name(mut self, stop: StopId, name: &str) -> Self {
        self.stop_names.insert(stop, name.to_string());
        self
    }

    /// Human-readable trip name for reports.
    pub fn with_trip_name(mut self, trip: TripId, name: &str) -> Self {
        self.trip_names.insert(trip, name.to_string());
        self
    }
}

impl CostLookup for MockLookup {
    fn scheduled_departure(
        &self,
        trip: TripId,
        stop: StopId,
        seq: i32,
    ) -> Result<Minutes, LookupError> {
        let entries = self
            .departures
            .get(&(trip, stop))
            .ok_or(LookupError::UnknownDeparture { trip, stop, seq })?;
        entries
            .iter()
            .find(|(entry_seq, _)| seq < 0 || *entry_seq == seq)
            .map(|(_, depart)| *depart)
            .ok_or(LookupError::UnknownDeparture { trip, stop, seq })
    }

    fn named_weights(
        &self,
        user_class: &str,
        purpose: &str,
        mode: Mode,
        demand_mode: &str,
        supply_mode: SupplyModeId,
    ) -> Result<NamedWeights, LookupError> {
        let key = (
            user_class.to_string(),
            purpose.to_string(),
            mode,
            demand_mode.to_string(),
            supply_mode,
        );
        self.weights
            .get(&key)
            .or(self.default_weights.as_ref())
            .cloned()
            .ok_or_else(|| LookupError::UnknownWeights {
                user_class: user_class.to_string(),
                purpose: purpose.to_string(),
                mode,
                demand_mode: demand_mode.to_string(),
            })
    }

    fn access_attributes(
        &self,
        zone: StopId,
        supply_mode: SupplyModeId,
        stop: StopId,
    ) -> Result<Attributes, LookupError> {
        self.access
            .get(&(zone, supply_mode, stop))
            .or(self.default_access.as_ref())
            .cloned()
            .ok_or(LookupError::UnknownAccess { zone, stop })
    }

    fn transfer_attributes(&self, from: StopId, to: StopId) -> Result<Attributes, LookupError> {
        self.transfers
            .get(&(from, to))
            .or(self.default_transfer.as_ref())
            .cloned()
            .ok_or(LookupError::UnknownTransfer { from, to })
    }

    fn trip_info(&self, trip: TripId) -> Result<TripInfo, LookupError> {
        self.trips
            .get(&trip)
            .cloned()
            .ok_or(LookupError::UnknownTrip(trip))
    }

    fn occupancy_margin(&self, trip: TripId, seq: i32) -> Result<f64, LookupError> {
        // Absent occupancy data means seats remain.
        Ok(self.occupancy.get(&(trip, seq)).copied().unwrap_or(-1.0))
    }

    fn transfer_supply_mode(&self) -> SupplyModeId {
        self.transfer_mode
    }

    fn stop_name(&self, stop: StopId) -> String {
        self.stop_names
            .get(&stop)
            .cloned()
            .unwrap_or_else(|| stop.to_string())
    }

    fn trip_name(&self, trip: TripId) -> String {
        self.trip_names
            .get(&trip)
            .cloned()
            .unwrap_or_else(|| trip.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn departure_matches_sequence() {
        let lookup = MockLookup::new()
            .with_departure(TripId(1), StopId(10), 1, 480.0)
            .with_departure(TripId(1), StopId(10), 4, 540.0);

        assert_eq!(
            lookup.scheduled_departure(TripId(1), StopId(10), 4).unwrap(),
            540.0
        );
    }

    #[test]
    fn negative_sequence_is_wildcard() {
        let lookup = MockLookup::new()
            .with_departure(TripId(1), StopId(10), 2, 495.0)
            .with_departure(TripId(1), StopId(10), 5, 555.0);

        assert_eq!(
            lookup.scheduled_departure(TripId(1), StopId(10), -1).unwrap(),
            495.0
        );
    }

    #[test]
    fn unknown_departure_errors() {
        let lookup = MockLookup::new().with_departure(TripId(1), StopId(10), 1, 480.0);

        assert!(matches!(
            lookup.scheduled_departure(TripId(2), StopId(10), 1),
            Err(LookupError::UnknownDeparture { .. })
        ));
        assert!(matches!(
            lookup.scheduled_departure(TripId(1), StopId(10), 9),
            Err(LookupError::UnknownDeparture { .. })
        ));
    }

    #[test]
    fn default_weights_fall_through() {
        let defaults = NamedWeights::from([("time_min".to_string(), 1.0)]);
        let specific = NamedWeights::from([("time_min".to_string(), 2.5)]);
        let lookup = MockLookup::new()
            .with_default_weights(defaults.clone())
            .with_weights("commuter", "work", Mode::Trip, "transit", 7, specific.clone());

        assert_eq!(
            lookup
                .named_weights("commuter", "work", Mode::Trip, "transit", 7)
                .unwrap(),
            specific
        );
        assert_eq!(
            lookup
                .named_weights("visitor", "leisure", Mode::Access, "walk", 1)
                .unwrap(),
            defaults
        );
    }

    #[test]
    fn missing_weights_error_without_default() {
        let lookup = MockLookup::new();
        assert!(matches!(
            lookup.named_weights("c", "p", Mode::Egress, "walk", 1),
            Err(LookupError::UnknownWeights { .. })
        ));
    }

    #[test]
    fn occupancy_defaults_to_seats_remaining() {
        let lookup = MockLookup::new().with_occupancy(TripId(3), 2, 1.5);

        assert_eq!(lookup.occupancy_margin(TripId(3), 2).unwrap(), 1.5);
        assert_eq!(lookup.occupancy_margin(TripId(3), 9).unwrap(), -1.0);
    }

    #[test]
    fn names_fall_back_to_ids() {
        let lookup = MockLookup::new()
            .with_stop_name(StopId(4), "Civic Center")
            .with_trip_name(TripId(9), "Blue 9");

        assert_eq!(lookup.stop_name(StopId(4)), "Civic Center");
        assert_eq!(lookup.stop_name(StopId(5)), "5");
        assert_eq!(lookup.trip_name(TripId(9)), "Blue 9");
        assert_eq!(lookup.trip_name(TripId(1)), "1");
    }
}

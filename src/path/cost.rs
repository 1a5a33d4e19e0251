//! Generalized-cost recomputation.
//!
//! While a path is being grown the running cost is only provisional:
//! append-time fix-ups retime segments after their costs were first
//! guessed. Once the path spans origin to destination the cost is
//! re-derived here, segment by segment in true chronological order,
//! from nothing but the final timing and identity fields — so the same
//! sequence always tallies to the same cost.

use tracing::trace;

use crate::domain::{Direction, Minutes, Mode, PathSpec};
use crate::lookup::{
    ATTR_AT_CAPACITY, ATTR_IN_VEHICLE_TIME, ATTR_OVERCAP, ATTR_PREFERRED_DELAY, ATTR_WAIT_TIME,
    CostLookup, LookupError,
};

use super::Path;

impl Path {
    /// Re-derive every segment's cost and the path total.
    ///
    /// Traverses the links in real-world chronological order regardless
    /// of append order, writing each segment's `segment_cost` and
    /// `running_cost` back and returning the new total. The sequence is
    /// assumed structurally valid; recomputing an infeasible path is
    /// well-defined but meaningless. Idempotent for an unchanged
    /// sequence and lookup state.
    ///
    /// `quiet` suppresses the per-term trace output without affecting
    /// the result.
    pub fn recompute_cost<L: CostLookup>(
        &mut self,
        spec: &PathSpec,
        lookup: &L,
        quiet: bool,
    ) -> Result<f64, LookupError> {
        if self.links.is_empty() {
            self.total_cost = 0.0;
            return Ok(0.0);
        }

        let chronological = self.chronological_order();
        if spec.trace && !quiet {
            trace!(
                chronological,
                path = %self.render(lookup),
                "recomputing path cost"
            );
        }

        let len = self.links.len();
        let mut total = 0.0;
        for position in 0..len {
            let index = if chronological { position } else { len - 1 - position };
            let cost = self.segment_cost_at(index, spec, lookup, quiet)?;
            let (_, seg) = &mut self.links[index];
            seg.segment_cost = cost;
            total += cost;
            seg.running_cost = total;
        }
        self.total_cost = total;

        if spec.trace && !quiet {
            trace!(cost = total, path = %self.render(lookup), "path cost recomputed");
        }
        Ok(total)
    }

    /// Tally the cost of the link at `index` from its current timing
    /// and identity fields.
    fn segment_cost_at<L: CostLookup>(
        &self,
        index: usize,
        spec: &PathSpec,
        lookup: &L,
        quiet: bool,
    ) -> Result<f64, LookupError> {
        let (stop, seg) = &self.links[index];
        let direction = self.direction;

        match seg.mode {
            Mode::Access => {
                // The preference penalty anchors to the origin
                // departure for inbound requests only.
                let origin_departure: Minutes = match direction {
                    Direction::Outbound => seg.chronological_departure(direction),
                    Direction::Inbound => seg.chronological_arrival(direction) - seg.duration,
                };
                let delay = match direction {
                    Direction::Outbound => 0.0,
                    Direction::Inbound => origin_departure - spec.preferred_time,
                };
                let board_stop = match direction {
                    Direction::Outbound => seg.other_stop,
                    Direction::Inbound => *stop,
                };
                let supply_mode = seg.trip.as_supply_mode();
                let weights = lookup.named_weights(
                    &spec.user_class,
                    &spec.purpose,
                    Mode::Access,
                    &spec.access_mode,
                    supply_mode,
                )?;
                let mut attributes =
                    lookup.access_attributes(spec.origin, supply_mode, board_stop)?;
                attributes.insert(ATTR_PREFERRED_DELAY.to_string(), delay);
                Ok(lookup.tally_cost(supply_mode, spec, &weights, &attributes, quiet))
            }

            Mode::Egress => {
                // Mirror of access: the penalty anchors to the
                // destination arrival for outbound requests only.
                let destination_arrival: Minutes = match direction {
                    Direction::Outbound => seg.chronological_departure(direction) + seg.duration,
                    Direction::Inbound => seg.chronological_arrival(direction),
                };
                let delay = match direction {
                    Direction::Outbound => spec.preferred_time - destination_arrival,
                    Direction::Inbound => 0.0,
                };
                let alight_stop = match direction {
                    Direction::Outbound => *stop,
                    Direction::Inbound => seg.other_stop,
                };
                let supply_mode = seg.trip.as_supply_mode();
                let weights = lookup.named_weights(
                    &spec.user_class,
                    &spec.purpose,
                    Mode::Egress,
                    &spec.egress_mode,
                    supply_mode,
                )?;
                let mut attributes =
                    lookup.access_attributes(spec.destination, supply_mode, alight_stop)?;
                attributes.insert(ATTR_PREFERRED_DELAY.to_string(), delay);
                Ok(lookup.tally_cost(supply_mode, spec, &weights, &attributes, quiet))
            }

            Mode::Transfer => {
                let (from, to) = match direction {
                    Direction::Outbound => (*stop, seg.other_stop),
                    Direction::Inbound => (seg.other_stop, *stop),
                };
                let attributes = lookup.transfer_attributes(from, to)?;
                let transfer_mode = lookup.transfer_supply_mode();
                let weights = lookup.named_weights(
                    &spec.user_class,
                    &spec.purpose,
                    Mode::Transfer,
                    "transfer",
                    transfer_mode,
                )?;
                Ok(lookup.tally_cost(transfer_mode, spec, &weights, &attributes, quiet))
            }

            Mode::Trip => {
                let in_vehicle =
                    seg.chronological_arrival(direction) - seg.chronological_departure(direction);
                let wait = seg.duration - in_vehicle;

                let info = lookup.trip_info(seg.trip)?;
                let weights = lookup.named_weights(
                    &spec.user_class,
                    &spec.purpose,
                    Mode::Trip,
                    &spec.transit_mode,
                    info.supply_mode,
                )?;
                let mut attributes = info.attributes;
                attributes.insert(ATTR_IN_VEHICLE_TIME.to_string(), in_vehicle);
                attributes.insert(ATTR_WAIT_TIME.to_string(), wait);

                // The margin's sign decides the indicator before the
                // margin itself is clamped to non-negative.
                let margin = lookup.occupancy_margin(seg.trip, seg.seq)?;
                attributes.insert(
                    ATTR_AT_CAPACITY.to_string(),
                    if margin >= 0.0 { 1.0 } else { 0.0 },
                );
                attributes.insert(ATTR_OVERCAP.to_string(), margin.max(0.0));

                Ok(lookup.tally_cost(info.supply_mode, spec, &weights, &attributes, quiet))
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Phase, Segment, StopId, TripId};
    use crate::lookup::mock::MockLookup;
    use crate::lookup::{Attributes, NamedWeights, TripInfo};
    use proptest::prelude::*;

    fn lookup() -> MockLookup {
        let mut mock = MockLookup::new()
            .with_default_weights(NamedWeights::from([
                ("walk_time_min".to_string(), 1.0),
                (ATTR_IN_VEHICLE_TIME.to_string(), 1.0),
                (ATTR_WAIT_TIME.to_string(), 2.0),
                (ATTR_PREFERRED_DELAY.to_string(), 0.1),
                (ATTR_AT_CAPACITY.to_string(), 5.0),
            ]))
            .with_default_access_attributes(Attributes::from([(
                "walk_time_min".to_string(),
                8.0,
            )]))
            .with_default_transfer_attributes(Attributes::from([(
                "walk_time_min".to_string(),
                4.0,
            )]));
        for trip in 0..4 {
            mock = mock.with_trip(
                TripId(trip),
                TripInfo {
                    supply_mode: trip + 100,
                    attributes: Attributes::new(),
                },
            );
        }
        mock
    }

    fn mode_strategy() -> impl Strategy<Value = Mode> {
        prop_oneof![
            Just(Mode::Access),
            Just(Mode::Egress),
            Just(Mode::Transfer),
            Just(Mode::Trip),
        ]
    }

    fn segment_strategy() -> impl Strategy<Value = Segment> {
        (
            mode_strategy(),
            0i32..4,
            0u16..1440,
            0u16..1440,
            0u16..120,
            0i32..40,
            0i32..10,
        )
            .prop_map(|(mode, trip, a, b, duration, other_stop, seq)| {
                let mut seg =
                    Segment::new(mode, TripId(trip), f64::from(a), f64::from(b), f64::from(duration));
                seg.other_stop = StopId(other_stop);
                seg.seq = seq;
                seg
            })
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Outbound), Just(Direction::Inbound)]
    }

    fn phase_strategy() -> impl Strategy<Value = Phase> {
        prop_oneof![Just(Phase::Labeling), Just(Phase::Enumerating)]
    }

    fn path_strategy() -> impl Strategy<Value = Path> {
        (
            direction_strategy(),
            phase_strategy(),
            prop::collection::vec((0i32..60, segment_strategy()), 0..8),
        )
            .prop_map(|(direction, phase, links)| {
                let mut path = Path::new(direction, phase);
                for (stop, seg) in links {
                    path.links.push((StopId(stop), seg));
                }
                path
            })
    }

    proptest! {
        #[test]
        fn recompute_is_idempotent(mut path in path_strategy()) {
            let spec = PathSpec::new(path.direction(), 510.0);
            let lookup = lookup();

            let first = path.recompute_cost(&spec, &lookup, true).unwrap();
            let snapshot: Vec<(f64, f64)> = path
                .links()
                .map(|(_, seg)| (seg.segment_cost, seg.running_cost))
                .collect();

            let second = path.recompute_cost(&spec, &lookup, true).unwrap();
            let again: Vec<(f64, f64)> = path
                .links()
                .map(|(_, seg)| (seg.segment_cost, seg.running_cost))
                .collect();

            prop_assert_eq!(first.to_bits(), second.to_bits());
            prop_assert_eq!(snapshot, again);
        }

        #[test]
        fn total_is_the_sum_of_segment_costs(mut path in path_strategy()) {
            let spec = PathSpec::new(path.direction(), 510.0);
            let total = path.recompute_cost(&spec, &lookup(), true).unwrap();

            let sum: f64 = path.links().map(|(_, seg)| seg.segment_cost).sum();
            prop_assert!((total - sum).abs() < 1e-9);
            prop_assert_eq!(path.total_cost(), total);
        }
    }
}

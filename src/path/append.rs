//! Appending segments with neighbour fix-up.
//!
//! The search proposes segments in label order, which only sometimes
//! matches travel order, and a segment's final timing is often not
//! known until its neighbour is chosen: an access walk must be retimed
//! to catch the vehicle exactly, a transfer's wait is only known once
//! the earlier trip is picked, and so on. Appending therefore repairs
//! the timing of the segment(s) already in the path as well as the new
//! one, and reports infeasible orderings through its return value
//! rather than failing.

use tracing::trace;

use crate::domain::{Mode, PathSpec, Segment, StopId};
use crate::lookup::{CostLookup, LookupError};

use super::Path;

impl Path {
    /// Append one segment, fixing up timing on the new segment and its
    /// already-placed neighbours.
    ///
    /// Returns `Ok(false)` when the resulting ordering is temporally
    /// infeasible (negative ride or wait time, or boarding before
    /// arriving); the segment is still appended so the caller can
    /// inspect or discard the partial path. The caller-supplied
    /// `segment_cost` is accumulated as a provisional running cost;
    /// [`Path::recompute_cost`] establishes the authoritative one.
    ///
    /// Schedule lookups needed by the fix-up can fail; in that case the
    /// path is left unchanged.
    pub fn append<L: CostLookup>(
        &mut self,
        stop: StopId,
        segment: Segment,
        spec: &PathSpec,
        lookup: &L,
    ) -> Result<bool, LookupError> {
        let mut seg = segment;
        let mut feasible = true;

        if let Some((_, prev)) = self.links.last() {
            if spec.trace {
                trace!(
                    direction = %self.direction,
                    phase = %self.phase,
                    chronological = self.chronological_order(),
                    size = self.links.len(),
                    prev_mode = %prev.mode,
                    stop = %stop,
                    mode = %seg.mode,
                    path = %self.render(lookup),
                    "fixing up append"
                );
            }

            feasible = if self.chronological_order() {
                self.fix_up_chronological(stop, &mut seg, lookup)?
            } else {
                self.fix_up_reverse(&mut seg, lookup)?
            };
        }

        self.total_cost += seg.segment_cost;
        seg.running_cost = self.total_cost;
        self.links.push((stop, seg));

        if spec.trace {
            trace!(
                stop = %stop,
                feasible,
                total_cost = self.total_cost,
                size = self.links.len(),
                path = %self.render(lookup),
                "segment appended"
            );
        }
        Ok(feasible)
    }

    /// Fix-up for a segment whose time window follows the previous
    /// link's in real time.
    fn fix_up_chronological<L: CostLookup>(
        &mut self,
        stop: StopId,
        seg: &mut Segment,
        lookup: &L,
    ) -> Result<bool, LookupError> {
        let direction = self.direction;
        let outbound = direction.is_outbound();
        let mut feasible = true;

        // Invariant: callers only dispatch here with a non-empty path.
        let Some((_, prev)) = self.links.last_mut() else {
            return Ok(true);
        };

        if prev.mode == Mode::Access {
            // Retime the access walk to catch the vehicle exactly:
            // leave the origin as late as possible, zero wait.
            let board_stop = if outbound { stop } else { seg.other_stop };
            let board_seq = if outbound { seg.seq } else { seg.other_seq };
            let depart = lookup.scheduled_departure(seg.trip, board_stop, board_seq)?;

            prev.set_chronological_arrival(direction, depart);
            let walk = prev.duration;
            prev.set_chronological_departure(direction, depart - walk);
            seg.duration =
                seg.chronological_arrival(direction) - seg.chronological_departure(direction);
        } else if seg.mode == Mode::Trip {
            // Ride time spans from the previous arrival, folding the
            // wait into this segment. Boarding cannot precede arrival.
            let prev_arrival = prev.chronological_arrival(direction);
            seg.duration = seg.chronological_arrival(direction) - prev_arrival;
            if seg.duration < 0.0 {
                feasible = false;
            }
            if seg.chronological_departure(direction) < prev_arrival {
                feasible = false;
            }
        } else if seg.mode == Mode::Transfer || seg.mode == Mode::Egress {
            // Start walking immediately on arrival.
            let depart = prev.chronological_arrival(direction);
            seg.set_chronological_departure(direction, depart);
            seg.set_chronological_arrival(direction, depart + seg.duration);
        }

        Ok(feasible)
    }

    /// Fix-up for a segment whose time window precedes the previous
    /// link's; the path is growing backward in time
    /// (egress, trip, [transfer, trip]*, access).
    fn fix_up_reverse<L: CostLookup>(
        &mut self,
        seg: &mut Segment,
        lookup: &L,
    ) -> Result<bool, LookupError> {
        let direction = self.direction;
        let outbound = direction.is_outbound();
        let mut feasible = true;
        let prev_index = self.links.len() - 1;

        if seg.mode == Mode::Access {
            // The previously placed link is the first vehicle trip;
            // retime the access walk to catch it exactly, and settle
            // the trip's own span now that its boarding is final.
            let (_, prev) = &mut self.links[prev_index];
            let board_stop = if outbound { seg.other_stop } else { prev.other_stop };
            let board_seq = if outbound { prev.seq } else { prev.other_seq };
            let depart = lookup.scheduled_departure(prev.trip, board_stop, board_seq)?;

            seg.set_chronological_arrival(direction, depart);
            seg.set_chronological_departure(direction, depart - seg.duration);
            prev.duration =
                prev.chronological_arrival(direction) - prev.chronological_departure(direction);
        } else if seg.mode == Mode::Trip {
            // Chosen in reverse, so assume zero wait for now; later
            // choices reveal the real wait.
            seg.duration =
                seg.chronological_arrival(direction) - seg.chronological_departure(direction);

            if self.links[prev_index].1.mode == Mode::Transfer {
                // The wait is now known: walk right after alighting,
                // then hand the remaining wait to the trip placed
                // before the transfer.
                let new_arrival = seg.chronological_arrival(direction);
                let transfer_arrival = {
                    let (_, transfer) = &mut self.links[prev_index];
                    transfer.set_chronological_departure(direction, new_arrival);
                    let arrival = new_arrival + transfer.duration;
                    transfer.set_chronological_arrival(direction, arrival);
                    arrival
                };

                if let Some(earlier_index) = prev_index.checked_sub(1) {
                    let (_, earlier) = &mut self.links[earlier_index];
                    if earlier.chronological_departure(direction) < transfer_arrival {
                        feasible = false;
                    }
                    earlier.duration =
                        earlier.chronological_arrival(direction) - transfer_arrival;
                    if earlier.duration < 0.0 {
                        feasible = false;
                    }
                }
            }
        } else if seg.mode == Mode::Transfer {
            // Transfer as late as possible to keep earlier trips open.
            let prev_departure = self.links[prev_index].1.chronological_departure(direction);
            seg.set_chronological_arrival(direction, prev_departure);
            seg.set_chronological_departure(direction, prev_departure - seg.duration);
        }

        // An egress placed previously always trails the newest
        // boundary, whatever the new segment is.
        if self.links[prev_index].1.mode == Mode::Egress {
            let new_arrival = seg.chronological_arrival(direction);
            let (_, prev) = &mut self.links[prev_index];
            prev.set_chronological_departure(direction, new_arrival);
            prev.set_chronological_arrival(direction, new_arrival + prev.duration);
        }

        Ok(feasible)
    }
}

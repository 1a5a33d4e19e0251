//! The path aggregate.
//!
//! A [`Path`] owns an ordered sequence of `(location, Segment)` links in
//! *append order*, which matches real-world chronological order only for
//! some direction/phase combinations. Appending repairs neighbouring
//! segments as new timing constraints come to light
//! ([`Path::append`]), costing re-derives every segment's generalized
//! cost from its final timing ([`Path::recompute_cost`]), and
//! [`Path::compare`] gives the deterministic ranking order used to
//! select among candidates.

mod append;
mod cost;

use std::cmp::Ordering;
use std::fmt::Write as _;
use std::ops::Index;

use serde::Serialize;

use crate::domain::{Direction, Mode, Phase, Segment, StopId, format_hhmm};
use crate::lookup::CostLookup;

/// One traveler's itinerary under construction.
#[derive(Debug, Clone, Serialize)]
pub struct Path {
    direction: Direction,
    phase: Phase,
    links: Vec<(StopId, Segment)>,
    total_cost: f64,
    capacity_constrained: bool,
}

impl Path {
    /// Create an empty path for the given direction and search phase.
    pub fn new(direction: Direction, phase: Phase) -> Self {
        Self {
            direction,
            phase,
            links: Vec::new(),
            total_cost: 0.0,
            capacity_constrained: false,
        }
    }

    /// Travel direction this path is being built for.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Search phase this path is being built in.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of links in the path.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True if no segment has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Current generalized cost: provisional while appending,
    /// authoritative after [`Path::recompute_cost`].
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Link at `index` in append order.
    pub fn get(&self, index: usize) -> Option<&(StopId, Segment)> {
        self.links.get(index)
    }

    /// Most recently appended link.
    pub fn last(&self) -> Option<&(StopId, Segment)> {
        self.links.last()
    }

    /// All links in append order.
    pub fn links(&self) -> impl Iterator<Item = &(StopId, Segment)> {
        self.links.iter()
    }

    /// Discard all segments so the path can be rebuilt.
    pub fn clear(&mut self) {
        self.links.clear();
        self.total_cost = 0.0;
        self.capacity_constrained = false;
    }

    /// Whether this path was constrained by vehicle occupancy.
    ///
    /// Informational, set by the capacity layer of the enclosing
    /// system; the core never writes it outside [`Path::clear`].
    pub fn capacity_constrained(&self) -> bool {
        self.capacity_constrained
    }

    /// Mark this path as capacity-constrained.
    pub fn set_capacity_constrained(&mut self, constrained: bool) {
        self.capacity_constrained = constrained;
    }

    /// True when segments are being appended in real-world
    /// chronological order.
    ///
    /// The search direction and the phase are independent: inbound
    /// labeling and outbound enumeration both grow paths forward in
    /// time, the other two combinations grow them backward.
    pub fn chronological_order(&self) -> bool {
        matches!(
            (self.direction, self.phase),
            (Direction::Inbound, Phase::Labeling) | (Direction::Outbound, Phase::Enumerating)
        )
    }

    /// Total ranking order over candidate paths.
    ///
    /// Cheapest first; equal costs prefer fewer links; remaining ties
    /// break on the per-link `(location, mode, trip)` keys so a path
    /// set sorts reproducibly for selection and deduplication.
    pub fn compare(&self, other: &Path) -> Ordering {
        self.total_cost
            .total_cmp(&other.total_cost)
            .then_with(|| self.links.len().cmp(&other.links.len()))
            .then_with(|| {
                for ((stop_a, seg_a), (stop_b, seg_b)) in self.links.iter().zip(&other.links) {
                    let key = (stop_a, seg_a.mode, seg_a.trip).cmp(&(stop_b, seg_b.mode, seg_b.trip));
                    if key != Ordering::Equal {
                        return key;
                    }
                }
                Ordering::Equal
            })
    }

    /// Render the full link table for tracing and debug display.
    ///
    /// An empty path renders the header line only.
    pub fn render<L: CostLookup>(&self, lookup: &L) -> String {
        let mut out = String::from(
            "      stop      mode      trip  depart  arrive      dur     cost    total\n",
        );
        for (stop, seg) in &self.links {
            let _ = writeln!(
                out,
                "{:>10} {:>9} {:>9}   {}   {} {:>8.2} {:>8.2} {:>8.2}",
                lookup.stop_name(*stop),
                seg.mode,
                lookup.trip_name(seg.trip),
                format_hhmm(seg.chronological_departure(self.direction)),
                format_hhmm(seg.chronological_arrival(self.direction)),
                seg.duration,
                seg.segment_cost,
                seg.running_cost,
            );
        }
        out
    }

    /// Condensed "board stops / trips / alight stops" summary of the
    /// vehicle legs, in travel order. An empty path summarises as
    /// `no_path`.
    pub fn compact_summary<L: CostLookup>(&self, lookup: &L) -> String {
        if self.links.is_empty() {
            return "no_path".to_string();
        }

        let mut boards = Vec::new();
        let mut trips = Vec::new();
        let mut alights = Vec::new();

        let indices: Vec<usize> = if self.direction.is_outbound() {
            (0..self.links.len()).collect()
        } else {
            (0..self.links.len()).rev().collect()
        };

        for index in indices {
            let (stop, seg) = &self.links[index];
            if seg.mode != Mode::Trip {
                continue;
            }
            let (board, alight) = if self.direction.is_outbound() {
                (*stop, seg.other_stop)
            } else {
                (seg.other_stop, *stop)
            };
            boards.push(lookup.stop_name(board));
            trips.push(lookup.trip_name(seg.trip));
            alights.push(lookup.stop_name(alight));
        }

        format!(
            "{} {} {}",
            boards.join(","),
            trips.join(","),
            alights.join(",")
        )
    }
}

impl Index<usize> for Path {
    type Output = (StopId, Segment);

    fn index(&self, index: usize) -> &Self::Output {
        &self.links[index]
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Mode, TripId};
    use proptest::prelude::*;

    fn mode_strategy() -> impl Strategy<Value = Mode> {
        prop_oneof![
            Just(Mode::Access),
            Just(Mode::Egress),
            Just(Mode::Transfer),
            Just(Mode::Trip),
        ]
    }

    fn path_strategy() -> impl Strategy<Value = Path> {
        (
            0.0f64..100.0,
            prop::collection::vec((0i32..5, mode_strategy(), 0i32..5), 0..5),
        )
            .prop_map(|(cost, keys)| {
                let mut path = Path::new(Direction::Outbound, Phase::Enumerating);
                for (stop, mode, trip) in keys {
                    path.links
                        .push((StopId(stop), Segment::new(mode, TripId(trip), 0.0, 0.0, 0.0)));
                }
                path.total_cost = cost;
                path
            })
    }

    proptest! {
        #[test]
        fn compare_is_reflexively_equal(path in path_strategy()) {
            prop_assert_eq!(path.compare(&path), Ordering::Equal);
        }

        #[test]
        fn compare_is_antisymmetric(a in path_strategy(), b in path_strategy()) {
            prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
        }

        #[test]
        fn compare_is_transitive(
            a in path_strategy(),
            b in path_strategy(),
            c in path_strategy(),
        ) {
            if a.compare(&b) != Ordering::Greater && b.compare(&c) != Ordering::Greater {
                prop_assert_ne!(a.compare(&c), Ordering::Greater);
            }
        }

        #[test]
        fn sorting_by_compare_puts_cheapest_first(paths in prop::collection::vec(path_strategy(), 0..12)) {
            let mut sorted = paths;
            sorted.sort_by(Path::compare);

            for window in sorted.windows(2) {
                prop_assert!(window[0].total_cost() <= window[1].total_cost());
            }
        }
    }
}

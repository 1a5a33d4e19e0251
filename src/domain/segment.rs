//! The segment record: one travel leg as proposed by the search.

use serde::{Deserialize, Serialize};

use super::{Direction, Minutes, Mode, StopId, TripId};

/// One candidate travel segment.
///
/// Segments arrive from the search procedure with *direction-relative*
/// timing: `stop_time` is the time at the location the segment is filed
/// under and `other_time` the time at its counterpart location. On an
/// outbound path the pair reads (departure, arrival); on an inbound
/// path it reads (arrival, departure). Use
/// [`chronological_departure`](Segment::chronological_departure) and
/// [`chronological_arrival`](Segment::chronological_arrival) rather
/// than interpreting the raw fields.
///
/// # Examples
///
/// ```
/// use assign_core::domain::{Direction, Mode, Segment, TripId};
///
/// let trip = Segment::new(Mode::Trip, TripId(12), 480.0, 500.0, 20.0);
///
/// assert_eq!(trip.chronological_departure(Direction::Outbound), 480.0);
/// assert_eq!(trip.chronological_arrival(Direction::Outbound), 500.0);
/// // The same record filed inbound reads the pair the other way round.
/// assert_eq!(trip.chronological_departure(Direction::Inbound), 500.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// What kind of travel this segment is.
    pub mode: Mode,

    /// The scheduled trip ridden, or the walking supply mode for
    /// access/egress/transfer segments.
    pub trip: TripId,

    /// Direction-relative time at this segment's own location.
    pub stop_time: Minutes,

    /// Direction-relative time at the counterpart location.
    pub other_time: Minutes,

    /// Elapsed minutes attributed to this segment (walk, ride, and any
    /// wait folded in by the append fix-up).
    pub duration: Minutes,

    /// Counterpart stop or zone (successor or predecessor depending on
    /// direction).
    pub other_stop: StopId,

    /// Schedule sequence index at this segment's location.
    pub seq: i32,

    /// Schedule sequence index at the counterpart location.
    pub other_seq: i32,

    /// Generalized cost of this segment alone.
    pub segment_cost: f64,

    /// Cumulative path cost through this segment, assigned on append
    /// and again on recomputation.
    pub running_cost: f64,
}

impl Segment {
    /// Create a segment with the given mode, trip slot and timing;
    /// remaining identity and cost fields start zeroed.
    pub fn new(
        mode: Mode,
        trip: TripId,
        stop_time: Minutes,
        other_time: Minutes,
        duration: Minutes,
    ) -> Self {
        Self {
            mode,
            trip,
            stop_time,
            other_time,
            duration,
            other_stop: StopId(0),
            seq: 0,
            other_seq: 0,
            segment_cost: 0.0,
            running_cost: 0.0,
        }
    }

    /// Real-world departure time of this segment.
    pub fn chronological_departure(&self, direction: Direction) -> Minutes {
        match direction {
            Direction::Outbound => self.stop_time,
            Direction::Inbound => self.other_time,
        }
    }

    /// Real-world arrival time of this segment.
    pub fn chronological_arrival(&self, direction: Direction) -> Minutes {
        match direction {
            Direction::Outbound => self.other_time,
            Direction::Inbound => self.stop_time,
        }
    }

    pub(crate) fn set_chronological_departure(&mut self, direction: Direction, time: Minutes) {
        match direction {
            Direction::Outbound => self.stop_time = time,
            Direction::Inbound => self.other_time = time,
        }
    }

    pub(crate) fn set_chronological_arrival(&mut self, direction: Direction, time: Minutes) {
        match direction {
            Direction::Outbound => self.other_time = time,
            Direction::Inbound => self.stop_time = time,
        }
    }
}

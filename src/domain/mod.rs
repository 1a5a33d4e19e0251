//! Domain types for itinerary assembly.
//!
//! These are the validated building blocks the rest of the crate works
//! with: identifiers, travel modes, the direction-relative segment
//! record, and the per-request path specification.

mod ids;
mod mode;
mod segment;
mod spec;
mod time;

pub use ids::{StopId, SupplyModeId, TripId};
pub use mode::Mode;
pub use segment::Segment;
pub use spec::{Direction, PathSpec, Phase};
pub use time::{Minutes, format_hhmm};

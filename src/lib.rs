//! Itinerary assembly and generalized-cost model for a transit
//! passenger assignment engine.
//!
//! The search procedure that explores the network hands this crate raw
//! travel segments (walk access, scheduled vehicle trips, transfers,
//! walk egress) one at a time, in whatever order its current phase
//! discovers them. The [`path::Path`] aggregate stitches them into a
//! temporally consistent itinerary, repairs neighbouring segments as new
//! timing constraints come to light, reports infeasible orderings, and
//! computes the generalized cost used to rank candidate itineraries.
//!
//! Schedules, weight tables, attribute vectors and occupancy live
//! outside this crate behind the [`lookup::CostLookup`] trait.

pub mod domain;
pub mod lookup;
pub mod path;

//! Journey planner over the indexed network.
//!
//! The facade resolves each endpoint to its nearby stops, looks for
//! single-bus itineraries, falls back to one-transfer itineraries when
//! the direct results leave room, and returns the merged list ranked by
//! total duration.

mod assemble;
mod config;
mod direct;
mod engine;
mod nearby;
mod rank;
mod transfer;

pub use config::PlannerConfig;
pub use engine::{Planner, PlannerStatus};
pub use nearby::{NearbyStop, find_nearby_stops};
pub use rank::rank_itineraries;

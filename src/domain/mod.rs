//! Domain types for the bus journey planner.
//!
//! This module contains the core domain model: the GTFS entities held in
//! the network arenas, the validated internal `Leg`, and the public
//! result records. Types enforce their invariants at construction time,
//! so code that receives them can trust their validity.

mod error;
mod ids;
mod itinerary;
mod leg;
mod point;
mod route;
mod stop;
mod stop_time;
mod time;
mod trip;

pub use error::DomainError;
pub use ids::{RouteIdx, StopIdx, TripIdx};
pub use itinerary::{Itinerary, PathStop, Segment, SegmentKind};
pub use leg::Leg;
pub use point::Point;
pub use route::Route;
pub use stop::Stop;
pub use stop_time::StopTime;
pub use time::{ServiceTime, TimeError};
pub use trip::Trip;

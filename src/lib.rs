//! Bus journey planning engine.
//!
//! Answers: "I'm at this coordinate, how do I get to that coordinate
//! by bus?" over a static GTFS feed, returning up to five ranked
//! itineraries of walk + bus (+ optional transfer) + walk.

pub mod domain;
pub mod feed;
pub mod geo;
pub mod network;
pub mod planner;

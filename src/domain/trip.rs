//! Trip entity.

use super::RouteIdx;

/// One concrete scheduled run of a vehicle along a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// GTFS trip id, unique within the feed.
    pub id: String,
    /// The route this trip belongs to.
    pub route: RouteIdx,
    /// Destination sign text, when the feed provides it.
    pub headsign: Option<String>,
}

//! Nearest-stop search.

use crate::domain::{Point, StopIdx};
use crate::geo;
use crate::network::Network;

/// A stop paired with its distance from a query coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyStop {
    pub stop: StopIdx,
    pub distance_km: f64,
}

/// The `limit` closest stops within `max_km` of `origin`, ascending by
/// distance, ties broken by stop id.
///
/// A linear scan over the stop arena; feeds small enough to plan over
/// in memory are small enough to scan.
pub fn find_nearby_stops(
    network: &Network,
    origin: Point,
    limit: usize,
    max_km: f64,
) -> Vec<NearbyStop> {
    let mut found: Vec<NearbyStop> = network
        .stops()
        .filter_map(|(idx, stop)| {
            let distance_km = geo::distance_km(origin, stop.position());
            (distance_km <= max_km).then_some(NearbyStop {
                stop: idx,
                distance_km,
            })
        })
        .collect();

    // Stop handles order by id, which settles distance ties
    found.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.stop.cmp(&b.stop))
    });
    found.truncate(limit);
    found
}

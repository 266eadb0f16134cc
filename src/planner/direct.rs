//! Direct-route search.
//!
//! Finds single-bus itineraries: a route serving both a pickup-side and
//! a drop-side nearby stop, in the right direction, with a concrete
//! trip that actually makes the run.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::domain::{Leg, RouteIdx};
use crate::network::Network;

use super::nearby::NearbyStop;

/// A single-bus itinerary before assembly.
#[derive(Debug, Clone)]
pub(crate) struct DirectCandidate {
    pub leg: Leg,
    pub pickup: NearbyStop,
    pub drop: NearbyStop,
}

/// Search for up to `max_results` direct candidates.
///
/// Every (pickup stop, drop stop) pair sharing a route is considered,
/// nearest stops first; a pair survives if the pickup precedes the drop
/// in the route's canonical pattern and `find_trip_for_leg` produces a
/// concrete trip. One candidate is kept per unique (route name, pickup
/// name, drop name) triple, which collapses route ids that share a
/// rider-facing name.
pub(crate) fn find_direct_routes(
    network: &Network,
    pickup: &[NearbyStop],
    drop: &[NearbyStop],
    max_results: usize,
) -> Vec<DirectCandidate> {
    let pickup_routes = routes_serving(network, pickup);
    let drop_routes = routes_serving(network, drop);

    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    let mut found = Vec::new();

    'routes: for (&route, pickup_stops) in &pickup_routes {
        let Some(drop_stops) = drop_routes.get(&route) else {
            continue;
        };
        let route_name = network.route(route).display_name();

        for p in pickup_stops {
            for d in drop_stops {
                let positions = (
                    network.position_on_route(route, p.stop),
                    network.position_on_route(route, d.stop),
                );
                let (Some(board_at), Some(alight_at)) = positions else {
                    continue;
                };
                if board_at >= alight_at {
                    continue;
                }

                let Some(leg) = network.find_trip_for_leg(route, p.stop, d.stop) else {
                    continue;
                };

                let key = (
                    route_name.to_string(),
                    network.stop(p.stop).name.clone(),
                    network.stop(d.stop).name.clone(),
                );
                if !seen.insert(key) {
                    continue;
                }

                found.push(DirectCandidate {
                    leg,
                    pickup: *p,
                    drop: *d,
                });
                if found.len() >= max_results {
                    break 'routes;
                }
            }
        }
    }

    debug!(candidates = found.len(), "direct search complete");
    found
}

/// Map each route to the nearby stops it serves, preserving the
/// nearest-first order of the input.
fn routes_serving(
    network: &Network,
    stops: &[NearbyStop],
) -> BTreeMap<RouteIdx, Vec<NearbyStop>> {
    let mut serving: BTreeMap<RouteIdx, Vec<NearbyStop>> = BTreeMap::new();
    for near in stops {
        for &route in network.routes_at(near.stop) {
            serving.entry(route).or_default().push(*near);
        }
    }
    serving
}

//! One-transfer search.
//!
//! Finds two-bus itineraries that connect through a shared intermediate
//! stop: ride a pickup-side route to some later stop on its pattern,
//! change there to a route that reaches a drop-side stop.
//!
//! Timing feasibility gates acceptance: the second leg must depart at
//! or after the first leg's arrival. When the concrete trip found for
//! the second leg departs too early the candidate is skipped outright;
//! there is no re-search for a later trip. Service calendars are not
//! consulted, so the two legs may belong to different service days; a
//! known limit of planning over the static tables alone.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, trace};

use crate::domain::{Leg, RouteIdx, StopIdx};
use crate::network::Network;

use super::nearby::NearbyStop;

/// A two-bus itinerary before assembly.
#[derive(Debug, Clone)]
pub(crate) struct TransferCandidate {
    pub first: Leg,
    pub second: Leg,
    pub pickup: NearbyStop,
    pub drop: NearbyStop,
    pub transfer_stop: StopIdx,
    /// Whole minutes between first-leg arrival and second-leg departure.
    pub wait_minutes: u32,
}

/// Search for up to `max_results` transfer candidates.
///
/// Only the `top_stops` closest stops on each side are considered, one
/// boarding stop per pickup route and one alighting stop per drop route
/// (the closest each, as the nearby lists arrive nearest-first). Each
/// (pickup route, transfer stop, drop route) triple is tried once.
pub(crate) fn find_transfer_routes(
    network: &Network,
    pickup: &[NearbyStop],
    drop: &[NearbyStop],
    top_stops: usize,
    max_results: usize,
) -> Vec<TransferCandidate> {
    let pickup = &pickup[..pickup.len().min(top_stops)];
    let drop = &drop[..drop.len().min(top_stops)];

    let pickup_routes = closest_stop_per_route(network, pickup);
    let drop_routes = closest_stop_per_route(network, drop);

    // Every stop a drop-side route passes through, mapped back to the
    // routes that pass through it.
    let mut drop_routes_via: HashMap<StopIdx, Vec<RouteIdx>> = HashMap::new();
    for &route in drop_routes.keys() {
        for &stop in network.route_pattern(route) {
            drop_routes_via.entry(stop).or_default().push(route);
        }
    }

    let mut seen: HashSet<(RouteIdx, StopIdx, RouteIdx)> = HashSet::new();
    let mut found = Vec::new();

    'outer: for (&first_route, p) in &pickup_routes {
        let pattern = network.route_pattern(first_route);
        let Some(board_at) = network.position_on_route(first_route, p.stop) else {
            continue;
        };

        for &transfer_stop in &pattern[board_at + 1..] {
            let Some(onward_routes) = drop_routes_via.get(&transfer_stop) else {
                continue;
            };

            for &second_route in onward_routes {
                let d = &drop_routes[&second_route];
                let positions = (
                    network.position_on_route(second_route, transfer_stop),
                    network.position_on_route(second_route, d.stop),
                );
                let (Some(change_at), Some(alight_at)) = positions else {
                    continue;
                };
                if change_at >= alight_at {
                    continue;
                }
                if !seen.insert((first_route, transfer_stop, second_route)) {
                    continue;
                }

                let Some(first) = network.find_trip_for_leg(first_route, p.stop, transfer_stop)
                else {
                    continue;
                };
                let Some(second) = network.find_trip_for_leg(second_route, transfer_stop, d.stop)
                else {
                    continue;
                };

                let arrive = first.arrival_time();
                let depart = second.departure_time();
                if depart < arrive {
                    trace!(
                        transfer = %network.stop(transfer_stop).id,
                        %arrive,
                        %depart,
                        "connection departs before arrival; skipping"
                    );
                    continue;
                }

                found.push(TransferCandidate {
                    wait_minutes: depart.minutes_since(arrive),
                    first,
                    second,
                    pickup: *p,
                    drop: *d,
                    transfer_stop,
                });
                if found.len() >= max_results {
                    break 'outer;
                }
            }
        }
    }

    debug!(candidates = found.len(), "transfer search complete");
    found
}

/// Map each route to the closest nearby stop it serves; first wins over
/// the nearest-first input.
fn closest_stop_per_route(
    network: &Network,
    stops: &[NearbyStop],
) -> BTreeMap<RouteIdx, NearbyStop> {
    let mut closest: BTreeMap<RouteIdx, NearbyStop> = BTreeMap::new();
    for near in stops {
        for &route in network.routes_at(near.stop) {
            closest.entry(route).or_insert(*near);
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, ServiceTime};
    use crate::feed::{Feed, RouteRecord, StopRecord, StopTimeRecord, TripRecord};
    use crate::planner::nearby::find_nearby_stops;

    fn stop(id: &str, lat: f64, lon: f64) -> StopRecord {
        StopRecord {
            id: id.into(),
            name: format!("{id} name"),
            lat,
            lon,
        }
    }

    fn route(id: &str, short: &str) -> RouteRecord {
        RouteRecord {
            id: id.into(),
            short_name: Some(short.into()),
            long_name: None,
            route_type: None,
        }
    }

    fn trip(id: &str, route: &str) -> TripRecord {
        TripRecord {
            id: id.into(),
            route_id: route.into(),
            headsign: None,
        }
    }

    fn call(trip: &str, stop: &str, seq: u32, arr: &str, dep: &str) -> StopTimeRecord {
        StopTimeRecord {
            trip_id: trip.into(),
            stop_id: stop.into(),
            sequence: seq,
            arrival: ServiceTime::parse(arr).unwrap(),
            departure: ServiceTime::parse(dep).unwrap(),
        }
    }

    /// R1: T1 over A -> B -> C; R2: T2 over C -> D. The only connection
    /// is changing at C.
    fn connecting_feed() -> Feed {
        Feed {
            stops: vec![
                stop("A", 0.0, 0.0),
                stop("B", 0.0, 0.01),
                stop("C", 0.0, 0.02),
                stop("D", 0.0, 0.03),
            ],
            routes: vec![route("R1", "1"), route("R2", "2")],
            trips: vec![trip("T1", "R1"), trip("T2", "R2")],
            stop_times: vec![
                call("T1", "A", 1, "08:00:00", "08:00:30"),
                call("T1", "B", 2, "08:05:00", "08:05:30"),
                call("T1", "C", 3, "08:10:00", "08:10:30"),
                call("T2", "C", 1, "08:15:00", "08:15:30"),
                call("T2", "D", 2, "08:20:00", "08:20:30"),
            ],
            summary: Default::default(),
        }
    }

    fn search(network: &Network, from: Point, to: Point) -> Vec<TransferCandidate> {
        let pickup = find_nearby_stops(network, from, 20, 2.0);
        let drop = find_nearby_stops(network, to, 20, 2.0);
        find_transfer_routes(network, &pickup, &drop, 5, 5)
    }

    #[test]
    fn finds_connection_through_shared_stop() {
        let network = Network::build(connecting_feed());
        let found = search(&network, Point::new(0.0, 0.0), Point::new(0.0, 0.03));

        let cross_route = found
            .iter()
            .find(|c| c.first.route() != c.second.route())
            .expect("expected an R1 + R2 connection");

        assert_eq!(network.stop(cross_route.transfer_stop).id, "C");
        assert_eq!(network.trip(cross_route.first.trip()).id, "T1");
        assert_eq!(network.trip(cross_route.second.trip()).id, "T2");
        // Arrive 08:10, depart 08:15
        assert_eq!(cross_route.wait_minutes, 5);
    }

    #[test]
    fn rejects_connection_departing_before_arrival() {
        let mut feed = connecting_feed();
        // Make T2 leave C before T1 gets there
        feed.stop_times.retain(|st| st.trip_id != "T2");
        feed.stop_times.extend([
            call("T2", "C", 1, "08:04:00", "08:04:30"),
            call("T2", "D", 2, "08:09:00", "08:09:30"),
        ]);
        let network = Network::build(feed);

        let found = search(&network, Point::new(0.0, 0.0), Point::new(0.0, 0.03));
        assert!(found.iter().all(|c| c.first.route() == c.second.route()));
    }

    #[test]
    fn zero_wait_connection_is_accepted() {
        let mut feed = connecting_feed();
        feed.stop_times.retain(|st| st.trip_id != "T2");
        // Departs the same instant T1 arrives
        feed.stop_times.extend([
            call("T2", "C", 1, "08:09:30", "08:10:00"),
            call("T2", "D", 2, "08:15:00", "08:15:30"),
        ]);
        let network = Network::build(feed);

        let found = search(&network, Point::new(0.0, 0.0), Point::new(0.0, 0.03));
        let cross = found
            .iter()
            .find(|c| c.first.route() != c.second.route())
            .expect("expected the tight connection to be accepted");
        assert_eq!(cross.wait_minutes, 0);
    }

    #[test]
    fn no_re_search_when_first_found_trip_departs_early() {
        let mut feed = connecting_feed();
        // S2 sorts before T2 and departs C before T1 arrives. The scan
        // finds S2 first, the timing gate rejects it, and no later trip
        // is tried for the (R1, C, R2) triple.
        feed.trips.push(trip("S2", "R2"));
        feed.stop_times.extend([
            call("S2", "C", 1, "08:08:00", "08:09:00"),
            call("S2", "D", 2, "08:14:00", "08:14:30"),
        ]);
        let network = Network::build(feed);

        let found = search(&network, Point::new(0.0, 0.0), Point::new(0.0, 0.03));
        assert!(found.iter().all(|c| c.first.route() == c.second.route()));
    }

    #[test]
    fn later_trip_wins_when_it_sorts_first() {
        let mut feed = connecting_feed();
        // A second R2 trip departing before T1's arrival, but sorting
        // after T2: the scan still finds T2 first and accepts it.
        feed.trips.push(trip("T2X", "R2"));
        feed.stop_times.extend([
            call("T2X", "C", 1, "08:08:00", "08:09:00"),
            call("T2X", "D", 2, "08:14:00", "08:14:30"),
        ]);
        let network = Network::build(feed);

        let found = search(&network, Point::new(0.0, 0.0), Point::new(0.0, 0.03));
        let cross = found
            .iter()
            .find(|c| c.first.route() != c.second.route())
            .expect("expected the T2 connection");
        assert_eq!(network.trip(cross.second.trip()).id, "T2");
        assert_eq!(cross.wait_minutes, 5);
    }

    #[test]
    fn each_route_pair_tried_once_per_transfer_stop() {
        let network = Network::build(connecting_feed());
        let found = search(&network, Point::new(0.0, 0.0), Point::new(0.0, 0.03));

        let mut keys: Vec<_> = found
            .iter()
            .map(|c| (c.first.route(), c.transfer_stop, c.second.route()))
            .collect();
        keys.sort();
        let total = keys.len();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn respects_max_results() {
        let network = Network::build(connecting_feed());
        let pickup = find_nearby_stops(&network, Point::new(0.0, 0.0), 20, 2.0);
        let drop = find_nearby_stops(&network, Point::new(0.0, 0.03), 20, 2.0);

        let found = find_transfer_routes(&network, &pickup, &drop, 5, 1);
        assert_eq!(found.len(), 1);
    }
}

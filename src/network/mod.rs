//! In-memory transit network.
//!
//! `Network::build` materializes the indices the searchers need from a
//! parsed feed: entity arenas plus the stop-time, route-membership, and
//! route-pattern mappings. Arenas are sorted by textual id, so handle
//! order equals id order and every "first wins" scan below is
//! deterministic for a given feed.
//!
//! The canonical stop sequence of a route (`route_pattern`) is taken
//! from a single sample trip, the first trip of the route in id order.
//! Most GTFS routes have one dominant stop pattern; routes with several
//! distinct patterns may under-report reachability, an accepted
//! approximation.

use std::collections::HashMap;

use itertools::Itertools;
use tracing::warn;

use crate::domain::{Leg, Route, RouteIdx, Stop, StopIdx, StopTime, Trip, TripIdx};
use crate::feed::Feed;

/// The read-only index set built once at load.
#[derive(Debug)]
pub struct Network {
    stops: Vec<Stop>,
    routes: Vec<Route>,
    trips: Vec<Trip>,
    stops_by_id: HashMap<String, StopIdx>,
    routes_by_id: HashMap<String, RouteIdx>,
    trips_by_id: HashMap<String, TripIdx>,
    /// Per trip: calls ordered by ascending stop sequence.
    stop_times_by_trip: Vec<Vec<StopTime>>,
    /// Per stop: (trip, position within the trip's call list), in trip
    /// id order.
    stop_times_by_stop: Vec<Vec<(TripIdx, usize)>>,
    /// Per stop: routes with at least one trip calling here, sorted.
    routes_by_stop: Vec<Vec<RouteIdx>>,
    /// Per route: canonical stop pattern from the sample trip.
    stops_by_route: Vec<Vec<StopIdx>>,
    /// Per route: stop → position in the canonical pattern.
    index_in_route: Vec<HashMap<StopIdx, usize>>,
}

impl Network {
    /// Build all indices from a parsed feed.
    ///
    /// Records with dangling references (stop-time to a missing stop or
    /// trip, trip to a missing route) are dropped with a warning. When
    /// the feed has no routes table, routes are synthesized from the
    /// trip table's route ids so trips always resolve.
    pub fn build(feed: Feed) -> Network {
        let (stops, stops_by_id) = build_stops(feed.stops);

        let route_records = if feed.routes.is_empty() {
            synthesize_routes(&feed.trips)
        } else {
            feed.routes
        };
        let (routes, routes_by_id) = build_routes(route_records);
        let (trips, trips_by_id) = build_trips(feed.trips, &routes_by_id);

        let stop_times_by_trip =
            build_stop_times(feed.stop_times, &trips, &trips_by_id, &stops_by_id);

        let mut stop_times_by_stop: Vec<Vec<(TripIdx, usize)>> = vec![Vec::new(); stops.len()];
        for (trip_index, times) in stop_times_by_trip.iter().enumerate() {
            let trip = TripIdx::from_usize(trip_index);
            for (pos, stop_time) in times.iter().enumerate() {
                stop_times_by_stop[stop_time.stop.as_usize()].push((trip, pos));
            }
        }

        let mut routes_by_stop: Vec<Vec<RouteIdx>> = Vec::with_capacity(stops.len());
        for calls in &stop_times_by_stop {
            let touched = calls
                .iter()
                .map(|(trip, _)| trips[trip.as_usize()].route)
                .sorted()
                .dedup()
                .collect();
            routes_by_stop.push(touched);
        }

        // Sample pattern: the first trip (lowest id) of each route that
        // actually has stop times.
        let mut stops_by_route: Vec<Vec<StopIdx>> = vec![Vec::new(); routes.len()];
        for (trip_index, trip) in trips.iter().enumerate() {
            let pattern = &mut stops_by_route[trip.route.as_usize()];
            if pattern.is_empty() {
                let times = &stop_times_by_trip[trip_index];
                pattern.extend(times.iter().map(|st| st.stop));
            }
        }

        let index_in_route = stops_by_route
            .iter()
            .map(|pattern| {
                let mut positions = HashMap::with_capacity(pattern.len());
                for (position, &stop) in pattern.iter().enumerate() {
                    // First occurrence wins if a pattern loops back
                    positions.entry(stop).or_insert(position);
                }
                positions
            })
            .collect();

        Network {
            stops,
            routes,
            trips,
            stops_by_id,
            routes_by_id,
            trips_by_id,
            stop_times_by_trip,
            stop_times_by_stop,
            routes_by_stop,
            stops_by_route,
            index_in_route,
        }
    }

    /// Returns the stop for a handle.
    pub fn stop(&self, idx: StopIdx) -> &Stop {
        &self.stops[idx.as_usize()]
    }

    /// Returns the route for a handle.
    pub fn route(&self, idx: RouteIdx) -> &Route {
        &self.routes[idx.as_usize()]
    }

    /// Returns the trip for a handle.
    pub fn trip(&self, idx: TripIdx) -> &Trip {
        &self.trips[idx.as_usize()]
    }

    /// Iterates all stops with their handles, in id order.
    pub fn stops(&self) -> impl Iterator<Item = (StopIdx, &Stop)> {
        self.stops
            .iter()
            .enumerate()
            .map(|(i, stop)| (StopIdx::from_usize(i), stop))
    }

    /// Number of stops loaded.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Number of routes loaded.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Number of trips loaded.
    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Looks up a stop handle by GTFS id.
    pub fn stop_idx(&self, id: &str) -> Option<StopIdx> {
        self.stops_by_id.get(id).copied()
    }

    /// Looks up a route handle by GTFS id.
    pub fn route_idx(&self, id: &str) -> Option<RouteIdx> {
        self.routes_by_id.get(id).copied()
    }

    /// Looks up a trip handle by GTFS id.
    pub fn trip_idx(&self, id: &str) -> Option<TripIdx> {
        self.trips_by_id.get(id).copied()
    }

    /// The trip's calls ordered by ascending stop sequence.
    pub fn trip_stop_times(&self, trip: TripIdx) -> &[StopTime] {
        &self.stop_times_by_trip[trip.as_usize()]
    }

    /// Every call at a stop as (trip, position), in trip id order.
    pub fn calls_at(&self, stop: StopIdx) -> &[(TripIdx, usize)] {
        &self.stop_times_by_stop[stop.as_usize()]
    }

    /// Routes with at least one trip calling at the stop, sorted.
    pub fn routes_at(&self, stop: StopIdx) -> &[RouteIdx] {
        &self.routes_by_stop[stop.as_usize()]
    }

    /// The route's canonical stop pattern.
    pub fn route_pattern(&self, route: RouteIdx) -> &[StopIdx] {
        &self.stops_by_route[route.as_usize()]
    }

    /// Position of a stop in the route's canonical pattern.
    pub fn position_on_route(&self, route: RouteIdx, stop: StopIdx) -> Option<usize> {
        self.index_in_route[route.as_usize()].get(&stop).copied()
    }

    /// Find a concrete trip on `route` serving `start` and, later in
    /// its stop sequence, `end`.
    ///
    /// Scans the start stop's calls in trip id order and returns a leg
    /// on the first satisfying trip, so repeated queries pick the same
    /// trip. There is no time-of-day input; the chosen departure is
    /// whatever the lowest-id satisfying trip runs.
    pub fn find_trip_for_leg(
        &self,
        route: RouteIdx,
        start: StopIdx,
        end: StopIdx,
    ) -> Option<Leg> {
        for &(trip, board_pos) in self.calls_at(start) {
            if self.trips[trip.as_usize()].route != route {
                continue;
            }
            let times = self.trip_stop_times(trip);
            let board_seq = times[board_pos].sequence;
            let alight_pos = times
                .iter()
                .position(|st| st.stop == end && st.sequence > board_seq);
            if let Some(alight_pos) = alight_pos {
                // Positions came from this trip's own call list
                return Leg::new(trip, route, times, board_pos, alight_pos).ok();
            }
        }
        None
    }

    /// The calls a leg rides, boarding through alighting inclusive.
    pub fn leg_stop_times(&self, leg: &Leg) -> &[StopTime] {
        &self.trip_stop_times(leg.trip())[leg.board_pos()..=leg.alight_pos()]
    }
}

fn build_stops(mut records: Vec<crate::feed::StopRecord>) -> (Vec<Stop>, HashMap<String, StopIdx>) {
    records.sort_by(|a, b| a.id.cmp(&b.id));

    let mut stops = Vec::with_capacity(records.len());
    let mut by_id = HashMap::with_capacity(records.len());
    for record in records {
        if by_id.contains_key(&record.id) {
            warn!(stop = %record.id, "duplicate stop id; keeping first");
            continue;
        }
        by_id.insert(record.id.clone(), StopIdx::from_usize(stops.len()));
        stops.push(Stop {
            id: record.id,
            name: record.name,
            lat: record.lat,
            lon: record.lon,
        });
    }
    (stops, by_id)
}

fn synthesize_routes(trips: &[crate::feed::TripRecord]) -> Vec<crate::feed::RouteRecord> {
    trips
        .iter()
        .map(|trip| trip.route_id.as_str())
        .sorted()
        .dedup()
        .map(|id| crate::feed::RouteRecord {
            id: id.to_string(),
            short_name: None,
            long_name: None,
            route_type: None,
        })
        .collect()
}

fn build_routes(
    mut records: Vec<crate::feed::RouteRecord>,
) -> (Vec<Route>, HashMap<String, RouteIdx>) {
    records.sort_by(|a, b| a.id.cmp(&b.id));

    let mut routes = Vec::with_capacity(records.len());
    let mut by_id = HashMap::with_capacity(records.len());
    for record in records {
        if by_id.contains_key(&record.id) {
            warn!(route = %record.id, "duplicate route id; keeping first");
            continue;
        }
        by_id.insert(record.id.clone(), RouteIdx::from_usize(routes.len()));
        routes.push(Route {
            id: record.id,
            short_name: record.short_name,
            long_name: record.long_name,
            route_type: record.route_type,
        });
    }
    (routes, by_id)
}

fn build_trips(
    mut records: Vec<crate::feed::TripRecord>,
    routes_by_id: &HashMap<String, RouteIdx>,
) -> (Vec<Trip>, HashMap<String, TripIdx>) {
    records.sort_by(|a, b| a.id.cmp(&b.id));

    let mut trips = Vec::with_capacity(records.len());
    let mut by_id = HashMap::with_capacity(records.len());
    for record in records {
        if by_id.contains_key(&record.id) {
            warn!(trip = %record.id, "duplicate trip id; keeping first");
            continue;
        }
        let Some(&route) = routes_by_id.get(&record.route_id) else {
            warn!(trip = %record.id, route = %record.route_id, "dropping trip with unknown route");
            continue;
        };
        by_id.insert(record.id.clone(), TripIdx::from_usize(trips.len()));
        trips.push(Trip {
            id: record.id,
            route,
            headsign: record.headsign,
        });
    }
    (trips, by_id)
}

fn build_stop_times(
    records: Vec<crate::feed::StopTimeRecord>,
    trips: &[Trip],
    trips_by_id: &HashMap<String, TripIdx>,
    stops_by_id: &HashMap<String, StopIdx>,
) -> Vec<Vec<StopTime>> {
    let mut by_trip: Vec<Vec<StopTime>> = vec![Vec::new(); trips.len()];

    for record in records {
        let Some(&trip) = trips_by_id.get(&record.trip_id) else {
            warn!(trip = %record.trip_id, "dropping stop time with unknown trip");
            continue;
        };
        let Some(&stop) = stops_by_id.get(&record.stop_id) else {
            warn!(stop = %record.stop_id, "dropping stop time with unknown stop");
            continue;
        };
        by_trip[trip.as_usize()].push(StopTime {
            trip,
            stop,
            sequence: record.sequence,
            arrival: record.arrival,
            departure: record.departure,
        });
    }

    for (trip_index, times) in by_trip.iter_mut().enumerate() {
        times.sort_by_key(|st| st.sequence);
        let before = times.len();
        times.dedup_by_key(|st| st.sequence);
        if times.len() < before {
            warn!(
                trip = %trips[trip_index].id,
                dropped = before - times.len(),
                "dropping stop times with duplicate sequence"
            );
        }
    }

    by_trip
}

//! Planner facade.
//!
//! Orchestrates the pipeline: nearest stops for both endpoints, direct
//! search, transfer search when the direct results leave room, then
//! ranking and truncation. Construction decides readiness once: loading
//! either yields a planner with built indices or a disabled planner
//! whose queries all return empty.

use tracing::{debug, info, instrument, warn};

use crate::domain::{Itinerary, Point};
use crate::feed::Feed;
use crate::network::Network;

use super::assemble::{assemble_direct, assemble_transfer};
use super::config::PlannerConfig;
use super::direct::find_direct_routes;
use super::nearby::find_nearby_stops;
use super::rank::rank_itineraries;
use super::transfer::find_transfer_routes;

/// Load state of a planner, as reported to hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerStatus {
    /// Indices are built; queries search them.
    Ready {
        stops: usize,
        routes: usize,
        trips: usize,
    },
    /// The feed could not be loaded; queries return empty.
    Disabled { reason: String },
}

enum State {
    Ready(Network),
    Disabled { reason: String },
}

/// The journey planning engine.
///
/// Owns the indexed network and the configuration. All state is
/// immutable after construction, so a `Planner` can be shared freely
/// across threads.
pub struct Planner {
    config: PlannerConfig,
    state: State,
}

impl Planner {
    /// Load the feed from `config.gtfs_path` and build the indices.
    ///
    /// Never panics or propagates: a feed that cannot be loaded
    /// produces a disabled planner, and the host keeps running.
    pub fn load(config: PlannerConfig) -> Self {
        match Feed::load(&config.gtfs_path) {
            Ok(feed) => Self::from_feed(config, feed),
            Err(err) => {
                warn!(
                    path = %config.gtfs_path.display(),
                    %err,
                    "feed load failed; planner disabled"
                );
                Self {
                    config,
                    state: State::Disabled {
                        reason: err.to_string(),
                    },
                }
            }
        }
    }

    /// Build a planner from an already-parsed feed.
    ///
    /// For hosts that obtain the tables some other way (an archive, a
    /// download) and for tests.
    pub fn from_feed(config: PlannerConfig, feed: Feed) -> Self {
        let network = Network::build(feed);
        info!(
            stops = network.stop_count(),
            routes = network.route_count(),
            trips = network.trip_count(),
            "planner ready"
        );
        Self {
            config,
            state: State::Ready(network),
        }
    }

    /// Returns true when queries will actually search.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    /// Reports the load state.
    pub fn status(&self) -> PlannerStatus {
        match &self.state {
            State::Ready(network) => PlannerStatus::Ready {
                stops: network.stop_count(),
                routes: network.route_count(),
                trips: network.trip_count(),
            },
            State::Disabled { reason } => PlannerStatus::Disabled {
                reason: reason.clone(),
            },
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan journeys from `pickup` to `drop`.
    ///
    /// Returns up to `max_results` itineraries sorted by ascending
    /// total duration. Never fails: a disabled planner, an endpoint
    /// with no stop in range, or an unserved pair all produce an empty
    /// list.
    #[instrument(skip(self), fields(
        pickup_lat = pickup.lat,
        pickup_lng = pickup.lng,
        drop_lat = drop.lat,
        drop_lng = drop.lng,
    ))]
    pub fn find_routes(&self, pickup: Point, drop: Point) -> Vec<Itinerary> {
        let State::Ready(network) = &self.state else {
            warn!("query on disabled planner");
            return Vec::new();
        };
        let config = &self.config;

        let near_pickup =
            find_nearby_stops(network, pickup, config.nearby_limit, config.max_nearby_km);
        let near_drop = find_nearby_stops(network, drop, config.nearby_limit, config.max_nearby_km);
        debug!(
            pickup_stops = near_pickup.len(),
            drop_stops = near_drop.len(),
            "resolved nearby stops"
        );
        if near_pickup.is_empty() || near_drop.is_empty() {
            info!("no stop within range of an endpoint");
            return Vec::new();
        }

        let mut itineraries: Vec<Itinerary> =
            find_direct_routes(network, &near_pickup, &near_drop, config.max_results)
                .iter()
                .map(|candidate| assemble_direct(network, config, pickup, drop, candidate))
                .collect();

        if itineraries.len() < config.max_results {
            let transfers = find_transfer_routes(
                network,
                &near_pickup,
                &near_drop,
                config.top_stops_for_transfer,
                config.max_results,
            );
            for candidate in &transfers {
                // A candidate that fails assembly was already logged;
                // only that candidate is lost
                if let Ok(itinerary) = assemble_transfer(network, config, pickup, drop, candidate) {
                    itineraries.push(itinerary);
                }
            }
        } else {
            debug!("direct search filled the result list; skipping transfer search");
        }

        let mut ranked = rank_itineraries(itineraries);
        ranked.truncate(config.max_results);

        info!(results = ranked.len(), "search complete");
        if ranked.is_empty() {
            debug!("no routes found");
        }
        ranked
    }
}

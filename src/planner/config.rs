//! Planner configuration.

use std::path::PathBuf;

/// Tunable parameters for loading and search.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Directory holding the GTFS tables.
    pub gtfs_path: PathBuf,

    /// Walking speed used to convert walk distance to minutes.
    pub walk_speed_m_per_min: f64,

    /// Radius of the nearest-stop search, kilometres.
    pub max_nearby_km: f64,

    /// Maximum number of nearby stops considered per endpoint.
    pub nearby_limit: usize,

    /// Maximum number of itineraries returned by a query.
    pub max_results: usize,

    /// Nearby stops per endpoint fed into the transfer search.
    /// Kept small: the transfer search is quadratic in it.
    pub top_stops_for_transfer: usize,

    /// Flat fare charged per bus leg boarded.
    pub fare_base_per_leg: f64,

    /// Fare increment per stop served on a leg.
    pub fare_per_stop: f64,

    /// Estimated kilometres per stop for bus-leg distances; no shape
    /// data is loaded, so reported distances are this approximation.
    pub km_per_stop_estimate: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            gtfs_path: PathBuf::from("./bus routing"),
            walk_speed_m_per_min: 80.0,
            max_nearby_km: 2.0,
            nearby_limit: 20,
            max_results: 5,
            top_stops_for_transfer: 5,
            fare_base_per_leg: 5.0,
            fare_per_stop: 1.5,
            km_per_stop_estimate: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.walk_speed_m_per_min, 80.0);
        assert_eq!(config.max_nearby_km, 2.0);
        assert_eq!(config.nearby_limit, 20);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.top_stops_for_transfer, 5);
        assert_eq!(config.fare_base_per_leg, 5.0);
        assert_eq!(config.fare_per_stop, 1.5);
        assert_eq!(config.km_per_stop_estimate, 0.5);
    }
}

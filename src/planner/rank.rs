//! Itinerary ranking.
//!
//! Orders merged direct and transfer results so the fastest journeys
//! come first.

use crate::domain::Itinerary;

/// Rank itineraries by preference.
///
/// Itineraries are ranked by:
/// 1. Total duration (shorter is better)
/// 2. Number of stops served (fewer is better)
/// 3. Route name (lexicographic, as a stable final tie-break)
///
/// Returns itineraries sorted best-first.
pub fn rank_itineraries(mut itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    itineraries.sort_by(|a, b| {
        // Primary: total duration
        let duration_cmp = a.duration_minutes().cmp(&b.duration_minutes());
        if duration_cmp != std::cmp::Ordering::Equal {
            return duration_cmp;
        }

        // Secondary: fewer stops
        let stops_cmp = a.stop_count.cmp(&b.stop_count);
        if stops_cmp != std::cmp::Ordering::Equal {
            return stops_cmp;
        }

        // Tertiary: route name
        a.route_name.cmp(&b.route_name)
    });

    itineraries
}

//! Great-circle distance and walk-time conversion.

use crate::domain::Point;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometres
/// (Haversine formula).
pub fn distance_km(a: Point, b: Point) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Minutes needed to walk `distance_km` at `speed_m_per_min`, rounded up.
pub fn walk_minutes(distance_km: f64, speed_m_per_min: f64) -> u32 {
    (distance_km * 1000.0 / speed_m_per_min).ceil() as u32
}

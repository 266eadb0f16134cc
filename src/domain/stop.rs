//! Stop entity.

use super::Point;

/// A geo-located boarding/alighting point, immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// GTFS stop id, unique within the feed.
    pub id: String,
    /// Rider-facing name; falls back to the id when the feed omits it.
    pub name: String,
    /// Latitude, degrees.
    pub lat: f64,
    /// Longitude, degrees.
    pub lon: f64,
}

impl Stop {
    /// Returns the stop's coordinate.
    pub fn position(&self) -> Point {
        Point::new(self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position() {
        let stop = Stop {
            id: "S1".into(),
            name: "Main St".into(),
            lat: 12.97,
            lon: 77.59,
        };
        assert_eq!(stop.position(), Point::new(12.97, 77.59));
    }
}

//! Public itinerary records.
//!
//! These are the self-contained value types the engine hands to its
//! consumers: everything is owned, presentation-friendly, and
//! serializable, so a host application can forward them straight to a
//! map UI without touching engine internals.

use serde::Serialize;

use super::Point;

/// A stop projected onto an itinerary path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStop {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    pub sequence: u32,
    /// Departure time at this stop, "HH:MM:SS".
    pub time: String,
}

/// Kind-specific payload of a segment.
///
/// Walks (including the zero-distance transfer wait) carry nothing
/// beyond the shared header; bus rides carry the route, the stops
/// served, and their coordinates for the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SegmentKind {
    Walk,
    Bus {
        route_name: String,
        stops: Vec<PathStop>,
        path: Vec<Point>,
    },
}

/// One step of an itinerary: a walk or a bus ride.
///
/// The header fields are common to both kinds; `kind` carries the
/// bus-only payload. Distance and duration are display strings
/// (`"1.50 km"`, `"5 mins"`), and `color` is a presentation hint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub distance: String,
    pub duration: String,
    pub instruction: String,
    pub color: String,
    #[serde(flatten)]
    pub kind: SegmentKind,
}

impl Segment {
    /// Returns true if this segment is a walk (or transfer wait).
    pub fn is_walk(&self) -> bool {
        matches!(self.kind, SegmentKind::Walk)
    }

    /// Returns true if this segment is a bus ride.
    pub fn is_bus(&self) -> bool {
        !self.is_walk()
    }

    /// Duration in minutes, parsed from the display string.
    pub fn duration_minutes(&self) -> u32 {
        parse_leading_minutes(&self.duration)
    }
}

/// A complete journey description from pickup coordinate to drop
/// coordinate: two or more walk segments around one or two bus legs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    /// Display name of the route ridden; both leg names joined with
    /// " + " for transfer itineraries.
    pub route_name: String,
    /// Name of the boarding stop.
    pub start_stop: String,
    /// Name of the final alighting stop.
    pub end_stop: String,
    /// Departure time at the boarding stop, "HH:MM:SS".
    pub departure_time: String,
    /// Arrival time at the final alighting stop, "HH:MM:SS".
    pub arrival_time: String,
    /// Total door-to-door duration, "<N> mins".
    pub duration: String,
    /// Stops served, summed over bus legs (boarding and alighting
    /// stops included per leg).
    pub stop_count: u32,
    /// Fare estimate in currency-free units.
    pub fare: u32,
    /// Concatenated bus-leg stop coordinates, for the map.
    pub path: Vec<Point>,
    /// Ordered walk/bus/transfer segments.
    pub segments: Vec<Segment>,
    /// Walks plus per-stop bus approximation, "<X> km".
    pub total_distance: String,
}

impl Itinerary {
    /// Total duration in minutes, parsed from the display string.
    pub fn duration_minutes(&self) -> u32 {
        parse_leading_minutes(&self.duration)
    }

    /// Number of bus legs (1 for direct, 2 for transfer itineraries).
    pub fn bus_leg_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_bus()).count()
    }

    /// Returns true if this itinerary involves a transfer.
    pub fn is_transfer(&self) -> bool {
        self.bus_leg_count() > 1
    }
}

/// Parses the leading integer of a duration string such as "15 mins".
pub(crate) fn parse_leading_minutes(s: &str) -> u32 {
    s.split_whitespace()
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(mins: u32) -> Segment {
        Segment {
            start: Point::new(0.0, 0.0),
            end: Point::new(0.0, 0.01),
            distance: "1.11 km".into(),
            duration: format!("{mins} mins"),
            instruction: "Walk to Main St".into(),
            color: "#94a3b8".into(),
            kind: SegmentKind::Walk,
        }
    }

    fn bus(mins: u32) -> Segment {
        Segment {
            start: Point::new(0.0, 0.0),
            end: Point::new(0.0, 0.02),
            distance: "1.50 km".into(),
            duration: format!("{mins} mins"),
            instruction: "Take bus 42 to Airport".into(),
            color: "#f97316".into(),
            kind: SegmentKind::Bus {
                route_name: "42".into(),
                stops: vec![],
                path: vec![],
            },
        }
    }

    fn itinerary(segments: Vec<Segment>) -> Itinerary {
        Itinerary {
            route_name: "42".into(),
            start_stop: "A".into(),
            end_stop: "B".into(),
            departure_time: "08:00:30".into(),
            arrival_time: "08:10:00".into(),
            duration: "24 mins".into(),
            stop_count: 3,
            fare: 10,
            path: vec![],
            segments,
            total_distance: "3.72 km".into(),
        }
    }

    #[test]
    fn duration_parses_leading_integer() {
        assert_eq!(itinerary(vec![]).duration_minutes(), 24);
        assert_eq!(parse_leading_minutes("0 mins"), 0);
        assert_eq!(parse_leading_minutes("garbage"), 0);
    }

    #[test]
    fn leg_counting() {
        let direct = itinerary(vec![walk(2), bus(10), walk(0)]);
        assert_eq!(direct.bus_leg_count(), 1);
        assert!(!direct.is_transfer());

        let transfer = itinerary(vec![walk(2), bus(10), walk(5), bus(5), walk(0)]);
        assert_eq!(transfer.bus_leg_count(), 2);
        assert!(transfer.is_transfer());
    }

    #[test]
    fn segment_kind_predicates() {
        assert!(walk(1).is_walk());
        assert!(!walk(1).is_bus());
        assert!(bus(1).is_bus());
        assert_eq!(bus(7).duration_minutes(), 7);
    }
}

//! Geographic coordinate type.

use serde::Serialize;

/// A WGS84 coordinate, degrees.
///
/// This is both the query input (pickup/drop positions) and the shape of
/// every coordinate the engine emits in result records, so it serializes
/// with the `{lat, lng}` field names map UIs expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    /// Creates a point from latitude and longitude in degrees.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

//! Stop-time entity: the join between trips and stops.

use super::{ServiceTime, StopIdx, TripIdx};

/// A scheduled call of a trip at a stop.
///
/// `sequence` values are distinct within a trip and monotonically
/// orderable; the engine treats them as opaque ordering keys, never as
/// contiguous integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopTime {
    pub trip: TripIdx,
    pub stop: StopIdx,
    pub sequence: u32,
    pub arrival: ServiceTime,
    pub departure: ServiceTime,
}

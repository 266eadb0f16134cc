//! Bus leg type.
//!
//! A `Leg` is one continuous bus ride on a single trip between two of
//! its stop-times. Ordering is validated at construction, so code that
//! receives a `Leg` can trust `board_pos < alight_pos` and read the
//! cached times without re-checking.

use super::{DomainError, RouteIdx, ServiceTime, StopIdx, StopTime, TripIdx};

/// One continuous bus-ride portion of an itinerary.
///
/// Positions index into the trip's sequence-ordered stop-time list held
/// by the network; the boarding/alighting stops and times are cached at
/// construction so accessors never fail.
///
/// # Invariants
///
/// - `alight_pos > board_pos` (must travel forward on the trip)
/// - Both positions are valid for the trip's stop-time list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    trip: TripIdx,
    route: RouteIdx,
    board_pos: usize,
    alight_pos: usize,
    board_stop: StopIdx,
    alight_stop: StopIdx,
    departure: ServiceTime,
    arrival: ServiceTime,
}

impl Leg {
    /// Construct a leg over `stop_times`, the trip's calls ordered by
    /// ascending stop sequence.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `alight_pos <= board_pos` or either position is
    /// out of bounds.
    pub fn new(
        trip: TripIdx,
        route: RouteIdx,
        stop_times: &[StopTime],
        board_pos: usize,
        alight_pos: usize,
    ) -> Result<Self, DomainError> {
        if alight_pos <= board_pos {
            return Err(DomainError::InvalidLeg(
                "alight position must be after board position",
            ));
        }

        let board = stop_times
            .get(board_pos)
            .ok_or(DomainError::InvalidPosition)?;
        let alight = stop_times
            .get(alight_pos)
            .ok_or(DomainError::InvalidPosition)?;

        Ok(Leg {
            trip,
            route,
            board_pos,
            alight_pos,
            board_stop: board.stop,
            alight_stop: alight.stop,
            departure: board.departure,
            arrival: alight.arrival,
        })
    }

    /// Returns the trip this leg rides.
    pub fn trip(&self) -> TripIdx {
        self.trip
    }

    /// Returns the route the trip belongs to.
    pub fn route(&self) -> RouteIdx {
        self.route
    }

    /// Returns the boarding position in the trip's stop-time list.
    pub fn board_pos(&self) -> usize {
        self.board_pos
    }

    /// Returns the alighting position in the trip's stop-time list.
    pub fn alight_pos(&self) -> usize {
        self.alight_pos
    }

    /// Returns the boarding stop.
    pub fn board_stop(&self) -> StopIdx {
        self.board_stop
    }

    /// Returns the alighting stop.
    pub fn alight_stop(&self) -> StopIdx {
        self.alight_stop
    }

    /// Returns the departure time at the boarding stop.
    pub fn departure_time(&self) -> ServiceTime {
        self.departure
    }

    /// Returns the arrival time at the alighting stop.
    pub fn arrival_time(&self) -> ServiceTime {
        self.arrival
    }

    /// Ride duration in whole wall-clock minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.arrival.minutes_since(self.departure)
    }

    /// Number of stops served by this leg, boarding and alighting stops
    /// included.
    pub fn stop_count(&self) -> u32 {
        (self.alight_pos - self.board_pos + 1) as u32
    }
}

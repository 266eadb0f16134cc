//! Domain error types.
//!
//! These errors represent construction-time invariant violations in the
//! domain layer. They never cross the public query API: the planner
//! degrades to skipping the offending candidate instead.

#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Invalid leg construction (e.g., alight not after board)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// A stop-time position is out of bounds for the trip
    #[error("invalid stop-time position: out of bounds")]
    InvalidPosition,

    /// Two legs of a transfer do not meet at the transfer stop
    #[error("transfer legs do not share the transfer stop")]
    LegsDoNotConnect,
}

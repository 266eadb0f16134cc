//! Dense index handles into the network arenas.
//!
//! Entities are stored in flat vectors sorted by their textual GTFS id;
//! cross-references between them are these `u32` handles rather than
//! owned strings or reference-counted pointers. Because the arenas are
//! sorted, handle order equals lexicographic id order, which is what
//! makes every "first wins" tie-break in the searchers deterministic.

use std::fmt;

macro_rules! index_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a position in the owning arena.
            pub(crate) fn from_usize(index: usize) -> Self {
                Self(index as u32)
            }

            /// Returns the position in the owning arena.
            pub fn as_usize(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

index_type! {
    /// Handle to a stop in the network's stop arena.
    StopIdx
}

index_type! {
    /// Handle to a route in the network's route arena.
    RouteIdx
}

index_type! {
    /// Handle to a trip in the network's trip arena.
    TripIdx
}

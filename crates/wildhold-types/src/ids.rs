//! Type-safe identifier wrappers around `u64`.
//!
//! Every entity in the world has a strongly-typed ID to prevent accidental
//! mixing of identifiers at compile time. IDs are allocated from monotonic
//! counters that live for the whole process, so a value is never reused:
//!
//! - [`PlayerId`] and [`StructureId`] come from counters in the world
//!   registry.
//! - [`NodeId`] values are fixed at world-seed time (`1..=node_count`).
//! - [`SessionId`] values come from the transport layer, one per connection.
//!
//! On the wire all IDs are plain JSON numbers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around `u64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(#[ts(type = "number")] pub u64);

        impl $name {
            /// Wrap a raw counter value.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the inner `u64` value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a player.
    PlayerId
}

define_id! {
    /// Unique identifier for a harvestable resource node.
    NodeId
}

define_id! {
    /// Unique identifier for a player-built structure.
    StructureId
}

define_id! {
    /// Unique identifier for a live transport connection.
    SessionId
}

//! World registry, geometry, resource nodes, and structures for the
//! Wildhold world server.
//!
//! This crate models the physical world: a bounded rectangle holding
//! players, harvestable resource nodes that cycle between live and
//! depleted, and permanent player-built structures.
//!
//! # Modules
//!
//! - [`error`] -- Error types for registry and inventory operations.
//! - [`geometry`] -- Euclidean distance, clamping, stepping, and random
//!   placement helpers.
//! - [`inventory`] -- Checked add/remove/debit on player inventories.
//! - [`registry`] -- [`World`], the sole owner of entity collections.
//! - [`resource`] -- Node strikes, depletion yields, and timed respawn.
//! - [`seed`] -- Initial node generation.
//! - [`structure`] -- Build cost table.

pub mod error;
pub mod geometry;
pub mod inventory;
pub mod registry;
pub mod resource;
pub mod seed;
pub mod structure;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use registry::World;
pub use resource::{RESPAWN_DELAY_MS, StrikeOutcome};
pub use seed::create_world;

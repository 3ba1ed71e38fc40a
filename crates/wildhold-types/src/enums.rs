//! Enumeration types for the Wildhold world.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A resource a player can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Resource {
    /// Lumber from trees and wood piles.
    Wood,
    /// Stone broken from rocks.
    Stone,
    /// Berries picked from bushes.
    Food,
}

// ---------------------------------------------------------------------------
// Resource nodes
// ---------------------------------------------------------------------------

/// The type of a harvestable resource node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum NodeKind {
    /// A standing tree. Yields wood.
    Tree,
    /// A boulder. Yields stone.
    Rock,
    /// A berry bush. Yields food.
    Berry,
    /// A pile of fallen timber. Yields more wood than a tree.
    Wood,
}

impl NodeKind {
    /// Every node kind, in seeding order.
    pub const ALL: [Self; 4] = [Self::Tree, Self::Rock, Self::Berry, Self::Wood];

    /// The resource and quantity granted when a node of this kind is
    /// depleted.
    ///
    /// - Tree: 5 wood
    /// - Rock: 3 stone
    /// - Berry: 4 food
    /// - Wood: 8 wood
    pub const fn depletion_yield(self) -> (Resource, u32) {
        match self {
            Self::Tree => (Resource::Wood, 5),
            Self::Rock => (Resource::Stone, 3),
            Self::Berry => (Resource::Food, 4),
            Self::Wood => (Resource::Wood, 8),
        }
    }
}

// ---------------------------------------------------------------------------
// Structures
// ---------------------------------------------------------------------------

/// A kind of structure a player can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum StructureKind {
    /// A defensive wall segment.
    Wall,
    /// A camp.
    Camp,
}

// ---------------------------------------------------------------------------
// Pointer actions
// ---------------------------------------------------------------------------

/// What a pointer action at a world position asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum PointerAction {
    /// Attack the nearest other player under the pointer, else harvest a
    /// node under the pointer.
    Click,
    /// Nudge the player one step toward the pointer.
    TapMove,
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// Why an intent was dropped without effect.
///
/// Rejections never reach the client; they exist for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RejectionReason {
    /// The session has not joined yet.
    NotJoined,
    /// The session already has a player.
    AlreadyJoined,
    /// The acting player no longer exists in the registry.
    PlayerNotFound,
    /// The player cannot pay the cost.
    InsufficientResources,
    /// The target is outside the action range.
    OutOfRange,
    /// Nothing under the pointer qualified as a target.
    NoTarget,
    /// The text or name was empty after sanitizing.
    EmptyText,
    /// A coordinate was NaN or infinite.
    InvalidCoordinates,
    /// A counter or quantity would overflow.
    Overflow,
}

impl core::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::NotJoined => "not joined",
            Self::AlreadyJoined => "already joined",
            Self::PlayerNotFound => "player not found",
            Self::InsufficientResources => "insufficient resources",
            Self::OutOfRange => "out of range",
            Self::NoTarget => "no target",
            Self::EmptyText => "empty text",
            Self::InvalidCoordinates => "invalid coordinates",
            Self::Overflow => "arithmetic overflow",
        };
        f.write_str(s)
    }
}

//! Core entity structs: players, resource nodes, structures, and the
//! geometry they live in.
//!
//! These are the canonical in-memory records owned by the world registry.
//! The wire projections sent to clients live in [`crate::protocol`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{NodeKind, Resource, StructureKind};
use crate::ids::{NodeId, PlayerId, StructureId};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal coordinate, `0..=width`.
    pub x: f64,
    /// Vertical coordinate, `0..=height`.
    pub y: f64,
}

impl Position {
    /// Create a position from raw coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite numbers.
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The extent of the world rectangle. The origin is `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Bounds {
    /// Width of the world in units.
    pub width: f64,
    /// Height of the world in units.
    pub height: f64,
}

impl Bounds {
    /// Create bounds of the given size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether `pos` lies inside the closed rectangle.
    pub fn contains(self, pos: Position) -> bool {
        (0.0..=self.width).contains(&pos.x) && (0.0..=self.height).contains(&pos.y)
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Resources carried by a player. All counts are nonnegative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Inventory {
    /// Wood units.
    pub wood: u32,
    /// Stone units.
    pub stone: u32,
    /// Food units.
    pub food: u32,
}

impl Inventory {
    /// Quantity held of `resource`.
    pub const fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Wood => self.wood,
            Resource::Stone => self.stone,
            Resource::Food => self.food,
        }
    }

    /// Mutable slot for `resource`.
    pub const fn slot_mut(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Wood => &mut self.wood,
            Resource::Stone => &mut self.stone,
            Resource::Food => &mut self.food,
        }
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Maximum (and spawn) health of a player.
pub const MAX_HEALTH: u32 = 100;

/// A connected player.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Registry-assigned identifier.
    pub id: PlayerId,
    /// Display name, already sanitized.
    pub name: String,
    /// Current position, always inside the world bounds.
    pub position: Position,
    /// Health, `0..=MAX_HEALTH`.
    pub health: u32,
    /// Number of other players this player has defeated.
    pub kills: u32,
    /// Carried resources.
    pub inventory: Inventory,
    /// Milliseconds since the Unix epoch of the last message from this
    /// player's session.
    pub last_active_ms: i64,
}

// ---------------------------------------------------------------------------
// Resource node
// ---------------------------------------------------------------------------

/// A harvestable node that cycles between live and depleted.
///
/// Exactly one of `hp > 0` and `respawn_at.is_some()` holds at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceNode {
    /// Fixed identifier assigned at seed time.
    pub id: NodeId,
    /// What the node yields on depletion.
    pub kind: NodeKind,
    /// Current position. Moves slightly on each respawn.
    pub position: Position,
    /// Remaining hit points. Zero while depleted.
    pub hp: u32,
    /// Hit points restored on respawn.
    pub max_hp: u32,
    /// When a depleted node comes back, in epoch milliseconds.
    pub respawn_at: Option<i64>,
}

impl ResourceNode {
    /// Whether the node can currently be harvested.
    pub const fn is_live(&self) -> bool {
        self.hp > 0
    }
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

/// A placed structure. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    /// Registry-assigned identifier.
    pub id: StructureId,
    /// Wall or camp.
    pub kind: StructureKind,
    /// Where it was placed.
    pub position: Position,
    /// The player who built it. May refer to a player who has since left.
    pub owner: PlayerId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_contains_edges() {
        let b = Bounds::new(100.0, 50.0);
        assert!(b.contains(Position::new(0.0, 0.0)));
        assert!(b.contains(Position::new(100.0, 50.0)));
        assert!(!b.contains(Position::new(100.5, 10.0)));
        assert!(!b.contains(Position::new(10.0, -0.1)));
    }

    #[test]
    fn inventory_slots_address_fields() {
        let mut inv = Inventory::default();
        *inv.slot_mut(Resource::Stone) = 4;
        assert_eq!(inv.stone, 4);
        assert_eq!(inv.get(Resource::Stone), 4);
        assert_eq!(inv.get(Resource::Wood), 0);
    }

    #[test]
    fn non_finite_positions_detected() {
        assert!(Position::new(1.0, 2.0).is_finite());
        assert!(!Position::new(f64::NAN, 2.0).is_finite());
        assert!(!Position::new(1.0, f64::INFINITY).is_finite());
    }
}

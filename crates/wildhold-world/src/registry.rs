//! The world registry: sole owner of players, resource nodes, and
//! structures.
//!
//! Every read and write of canonical entity state goes through [`World`].
//! Lookups are linear or map-based; entity counts are small and bounded so
//! no spatial index is kept.
//!
//! IDs are unique per collection for the life of the process: players and
//! structures draw from monotonic counters that never rewind, and nodes
//! keep the fixed ids they were seeded with.

use std::collections::BTreeMap;

use rand::Rng;
use wildhold_types::{
    Bounds, Inventory, MAX_HEALTH, NodeId, Player, PlayerId, Position, ResourceNode, Structure,
    StructureId, StructureKind,
};

use crate::error::WorldError;
use crate::geometry;

/// The canonical entity collections.
#[derive(Debug, Clone)]
pub struct World {
    /// World rectangle all positions are clamped into.
    bounds: Bounds,
    /// Live players keyed by id.
    players: BTreeMap<PlayerId, Player>,
    /// Resource nodes in seed order. Never added to or removed from.
    nodes: Vec<ResourceNode>,
    /// Structures in placement order. Append-only.
    structures: Vec<Structure>,
    /// Last player id handed out.
    last_player_id: u64,
    /// Last structure id handed out.
    last_structure_id: u64,
}

impl World {
    /// Create a registry over `bounds` holding the given seeded nodes and
    /// no players or structures.
    pub const fn new(bounds: Bounds, nodes: Vec<ResourceNode>) -> Self {
        Self {
            bounds,
            players: BTreeMap::new(),
            nodes,
            structures: Vec::new(),
            last_player_id: 0,
            last_structure_id: 0,
        }
    }

    /// The world rectangle.
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// A uniformly random position inside the world.
    pub fn random_position(&self, rng: &mut impl Rng) -> Position {
        geometry::random_position(rng, self.bounds)
    }

    // -------------------------------------------------------------------
    // Players
    // -------------------------------------------------------------------

    /// Create a player at `position` with full health and an empty
    /// inventory.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ArithmeticOverflow`] if the id counter is
    /// exhausted.
    pub fn add_player(
        &mut self,
        name: String,
        position: Position,
        now_ms: i64,
    ) -> Result<PlayerId, WorldError> {
        self.last_player_id = self
            .last_player_id
            .checked_add(1)
            .ok_or(WorldError::ArithmeticOverflow {
                context: "player id counter",
            })?;
        let id = PlayerId::new(self.last_player_id);
        self.players.insert(
            id,
            Player {
                id,
                name,
                position,
                health: MAX_HEALTH,
                kills: 0,
                inventory: Inventory::default(),
                last_active_ms: now_ms,
            },
        );
        Ok(id)
    }

    /// Remove a player, returning its final record.
    ///
    /// Structures the player built are left in place.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        self.players.remove(&id)
    }

    /// Look up a player.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Look up a player for mutation.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    /// Iterate over all players in id order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Number of live players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Record activity from a player.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlayerNotFound`] if the player is gone.
    pub fn touch(&mut self, id: PlayerId, now_ms: i64) -> Result<(), WorldError> {
        let player = self
            .players
            .get_mut(&id)
            .ok_or(WorldError::PlayerNotFound(id))?;
        player.last_active_ms = now_ms;
        Ok(())
    }

    /// Players whose last activity is strictly before `cutoff_ms`.
    pub fn idle_players(&self, cutoff_ms: i64) -> Vec<PlayerId> {
        self.players
            .values()
            .filter(|p| p.last_active_ms < cutoff_ms)
            .map(|p| p.id)
            .collect()
    }

    // -------------------------------------------------------------------
    // Resource nodes
    // -------------------------------------------------------------------

    /// All nodes in seed order.
    pub fn nodes(&self) -> &[ResourceNode] {
        &self.nodes
    }

    /// All nodes in seed order, for mutation. The slice cannot grow or
    /// shrink.
    pub fn nodes_mut(&mut self) -> &mut [ResourceNode] {
        &mut self.nodes
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&ResourceNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    // -------------------------------------------------------------------
    // Structures
    // -------------------------------------------------------------------

    /// All structures in placement order.
    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    /// Append a new structure owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ArithmeticOverflow`] if the id counter is
    /// exhausted.
    pub fn add_structure(
        &mut self,
        kind: StructureKind,
        position: Position,
        owner: PlayerId,
    ) -> Result<StructureId, WorldError> {
        self.last_structure_id = self
            .last_structure_id
            .checked_add(1)
            .ok_or(WorldError::ArithmeticOverflow {
                context: "structure id counter",
            })?;
        let id = StructureId::new(self.last_structure_id);
        self.structures.push(Structure {
            id,
            kind,
            position,
            owner,
        });
        Ok(id)
    }
}

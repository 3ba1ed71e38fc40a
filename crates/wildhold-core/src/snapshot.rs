//! Full-world snapshots for broadcast.
//!
//! No deltas and no interest filtering: every snapshot carries every
//! player, node, and structure.

use wildhold_types::{NodeView, PlayerView, StateSnapshot, StructureView};
use wildhold_world::World;

/// Serialize the entire registry at `tick`.
pub fn build_snapshot(world: &World, tick: u64) -> StateSnapshot {
    StateSnapshot {
        tick,
        players: world.players().map(|p| (p.id, PlayerView::from(p))).collect(),
        nodes: world.nodes().iter().map(NodeView::from).collect(),
        buildings: world.structures().iter().map(StructureView::from).collect(),
    }
}

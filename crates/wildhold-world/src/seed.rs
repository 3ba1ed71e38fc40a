//! Initial world population.
//!
//! Resource nodes are created once, when the world is seeded, and live for
//! the rest of the process. Each node gets a fixed id `1..=count`, a uniform
//! random kind and position, and a full hp pool drawn from
//! `MIN_NODE_HP..MAX_NODE_HP`.

use rand::Rng;
use tracing::debug;
use wildhold_types::{Bounds, NodeId, NodeKind, ResourceNode};

use crate::geometry;
use crate::registry::World;

/// Smallest possible node hp pool (inclusive).
pub const MIN_NODE_HP: u32 = 30;

/// Largest possible node hp pool (exclusive).
pub const MAX_NODE_HP: u32 = 80;

/// Generate `count` live resource nodes inside `bounds`.
pub fn seed_nodes(rng: &mut impl Rng, bounds: Bounds, count: u32) -> Vec<ResourceNode> {
    (1..=u64::from(count))
        .map(|raw| {
            let max_hp = rng.random_range(MIN_NODE_HP..MAX_NODE_HP);
            let kind = NodeKind::ALL
                .get(rng.random_range(0..NodeKind::ALL.len()))
                .copied()
                .unwrap_or(NodeKind::Tree);
            ResourceNode {
                id: NodeId::new(raw),
                kind,
                position: geometry::random_position(rng, bounds),
                hp: max_hp,
                max_hp,
                respawn_at: None,
            }
        })
        .collect()
}

/// Create a fresh world with `node_count` seeded nodes and no players.
pub fn create_world(rng: &mut impl Rng, bounds: Bounds, node_count: u32) -> World {
    let nodes = seed_nodes(rng, bounds, node_count);
    debug!(
        node_count = nodes.len(),
        width = bounds.width,
        height = bounds.height,
        "World seeded"
    );
    World::new(bounds, nodes)
}

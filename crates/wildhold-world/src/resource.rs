//! Depletion and regeneration of resource nodes.
//!
//! A [`ResourceNode`] is either live (`hp > 0`, no respawn time) or
//! depleted (`hp == 0`, respawn time set). [`strike`] moves a live node
//! toward depletion; [`respawn_due`] brings depleted nodes back once their
//! respawn time has elapsed, nudging them a little so repeated respawns do
//! not stack on the exact same spot.

use rand::Rng;
use wildhold_types::{Bounds, ResourceNode, Resource};

use crate::geometry;

/// Delay between depletion and respawn, in milliseconds.
pub const RESPAWN_DELAY_MS: i64 = 30_000;

/// Maximum per-axis position offset applied on respawn.
pub const RESPAWN_JITTER: f64 = 40.0;

/// Result of striking a live node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeOutcome {
    /// The node survived the hit.
    Damaged {
        /// Hit points left.
        remaining: u32,
    },
    /// The hit depleted the node. The yield is granted exactly once, here.
    Depleted {
        /// What the striker receives.
        resource: Resource,
        /// How much the striker receives.
        amount: u32,
    },
}

/// Apply `damage` to a live node.
///
/// Returns `None` without touching the node if it is already depleted.
/// On depletion the hp is zeroed and the respawn time is set to
/// `now_ms + RESPAWN_DELAY_MS`.
pub fn strike(node: &mut ResourceNode, damage: u32, now_ms: i64) -> Option<StrikeOutcome> {
    if !node.is_live() {
        return None;
    }

    node.hp = node.hp.saturating_sub(damage);
    if node.hp > 0 {
        return Some(StrikeOutcome::Damaged { remaining: node.hp });
    }

    node.respawn_at = Some(now_ms.saturating_add(RESPAWN_DELAY_MS));
    let (resource, amount) = node.kind.depletion_yield();
    Some(StrikeOutcome::Depleted { resource, amount })
}

/// Whether a depleted node's respawn time has elapsed.
pub const fn is_due(node: &ResourceNode, now_ms: i64) -> bool {
    match node.respawn_at {
        Some(at) => at <= now_ms,
        None => false,
    }
}

/// Restore a node to full hp at a slightly shifted position.
pub fn restore(node: &mut ResourceNode, rng: &mut impl Rng, bounds: Bounds) {
    node.hp = node.max_hp;
    node.respawn_at = None;
    node.position = geometry::jitter(rng, node.position, RESPAWN_JITTER, bounds);
}

/// Restore every depleted node whose respawn time has elapsed.
///
/// Returns the number of nodes restored.
pub fn respawn_due(
    nodes: &mut [ResourceNode],
    now_ms: i64,
    rng: &mut impl Rng,
    bounds: Bounds,
) -> usize {
    let mut restored: usize = 0;
    for node in nodes.iter_mut().filter(|n| is_due(n, now_ms)) {
        restore(node, rng, bounds);
        restored = restored.saturating_add(1);
    }
    restored
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use wildhold_types::{NodeId, NodeKind, Position};

    use super::*;

    const BOUNDS: Bounds = Bounds::new(1000.0, 1000.0);

    fn make_node(kind: NodeKind, hp: u32) -> ResourceNode {
        ResourceNode {
            id: NodeId::new(1),
            kind,
            position: Position::new(500.0, 500.0),
            hp,
            max_hp: hp,
            respawn_at: None,
        }
    }

    fn invariant_holds(node: &ResourceNode) -> bool {
        node.is_live() != node.respawn_at.is_some()
    }

    #[test]
    fn strike_damages_without_yield() {
        let mut node = make_node(NodeKind::Rock, 40);
        assert_eq!(strike(&mut node, 15, 0), Some(StrikeOutcome::Damaged { remaining: 25 }));
        assert!(invariant_holds(&node));
    }

    #[test]
    fn rock_yields_three_stone_exactly_once() {
        let mut node = make_node(NodeKind::Rock, 40);
        let mut stone = 0;
        for _ in 0..10 {
            if let Some(StrikeOutcome::Depleted { resource, amount }) =
                strike(&mut node, 15, 1_000)
            {
                assert_eq!(resource, Resource::Stone);
                stone += amount;
            }
            assert!(invariant_holds(&node));
        }
        assert_eq!(stone, 3);
        assert_eq!(node.hp, 0);
        assert_eq!(node.respawn_at, Some(1_000 + RESPAWN_DELAY_MS));
    }

    #[test]
    fn depleted_node_ignores_strikes() {
        let mut node = make_node(NodeKind::Tree, 10);
        assert!(matches!(strike(&mut node, 15, 0), Some(StrikeOutcome::Depleted { .. })));
        let before = node.clone();
        assert_eq!(strike(&mut node, 15, 5), None);
        assert_eq!(node, before);
    }

    #[test]
    fn respawn_waits_for_deadline() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut nodes = vec![make_node(NodeKind::Berry, 30)];
        if let Some(node) = nodes.first_mut() {
            strike(node, 30, 0);
        }

        assert_eq!(respawn_due(&mut nodes, RESPAWN_DELAY_MS - 1, &mut rng, BOUNDS), 0);
        assert!(nodes.iter().all(|n| n.hp == 0 && invariant_holds(n)));

        assert_eq!(respawn_due(&mut nodes, RESPAWN_DELAY_MS, &mut rng, BOUNDS), 1);
        assert!(nodes.iter().all(|n| n.hp == 30 && n.respawn_at.is_none()));
    }

    #[test]
    fn respawn_jitter_is_bounded_and_clamped() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut node = make_node(NodeKind::Wood, 50);
        node.position = Position::new(0.0, 1000.0);
        for _ in 0..100 {
            let origin = node.position;
            strike(&mut node, 50, 0);
            restore(&mut node, &mut rng, BOUNDS);
            assert!(BOUNDS.contains(node.position));
            assert!((node.position.x - origin.x).abs() <= RESPAWN_JITTER);
            assert!((node.position.y - origin.y).abs() <= RESPAWN_JITTER);
            assert!(invariant_holds(&node));
        }
    }
}

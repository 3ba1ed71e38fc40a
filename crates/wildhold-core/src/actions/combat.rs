//! Click resolution: attack another player, else harvest a resource node.
//!
//! A click resolves against at most one target. Players are checked first;
//! only when no player qualifies are nodes considered.
//!
//! A kill has no death state. The victim is healed to full and moved to a
//! random spot, losing up to [`MAX_LOOT`] wood of which the attacker keeps
//! half (rounded down).

use rand::Rng;
use tracing::debug;
use wildhold_types::{MAX_HEALTH, PlayerId, Position, RejectionReason, Resource};
use wildhold_world::{StrikeOutcome, World, geometry, inventory, resource};

use super::{ActionOutcome, ActionResult};
use crate::config::RulesConfig;

/// A player qualifies as an attack target when both the click and the
/// attacker are strictly within this distance of them.
pub const HIT_RADIUS: f64 = 40.0;

/// Health removed per hit.
pub const ATTACK_DAMAGE: u32 = 20;

/// Most wood a victim can lose to a single kill.
pub const MAX_LOOT: u32 = 5;

/// A node qualifies when the click is strictly within this distance.
pub const HARVEST_RADIUS: f64 = 50.0;

/// Node hit points removed per harvest click.
pub const HARVEST_DAMAGE: u32 = 15;

/// Resolve a click at `target` by `actor`.
pub fn execute_click(
    world: &mut World,
    actor: PlayerId,
    target: Position,
    rules: &RulesConfig,
    now_ms: i64,
    rng: &mut impl Rng,
) -> ActionResult {
    if !target.is_finite() {
        return Err(RejectionReason::InvalidCoordinates);
    }
    let origin = world
        .player(actor)
        .ok_or(RejectionReason::PlayerNotFound)?
        .position;

    if let Some(victim) = find_victim(world, actor, origin, target) {
        return execute_attack(world, actor, victim, rng);
    }
    execute_harvest(world, actor, origin, target, rules.action_range, now_ms)
}

/// The other player nearest the click that is within [`HIT_RADIUS`] of
/// both the click and the attacker. Ties go to the lowest id.
fn find_victim(
    world: &World,
    actor: PlayerId,
    origin: Position,
    target: Position,
) -> Option<PlayerId> {
    world
        .players()
        .filter(|p| p.id != actor)
        .filter(|p| geometry::within(target, p.position, HIT_RADIUS))
        .filter(|p| geometry::within(origin, p.position, HIT_RADIUS))
        .map(|p| (geometry::distance(target, p.position), p.id))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, id)| id)
}

/// Hit `victim` once, applying the kill policy if the hit is lethal.
pub fn execute_attack(
    world: &mut World,
    attacker: PlayerId,
    victim: PlayerId,
    rng: &mut impl Rng,
) -> ActionResult {
    let respawn_at = world.random_position(rng);
    let target = world
        .player_mut(victim)
        .ok_or(RejectionReason::PlayerNotFound)?;

    target.health = target.health.saturating_sub(ATTACK_DAMAGE);
    if target.health > 0 {
        return Ok(ActionOutcome::Attacked {
            victim,
            killed: false,
            looted: 0,
        });
    }

    let lost = inventory::take_up_to(&mut target.inventory, Resource::Wood, MAX_LOOT);
    target.health = MAX_HEALTH;
    target.position = respawn_at;

    let looted = lost / 2;
    let winner = world
        .player_mut(attacker)
        .ok_or(RejectionReason::PlayerNotFound)?;
    winner.kills = winner.kills.saturating_add(1);
    inventory::add_resource(&mut winner.inventory, Resource::Wood, looted)?;

    debug!(attacker = %attacker, victim = %victim, looted, "Player killed");
    Ok(ActionOutcome::Attacked {
        victim,
        killed: true,
        looted,
    })
}

/// Strike the first live node under the click that the actor can reach.
fn execute_harvest(
    world: &mut World,
    actor: PlayerId,
    origin: Position,
    target: Position,
    range: f64,
    now_ms: i64,
) -> ActionResult {
    let node = world
        .nodes_mut()
        .iter_mut()
        .find(|n| {
            n.is_live()
                && geometry::within(target, n.position, HARVEST_RADIUS)
                && geometry::within(origin, n.position, range)
        })
        .ok_or(RejectionReason::NoTarget)?;
    let node_id = node.id;
    let strike =
        resource::strike(node, HARVEST_DAMAGE, now_ms).ok_or(RejectionReason::NoTarget)?;

    if let StrikeOutcome::Depleted { resource, amount } = strike {
        let player = world
            .player_mut(actor)
            .ok_or(RejectionReason::PlayerNotFound)?;
        inventory::add_resource(&mut player.inventory, resource, amount)?;
        debug!(player = %actor, node = %node_id, ?resource, amount, "Node depleted");
    }
    Ok(ActionOutcome::Harvested {
        node: node_id,
        strike,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use wildhold_types::{Inventory, NodeId, NodeKind};
    use wildhold_world::RESPAWN_DELAY_MS;

    use super::super::test_support::{BOUNDS, node, spawn, world_with};
    use super::*;

    fn click(world: &mut World, actor: PlayerId, x: f64, y: f64, now_ms: i64) -> ActionResult {
        let mut rng = SmallRng::seed_from_u64(3);
        execute_click(world, actor, Position::new(x, y), &RulesConfig::default(), now_ms, &mut rng)
    }

    fn health(world: &World, id: PlayerId) -> Option<u32> {
        world.player(id).map(|p| p.health)
    }

    fn wood(world: &World, id: PlayerId) -> Option<u32> {
        world.player(id).map(|p| p.inventory.wood)
    }

    #[test]
    fn hit_at_thirty_nine_units() {
        let mut world = world_with(Vec::new());
        let a = spawn(&mut world, "a", 100.0, 100.0);
        let b = spawn(&mut world, "b", 139.0, 100.0);

        let result = click(&mut world, a, 139.0, 100.0, 0);
        assert_eq!(
            result,
            Ok(ActionOutcome::Attacked { victim: b, killed: false, looted: 0 })
        );
        assert_eq!(health(&world, b), Some(MAX_HEALTH - ATTACK_DAMAGE));
    }

    #[test]
    fn miss_at_forty_one_units_falls_through_to_nodes() {
        let mut world = world_with(vec![node(1, NodeKind::Tree, 141.0, 110.0, 60)]);
        let a = spawn(&mut world, "a", 100.0, 100.0);
        let b = spawn(&mut world, "b", 141.0, 100.0);

        let result = click(&mut world, a, 141.0, 100.0, 0);
        assert!(matches!(result, Ok(ActionOutcome::Harvested { node, .. }) if node == NodeId::new(1)));
        assert_eq!(health(&world, b), Some(MAX_HEALTH));
        assert_eq!(world.node(NodeId::new(1)).map(|n| n.hp), Some(45));
    }

    #[test]
    fn attack_wins_over_harvest() {
        let mut world = world_with(vec![node(1, NodeKind::Tree, 120.0, 100.0, 60)]);
        let a = spawn(&mut world, "a", 100.0, 100.0);
        let b = spawn(&mut world, "b", 120.0, 100.0);

        assert!(matches!(
            click(&mut world, a, 120.0, 100.0, 0),
            Ok(ActionOutcome::Attacked { .. })
        ));
        assert_eq!(health(&world, b), Some(80));
        assert_eq!(world.node(NodeId::new(1)).map(|n| n.hp), Some(60));
    }

    #[test]
    fn nearest_player_to_click_is_hit() {
        let mut world = world_with(Vec::new());
        let a = spawn(&mut world, "a", 100.0, 100.0);
        let far = spawn(&mut world, "far", 100.0, 130.0);
        let near = spawn(&mut world, "near", 110.0, 100.0);

        let result = click(&mut world, a, 112.0, 100.0, 0);
        assert!(matches!(result, Ok(ActionOutcome::Attacked { victim, .. }) if victim == near));
        assert_eq!(health(&world, far), Some(MAX_HEALTH));
    }

    #[test]
    fn self_click_is_never_an_attack() {
        let mut world = world_with(Vec::new());
        let a = spawn(&mut world, "a", 100.0, 100.0);
        assert_eq!(click(&mut world, a, 100.0, 100.0, 0), Err(RejectionReason::NoTarget));
        assert_eq!(health(&world, a), Some(MAX_HEALTH));
    }

    #[test]
    fn kill_policy() {
        for (victim_wood, loot, left) in [(0, 0, 0), (1, 0, 0), (3, 1, 0), (5, 2, 0), (9, 2, 4)] {
            let mut world = world_with(Vec::new());
            let a = spawn(&mut world, "a", 100.0, 100.0);
            let b = spawn(&mut world, "b", 110.0, 100.0);
            if let Some(p) = world.player_mut(b) {
                p.health = ATTACK_DAMAGE;
                p.inventory = Inventory { wood: victim_wood, stone: 2, food: 1 };
            }

            let result = click(&mut world, a, 110.0, 100.0, 0);
            assert_eq!(
                result,
                Ok(ActionOutcome::Attacked { victim: b, killed: true, looted: loot })
            );

            let victim = world.player(b).map(|p| (p.health, p.inventory, BOUNDS.contains(p.position)));
            assert_eq!(
                victim,
                Some((MAX_HEALTH, Inventory { wood: left, stone: 2, food: 1 }, true))
            );
            assert_eq!(wood(&world, a), Some(loot));
            assert_eq!(world.player(a).map(|p| p.kills), Some(1));
        }
    }

    #[test]
    fn five_hits_kill() {
        let mut world = world_with(Vec::new());
        let a = spawn(&mut world, "a", 100.0, 100.0);
        let b = spawn(&mut world, "b", 100.0, 120.0);
        for _ in 0..4 {
            assert!(matches!(
                click(&mut world, a, 100.0, 120.0, 0),
                Ok(ActionOutcome::Attacked { killed: false, .. })
            ));
        }
        assert_eq!(health(&world, b), Some(20));
        assert!(matches!(
            click(&mut world, a, 100.0, 120.0, 0),
            Ok(ActionOutcome::Attacked { killed: true, .. })
        ));
    }

    #[test]
    fn rock_yields_three_stone_exactly_once() {
        let mut world = world_with(vec![node(1, NodeKind::Rock, 130.0, 100.0, 40)]);
        let a = spawn(&mut world, "a", 100.0, 100.0);

        let mut stone = Vec::new();
        for t in 0..6 {
            let _ = click(&mut world, a, 130.0, 100.0, t);
            stone.push(world.player(a).map_or(0, |p| p.inventory.stone));
        }
        // 40 hp: 25, 10, depleted on the third click.
        assert_eq!(stone, vec![0, 0, 3, 3, 3, 3]);
        let n = world.node(NodeId::new(1));
        assert_eq!(n.map(|n| (n.hp, n.respawn_at)), Some((0, Some(2 + RESPAWN_DELAY_MS))));
    }

    #[test]
    fn tree_grants_five_wood_on_depletion_only() {
        let mut world = world_with(vec![node(1, NodeKind::Tree, 100.0, 160.0, 79)]);
        let a = spawn(&mut world, "a", 100.0, 100.0);

        let mut history = Vec::new();
        for _ in 0..8 {
            let _ = click(&mut world, a, 100.0, 160.0, 1_000);
            history.push(wood(&world, a).unwrap_or(0));
        }
        // 79 hp needs six hits.
        assert_eq!(history, vec![0, 0, 0, 0, 0, 5, 5, 5]);
    }

    #[test]
    fn depleted_node_is_not_a_target() {
        let mut depleted = node(1, NodeKind::Berry, 120.0, 100.0, 30);
        depleted.hp = 0;
        depleted.respawn_at = Some(5_000);
        let mut world = world_with(vec![depleted]);
        let a = spawn(&mut world, "a", 100.0, 100.0);

        assert_eq!(click(&mut world, a, 120.0, 100.0, 4_999), Err(RejectionReason::NoTarget));
        assert_eq!(world.node(NodeId::new(1)).map(|n| n.hp), Some(0));
        assert_eq!(world.player(a).map(|p| p.inventory.food), Some(0));
    }

    #[test]
    fn node_must_be_in_action_range_of_actor() {
        // Click is on the node but the actor stands 90 units away.
        let mut world = world_with(vec![node(1, NodeKind::Tree, 190.0, 100.0, 60)]);
        let a = spawn(&mut world, "a", 100.0, 100.0);
        assert_eq!(click(&mut world, a, 190.0, 100.0, 0), Err(RejectionReason::NoTarget));
        assert_eq!(world.node(NodeId::new(1)).map(|n| n.hp), Some(60));
    }

    #[test]
    fn first_qualifying_node_in_registry_order() {
        let mut world = world_with(vec![
            node(1, NodeKind::Tree, 130.0, 100.0, 60),
            node(2, NodeKind::Rock, 120.0, 100.0, 60),
        ]);
        let a = spawn(&mut world, "a", 100.0, 100.0);
        let result = click(&mut world, a, 125.0, 100.0, 0);
        assert!(matches!(result, Ok(ActionOutcome::Harvested { node, .. }) if node == NodeId::new(1)));
        assert_eq!(world.node(NodeId::new(2)).map(|n| n.hp), Some(60));
    }

    #[test]
    fn wood_node_yields_eight() {
        let mut world = world_with(vec![node(1, NodeKind::Wood, 100.0, 100.0, 15)]);
        let a = spawn(&mut world, "a", 100.0, 100.0);
        assert!(click(&mut world, a, 100.0, 100.0, 0).is_ok());
        assert_eq!(wood(&world, a), Some(8));
    }
}

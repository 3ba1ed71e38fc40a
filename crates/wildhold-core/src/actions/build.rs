//! Structure placement.

use wildhold_types::{PlayerId, Position, RejectionReason, StructureKind};
use wildhold_world::{World, geometry, inventory, structure};

use super::{ActionOutcome, ActionResult};

/// Place a structure of `kind` at `target`.
///
/// The target must be strictly within `range` of the actor and the actor
/// must hold the full cost. On success the cost is debited and the new
/// structure is owned by the actor.
pub fn execute_build(
    world: &mut World,
    actor: PlayerId,
    kind: StructureKind,
    target: Position,
    range: f64,
) -> ActionResult {
    if !target.is_finite() {
        return Err(RejectionReason::InvalidCoordinates);
    }
    let bounds = world.bounds();
    let player = world
        .player_mut(actor)
        .ok_or(RejectionReason::PlayerNotFound)?;

    if !geometry::within(player.position, target, range) {
        return Err(RejectionReason::OutOfRange);
    }
    let costs = structure::cost(kind);
    if !inventory::can_afford(&player.inventory, costs) {
        return Err(RejectionReason::InsufficientResources);
    }

    let mut paid = player.inventory;
    inventory::debit_all(&mut paid, costs)?;
    let id = world.add_structure(kind, geometry::clamp(target, bounds), actor)?;
    if let Some(player) = world.player_mut(actor) {
        player.inventory = paid;
    }
    Ok(ActionOutcome::Built { id })
}

#[cfg(test)]
mod tests {
    use wildhold_types::{Inventory, StructureId};

    use super::super::test_support::{spawn, world_with};
    use super::*;

    const RANGE: f64 = 80.0;

    fn give(world: &mut World, id: PlayerId, wood: u32, stone: u32) {
        if let Some(p) = world.player_mut(id) {
            p.inventory = Inventory {
                wood,
                stone,
                food: 0,
            };
        }
    }

    fn inventory_of(world: &World, id: PlayerId) -> Option<Inventory> {
        world.player(id).map(|p| p.inventory)
    }

    #[test]
    fn wall_with_four_wood_is_rejected() {
        let mut world = world_with(Vec::new());
        let a = spawn(&mut world, "a", 100.0, 100.0);
        give(&mut world, a, 4, 0);

        let result = execute_build(&mut world, a, StructureKind::Wall, Position::new(120.0, 100.0), RANGE);
        assert_eq!(result, Err(RejectionReason::InsufficientResources));
        assert_eq!(inventory_of(&world, a), Some(Inventory { wood: 4, stone: 0, food: 0 }));
        assert!(world.structures().is_empty());
    }

    #[test]
    fn camp_debits_exact_cost() {
        let mut world = world_with(Vec::new());
        let a = spawn(&mut world, "a", 100.0, 100.0);
        give(&mut world, a, 12, 7);

        let result = execute_build(&mut world, a, StructureKind::Camp, Position::new(100.0, 150.0), RANGE);
        assert_eq!(result, Ok(ActionOutcome::Built { id: StructureId::new(1) }));
        assert_eq!(inventory_of(&world, a), Some(Inventory { wood: 2, stone: 2, food: 0 }));

        let built = world.structures().first().map(|s| (s.kind, s.owner, s.position));
        assert_eq!(built, Some((StructureKind::Camp, a, Position::new(100.0, 150.0))));
    }

    #[test]
    fn camp_needs_stone_too() {
        let mut world = world_with(Vec::new());
        let a = spawn(&mut world, "a", 100.0, 100.0);
        give(&mut world, a, 50, 4);
        let result = execute_build(&mut world, a, StructureKind::Camp, Position::new(100.0, 100.0), RANGE);
        assert_eq!(result, Err(RejectionReason::InsufficientResources));
        assert_eq!(inventory_of(&world, a), Some(Inventory { wood: 50, stone: 4, food: 0 }));
    }

    #[test]
    fn range_is_strict() {
        let mut world = world_with(Vec::new());
        let a = spawn(&mut world, "a", 100.0, 100.0);
        give(&mut world, a, 20, 0);

        let at_limit = execute_build(&mut world, a, StructureKind::Wall, Position::new(180.0, 100.0), RANGE);
        assert_eq!(at_limit, Err(RejectionReason::OutOfRange));
        assert_eq!(inventory_of(&world, a).map(|i| i.wood), Some(20));

        let inside = execute_build(&mut world, a, StructureKind::Wall, Position::new(179.0, 100.0), RANGE);
        assert!(inside.is_ok());
        assert_eq!(inventory_of(&world, a).map(|i| i.wood), Some(15));
    }

    #[test]
    fn nan_target_rejected() {
        let mut world = world_with(Vec::new());
        let a = spawn(&mut world, "a", 100.0, 100.0);
        give(&mut world, a, 20, 0);
        let result = execute_build(&mut world, a, StructureKind::Wall, Position::new(f64::NAN, 0.0), RANGE);
        assert_eq!(result, Err(RejectionReason::InvalidCoordinates));
    }
}

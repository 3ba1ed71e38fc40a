//! Inventory operations for players.
//!
//! All mutations use checked arithmetic -- no silent overflows, no panics.
//! Multi-resource debits are all-or-nothing: either every cost is paid or
//! the inventory is untouched.

use wildhold_types::{Inventory, Resource};

use crate::error::WorldError;

/// Check whether the inventory holds at least `amount` of `resource`.
pub const fn has_resource(inventory: &Inventory, resource: Resource, amount: u32) -> bool {
    inventory.get(resource) >= amount
}

/// Check whether the inventory covers every `(resource, amount)` pair.
pub fn can_afford(inventory: &Inventory, costs: &[(Resource, u32)]) -> bool {
    costs
        .iter()
        .all(|&(resource, amount)| has_resource(inventory, resource, amount))
}

/// Add `amount` units of `resource`.
pub fn add_resource(
    inventory: &mut Inventory,
    resource: Resource,
    amount: u32,
) -> Result<(), WorldError> {
    let slot = inventory.slot_mut(resource);
    *slot = slot.checked_add(amount).ok_or(WorldError::ArithmeticOverflow {
        context: "inventory add",
    })?;
    Ok(())
}

/// Remove `amount` units of `resource`.
///
/// Fails without changing anything if the player holds less than `amount`.
pub fn remove_resource(
    inventory: &mut Inventory,
    resource: Resource,
    amount: u32,
) -> Result<(), WorldError> {
    let available = inventory.get(resource);
    let remaining = available
        .checked_sub(amount)
        .ok_or(WorldError::InsufficientResource {
            resource,
            requested: amount,
            available,
        })?;
    *inventory.slot_mut(resource) = remaining;
    Ok(())
}

/// Pay every cost in `costs`, or nothing at all.
pub fn debit_all(inventory: &mut Inventory, costs: &[(Resource, u32)]) -> Result<(), WorldError> {
    if let Some(&(resource, amount)) = costs
        .iter()
        .find(|&&(resource, amount)| !has_resource(inventory, resource, amount))
    {
        return Err(WorldError::InsufficientResource {
            resource,
            requested: amount,
            available: inventory.get(resource),
        });
    }
    for &(resource, amount) in costs {
        remove_resource(inventory, resource, amount)?;
    }
    Ok(())
}

/// Remove up to `amount` units of `resource`, stopping at zero.
///
/// Returns the number of units actually removed.
pub fn take_up_to(inventory: &mut Inventory, resource: Resource, amount: u32) -> u32 {
    let slot = inventory.slot_mut(resource);
    let taken = amount.min(*slot);
    *slot = slot.saturating_sub(taken);
    taken
}

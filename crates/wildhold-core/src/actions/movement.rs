//! Keyboard movement and tap-move.
//!
//! Held keys combine into a direction that is normalized before scaling,
//! so diagonal motion is never faster than axial motion. Every resulting
//! position is clamped into the world rectangle.

use wildhold_types::{KeyState, PlayerId, Position, RejectionReason};
use wildhold_world::{World, geometry};

use super::{ActionOutcome, ActionResult};

/// Elapsed time assumed when an input omits `dt` or sends a bad value.
pub const DEFAULT_DT_MS: f64 = 100.0;

/// Largest `dt` accepted from a client.
pub const MAX_DT_MS: f64 = 1000.0;

/// Length of a single tap-move nudge.
pub const TAP_STEP: f64 = 40.0;

/// The elapsed time to integrate over, in milliseconds.
pub fn effective_dt_ms(dt: Option<f64>) -> f64 {
    match dt {
        Some(ms) if ms.is_finite() && ms > 0.0 && ms <= MAX_DT_MS => ms,
        _ => DEFAULT_DT_MS,
    }
}

/// Velocity in units per second for the held keys.
///
/// Opposite keys cancel. The result has magnitude `speed` when any
/// direction survives and zero otherwise.
pub fn velocity(keys: KeyState, speed: f64) -> (f64, f64) {
    let axis = |neg: bool, pos: bool| match (neg, pos) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    };
    let (ux, uy) = geometry::normalize(axis(keys.left, keys.right), axis(keys.up, keys.down));
    (ux * speed, uy * speed)
}

/// Move the actor for `dt` milliseconds with `keys` held.
pub fn execute_move(
    world: &mut World,
    actor: PlayerId,
    keys: KeyState,
    dt: Option<f64>,
    speed: f64,
) -> ActionResult {
    let bounds = world.bounds();
    let player = world
        .player_mut(actor)
        .ok_or(RejectionReason::PlayerNotFound)?;

    let secs = effective_dt_ms(dt) / 1000.0;
    let (vx, vy) = velocity(keys, speed);
    let next = Position::new(
        player.position.x + vx * secs,
        player.position.y + vy * secs,
    );
    player.position = geometry::clamp(next, bounds);
    Ok(ActionOutcome::Moved {
        to: player.position,
    })
}

/// Nudge the actor up to [`TAP_STEP`] units toward `target`.
pub fn execute_tap_move(world: &mut World, actor: PlayerId, target: Position) -> ActionResult {
    if !target.is_finite() {
        return Err(RejectionReason::InvalidCoordinates);
    }
    let bounds = world.bounds();
    let player = world
        .player_mut(actor)
        .ok_or(RejectionReason::PlayerNotFound)?;
    let next = geometry::step_toward(player.position, target, TAP_STEP);
    player.position = geometry::clamp(next, bounds);
    Ok(ActionOutcome::Moved {
        to: player.position,
    })
}

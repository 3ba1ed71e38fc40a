//! Distance, clamping, and stepping helpers for positions in the world
//! rectangle.
//!
//! All range checks in the simulation are Euclidean and strict: a target at
//! exactly the limit is out of range.

use rand::Rng;
use wildhold_types::{Bounds, Position};

/// Euclidean distance between two positions.
pub fn distance(a: Position, b: Position) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Whether `b` lies strictly within `range` of `a`.
pub fn within(a: Position, b: Position, range: f64) -> bool {
    distance(a, b) < range
}

/// Clamp a position into the closed world rectangle.
pub fn clamp(pos: Position, bounds: Bounds) -> Position {
    Position::new(pos.x.clamp(0.0, bounds.width), pos.y.clamp(0.0, bounds.height))
}

/// Scale `(dx, dy)` to unit length. A zero vector stays zero.
pub fn normalize(dx: f64, dy: f64) -> (f64, f64) {
    let len = dx.hypot(dy);
    if len > 0.0 { (dx / len, dy / len) } else { (0.0, 0.0) }
}

/// Move from `from` toward `to` by at most `max_step` units.
///
/// Lands exactly on `to` when it is closer than `max_step`.
pub fn step_toward(from: Position, to: Position, max_step: f64) -> Position {
    let dist = distance(from, to);
    if dist <= max_step {
        return to;
    }
    let (ux, uy) = normalize(to.x - from.x, to.y - from.y);
    Position::new(from.x + ux * max_step, from.y + uy * max_step)
}

/// A uniformly random position inside `bounds`.
pub fn random_position(rng: &mut impl Rng, bounds: Bounds) -> Position {
    Position::new(
        rng.random_range(0.0..=bounds.width),
        rng.random_range(0.0..=bounds.height),
    )
}

/// Offset `pos` by up to `spread` units on each axis, then clamp to bounds.
pub fn jitter(rng: &mut impl Rng, pos: Position, spread: f64, bounds: Bounds) -> Position {
    let dx = rng.random_range(-spread..=spread);
    let dy = rng.random_range(-spread..=spread);
    clamp(Position::new(pos.x + dx, pos.y + dy), bounds)
}

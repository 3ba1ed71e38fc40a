//! Intent resolution for joined players.
//!
//! Every client message other than `join` is resolved here against the
//! [`World`] on behalf of one acting player. Resolution is all-or-nothing:
//! a handler either applies its full effect and returns an
//! [`ActionOutcome`], or returns a [`RejectionReason`] having changed
//! nothing.
//!
//! # Submodules
//!
//! - [`movement`] -- Keyboard movement and tap-move nudges.
//! - [`text`] -- Chat and rename sanitizing.
//! - [`build`] -- Structure placement.
//! - [`combat`] -- Click resolution: attack, else harvest.

pub mod build;
pub mod combat;
pub mod movement;
pub mod text;

use rand::Rng;
use wildhold_types::{
    ClientMessage, NodeId, PlayerId, PointerAction, Position, RejectionReason, StructureId,
};
use wildhold_world::{StrikeOutcome, World};

use crate::config::RulesConfig;

/// What a successfully resolved intent did.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The actor's position changed (or stayed put with no keys held).
    Moved {
        /// Position after clamping.
        to: Position,
    },
    /// A chat line to rebroadcast.
    Chat {
        /// The sender's current display name.
        from_name: String,
        /// Sanitized text.
        text: String,
    },
    /// The actor took a new display name.
    Renamed {
        /// The sanitized name.
        name: String,
    },
    /// A structure was placed.
    Built {
        /// The new structure.
        id: StructureId,
    },
    /// Another player was hit.
    Attacked {
        /// Who was hit.
        victim: PlayerId,
        /// Whether the hit was lethal.
        killed: bool,
        /// Wood moved to the attacker on a kill.
        looted: u32,
    },
    /// A resource node was struck.
    Harvested {
        /// Which node.
        node: NodeId,
        /// Damage or depletion.
        strike: StrikeOutcome,
    },
    /// Keepalive; nothing to do beyond refreshing activity.
    Pong,
}

/// Result type returned by every action handler.
pub type ActionResult = Result<ActionOutcome, RejectionReason>;

/// Dispatch a client message to the matching handler.
///
/// `join` is handled by the session layer and is rejected here as
/// [`RejectionReason::AlreadyJoined`], since the actor already exists.
pub fn execute_action(
    world: &mut World,
    actor: PlayerId,
    message: &ClientMessage,
    rules: &RulesConfig,
    now_ms: i64,
    rng: &mut impl Rng,
) -> ActionResult {
    match message {
        ClientMessage::Join { .. } => Err(RejectionReason::AlreadyJoined),
        ClientMessage::Input { keys, dt } => {
            movement::execute_move(world, actor, *keys, *dt, rules.player_speed)
        }
        ClientMessage::Chat { text } => text::execute_chat(world, actor, text),
        ClientMessage::SetName { name } => text::execute_rename(world, actor, name),
        ClientMessage::Place { kind, x, y } => build::execute_build(
            world,
            actor,
            *kind,
            Position::new(*x, *y),
            rules.action_range,
        ),
        ClientMessage::Action {
            action: PointerAction::Click,
            x,
            y,
        } => combat::execute_click(world, actor, Position::new(*x, *y), rules, now_ms, rng),
        ClientMessage::Action {
            action: PointerAction::TapMove,
            x,
            y,
        } => movement::execute_tap_move(world, actor, Position::new(*x, *y)),
        ClientMessage::Ping => {
            if world.player(actor).is_some() {
                Ok(ActionOutcome::Pong)
            } else {
                Err(RejectionReason::PlayerNotFound)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use wildhold_types::{Bounds, NodeId, NodeKind, Position, ResourceNode};
    use wildhold_world::World;

    pub const BOUNDS: Bounds = Bounds::new(1000.0, 1000.0);

    pub fn node(raw: u64, kind: NodeKind, x: f64, y: f64, hp: u32) -> ResourceNode {
        ResourceNode {
            id: NodeId::new(raw),
            kind,
            position: Position::new(x, y),
            hp,
            max_hp: hp,
            respawn_at: None,
        }
    }

    pub fn world_with(nodes: Vec<ResourceNode>) -> World {
        World::new(BOUNDS, nodes)
    }

    pub fn spawn(world: &mut World, name: &str, x: f64, y: f64) -> wildhold_types::PlayerId {
        world
            .add_player(name.to_owned(), Position::new(x, y), 0)
            .unwrap_or(wildhold_types::PlayerId::new(0))
    }
}

//! Wire protocol between the server and rendering clients.
//!
//! Every message is a JSON object tagged by a `"type"` field. Clients only
//! ever send [`ClientMessage`] and only ever receive [`ServerMessage`].
//!
//! Validation happens at this boundary: a payload that does not deserialize
//! into one of the variants below is malformed and dropped by the transport.
//! Optional fields carry serde defaults so absent values never flow into
//! movement or combat math as garbage.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::enums::{NodeKind, PointerAction, StructureKind};
use crate::ids::{NodeId, PlayerId, StructureId};
use crate::structs::{Inventory, Player, Position, ResourceNode, Structure};

// ---------------------------------------------------------------------------
// Client -> Server
// ---------------------------------------------------------------------------

/// Directional movement flags. Any combination may be set.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct KeyState {
    /// Move toward `y = 0`.
    #[serde(default)]
    pub up: bool,
    /// Move toward `y = height`.
    #[serde(default)]
    pub down: bool,
    /// Move toward `x = 0`.
    #[serde(default)]
    pub left: bool,
    /// Move toward `x = width`.
    #[serde(default)]
    pub right: bool,
}

impl KeyState {
    /// Whether any direction is held.
    pub const fn any(self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Accept any JSON value, keeping it only when it is a number.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Number(f64),
        Other(IgnoredAny),
    }

    Ok(match Lenient::deserialize(deserializer)? {
        Lenient::Number(n) => Some(n),
        Lenient::Other(IgnoredAny) => None,
    })
}

/// A message sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum ClientMessage {
    /// Bind this connection to a new player.
    Join {
        /// Requested display name.
        #[serde(default)]
        name: String,
    },
    /// Held movement keys for the last `dt` milliseconds.
    Input {
        /// Directional flags.
        #[serde(default)]
        keys: KeyState,
        /// Elapsed milliseconds since the previous input. Anything that is
        /// not a number reads as absent.
        #[serde(default, deserialize_with = "lenient_number")]
        dt: Option<f64>,
    },
    /// A chat line.
    Chat {
        /// Raw text as typed.
        text: String,
    },
    /// Place a structure.
    Place {
        /// What to build.
        kind: StructureKind,
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// A pointer action at a world position.
    Action {
        /// Click or tap-move.
        action: PointerAction,
        /// Pointer x.
        x: f64,
        /// Pointer y.
        y: f64,
    },
    /// Change display name.
    SetName {
        /// Requested display name.
        name: String,
    },
    /// Keepalive.
    Ping,
}

// ---------------------------------------------------------------------------
// Server -> Client
// ---------------------------------------------------------------------------

/// A player as seen in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerView {
    /// Player identifier.
    pub id: PlayerId,
    /// Position x.
    pub x: f64,
    /// Position y.
    pub y: f64,
    /// Current health.
    pub hp: u32,
    /// Display name.
    pub name: String,
    /// Kill count.
    pub kills: u32,
    /// Carried resources.
    pub inv: Inventory,
}

impl From<&Player> for PlayerView {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            x: p.position.x,
            y: p.position.y,
            hp: p.health,
            name: p.name.clone(),
            kills: p.kills,
            inv: p.inventory,
        }
    }
}

/// A resource node as seen in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NodeView {
    /// Node identifier.
    pub id: NodeId,
    /// Node type.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Position x.
    pub x: f64,
    /// Position y.
    pub y: f64,
    /// Remaining hit points.
    pub hp: u32,
    /// Hit points when live.
    #[serde(rename = "maxHp")]
    pub max_hp: u32,
    /// Epoch milliseconds when a depleted node returns; `null` when live.
    #[serde(rename = "respawnAt")]
    #[ts(type = "number | null")]
    pub respawn_at: Option<i64>,
}

impl From<&ResourceNode> for NodeView {
    fn from(n: &ResourceNode) -> Self {
        Self {
            id: n.id,
            kind: n.kind,
            x: n.position.x,
            y: n.position.y,
            hp: n.hp,
            max_hp: n.max_hp,
            respawn_at: n.respawn_at,
        }
    }
}

/// A structure as seen in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StructureView {
    /// Structure identifier.
    pub id: StructureId,
    /// Wall or camp.
    pub kind: StructureKind,
    /// Position x.
    pub x: f64,
    /// Position y.
    pub y: f64,
    /// Builder.
    pub owner: PlayerId,
}

impl From<&Structure> for StructureView {
    fn from(s: &Structure) -> Self {
        Self {
            id: s.id,
            kind: s.kind,
            x: s.position.x,
            y: s.position.y,
            owner: s.owner,
        }
    }
}

/// The complete world state at one broadcast.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StateSnapshot {
    /// Broadcast counter.
    #[ts(type = "number")]
    pub tick: u64,
    /// All players keyed by id.
    pub players: BTreeMap<PlayerId, PlayerView>,
    /// All resource nodes in registry order.
    pub nodes: Vec<NodeView>,
    /// All structures in placement order.
    pub buildings: Vec<StructureView>,
}

/// A message sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum ServerMessage {
    /// Sent once to a session after a successful join.
    Welcome {
        /// The joined player's id.
        id: PlayerId,
        /// Full world state at join time.
        state: StateSnapshot,
        /// Current broadcast counter.
        #[ts(type = "number")]
        tick: u64,
    },
    /// Periodic full snapshot.
    State(StateSnapshot),
    /// A chat line from a player.
    Chat {
        /// Sender's display name at send time.
        #[serde(rename = "fromName")]
        from_name: String,
        /// Escaped text.
        text: String,
    },
    /// A player disconnected or timed out.
    PlayerLeft {
        /// The departed player's id.
        id: PlayerId,
        /// The departed player's last display name.
        name: String,
    },
}

/// Convenience accessor used by clients and tests.
impl StateSnapshot {
    /// Position of a player in this snapshot, if present.
    pub fn player_position(&self, id: PlayerId) -> Option<Position> {
        self.players.get(&id).map(|p| Position::new(p.x, p.y))
    }
}

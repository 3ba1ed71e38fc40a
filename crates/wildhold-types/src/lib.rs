//! Shared type definitions for the Wildhold world server.
//!
//! This crate is the single source of truth for all types used across the
//! Wildhold workspace. Wire types flow downstream to `TypeScript` via `ts-rs`
//! for the rendering client.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe `u64` wrappers for all entity identifiers
//! - [`enums`] -- Resource, node, structure, and action enumerations
//! - [`structs`] -- Canonical entity records (players, nodes, structures)
//! - [`protocol`] -- Client and server messages and the state snapshot

pub mod enums;
pub mod ids;
pub mod protocol;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{NodeKind, PointerAction, RejectionReason, Resource, StructureKind};
pub use ids::{NodeId, PlayerId, SessionId, StructureId};
pub use protocol::{
    ClientMessage, KeyState, NodeView, PlayerView, ServerMessage, StateSnapshot, StructureView,
};
pub use structs::{
    Bounds, Inventory, MAX_HEALTH, Player, Position, ResourceNode, Structure,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the rendering client.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. The files are written to the
        // `bindings/` directory relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::PlayerId::export_all();
        let _ = crate::ids::NodeId::export_all();
        let _ = crate::ids::StructureId::export_all();
        let _ = crate::ids::SessionId::export_all();

        // Enums
        let _ = crate::enums::Resource::export_all();
        let _ = crate::enums::NodeKind::export_all();
        let _ = crate::enums::StructureKind::export_all();
        let _ = crate::enums::PointerAction::export_all();
        let _ = crate::enums::RejectionReason::export_all();

        // Structs
        let _ = crate::structs::Position::export_all();
        let _ = crate::structs::Bounds::export_all();
        let _ = crate::structs::Inventory::export_all();

        // Protocol
        let _ = crate::protocol::KeyState::export_all();
        let _ = crate::protocol::ClientMessage::export_all();
        let _ = crate::protocol::PlayerView::export_all();
        let _ = crate::protocol::NodeView::export_all();
        let _ = crate::protocol::StructureView::export_all();
        let _ = crate::protocol::StateSnapshot::export_all();
        let _ = crate::protocol::ServerMessage::export_all();
    }
}

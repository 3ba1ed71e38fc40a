//! Error types for the `wildhold-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use wildhold_types::{PlayerId, RejectionReason, Resource};

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A player was not found in the registry.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// The player does not hold enough of a resource.
    #[error("insufficient resource: wanted {requested} of {resource:?} but only have {available}")]
    InsufficientResource {
        /// The resource being removed.
        resource: Resource,
        /// The quantity the caller attempted to remove.
        requested: u32,
        /// The quantity actually held.
        available: u32,
    },

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in world calculation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: &'static str,
    },
}

impl From<WorldError> for RejectionReason {
    fn from(err: WorldError) -> Self {
        match err {
            WorldError::PlayerNotFound(_) => Self::PlayerNotFound,
            WorldError::InsufficientResource { .. } => Self::InsufficientResources,
            WorldError::ArithmeticOverflow { .. } => Self::Overflow,
        }
    }
}

//! Shared application state for the HTTP and `WebSocket` handlers.
//!
//! Handlers never see the game itself. They hold a [`GameHandle`] and
//! talk to the game actor through it, so no request can block or race a
//! world mutation.

use wildhold_core::GameHandle;

/// State shared by every route.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Sending side of the game actor.
    pub game: GameHandle,
}

impl AppState {
    /// Wrap a handle to a running game actor.
    pub const fn new(game: GameHandle) -> Self {
        Self { game }
    }
}

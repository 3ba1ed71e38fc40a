//! Plain HTTP endpoints.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Plain-text banner |
//! | `GET` | `/api/status` | Tick and entity counts |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use wildhold_core::GameStatus;

use crate::error::ApiError;
use crate::state::AppState;

/// Banner served at `/`.
pub const BANNER: &str = "Wildhold world server\nConnect a client to /ws\n";

/// Serve the banner.
pub async fn index() -> &'static str {
    BANNER
}

/// Current tick and counts, answered by the game actor.
pub async fn status(State(state): State<Arc<AppState>>) -> Result<Json<GameStatus>, ApiError> {
    let status = state.game.status().await?;
    Ok(Json(status))
}

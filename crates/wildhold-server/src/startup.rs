//! Server startup helper for embedding in the engine binary.
//!
//! [`spawn_server`] binds eagerly, so a taken port fails startup instead of
//! surfacing later from a background task, then serves on its own task.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::server::{self, ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Bind `config` and serve on a background task until `shutdown` flips.
///
/// The returned handle resolves once the server has drained.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the address cannot be bound.
pub async fn spawn_server(
    config: &ServerConfig,
    state: Arc<AppState>,
    shutdown: watch::Receiver<bool>,
) -> Result<JoinHandle<Result<(), ServerError>>, StartupError> {
    let listener = server::bind(config).await?;
    let handle = tokio::spawn(server::serve(listener, state, shutdown));
    tracing::info!(host = %config.host, port = config.port, "Server spawned on background task");
    Ok(handle)
}

//! Server binary for Wildhold.
//!
//! Wires configuration, the game actor, and the `WebSocket` server
//! together and runs until Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `WILDHOLD_CONFIG` or `wildhold-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Seed the world and spawn the game actor
//! 4. Bind and spawn the HTTP/`WebSocket` server
//! 5. Wait for Ctrl-C, then stop the server and the actor

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wildhold_core::config::LoggingConfig;
use wildhold_core::{Game, GameConfig, spawn_game};
use wildhold_server::{AppState, ServerConfig, spawn_server};

use crate::error::EngineError;

/// Config file read when `WILDHOLD_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "wildhold-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, binding, or shutdown fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("wildhold-engine starting");
    info!(
        source = %source,
        width = config.world.width,
        height = config.world.height,
        node_count = config.world.node_count,
        seed = ?config.world.seed,
        snapshot_hz = config.timing.snapshot_hz,
        "Configuration loaded"
    );

    // 3. Seed the world and start the game actor.
    let (stop, shutdown) = watch::channel(false);
    let game = Game::new(&config);
    let (handle, game_task) = spawn_game(game, &config.timing, shutdown.clone());

    // 4. Start the server.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let state = Arc::new(AppState::new(handle));
    let server_task = spawn_server(&server_config, state, shutdown)
        .await
        .map_err(EngineError::from)?;

    // 5. Run until Ctrl-C.
    tokio::signal::ctrl_c().await.map_err(EngineError::from)?;
    info!("Shutdown requested");
    if stop.send(true).is_err() {
        info!("All tasks already stopped");
    }

    server_task
        .await
        .map_err(EngineError::from)?
        .map_err(EngineError::from)?;
    let game = game_task.await.map_err(EngineError::from)?;
    info!(
        tick = game.tick(),
        players = game.world().player_count(),
        "wildhold-engine stopped"
    );

    Ok(())
}

/// Load configuration from `WILDHOLD_CONFIG`, else `wildhold-config.yaml`
/// in the working directory, else defaults. `HOST` and `PORT` override
/// the file in every case.
fn load_config() -> Result<(GameConfig, String), EngineError> {
    let explicit = std::env::var_os("WILDHOLD_CONFIG").map(PathBuf::from);
    resolve_config(explicit, Path::new(DEFAULT_CONFIG_PATH))
}

/// An explicitly named file must exist. Only the implicit default path
/// falls back to built-in defaults when missing.
fn resolve_config(
    explicit: Option<PathBuf>,
    default_path: &Path,
) -> Result<(GameConfig, String), EngineError> {
    let path = match explicit {
        Some(path) => path,
        None if default_path.exists() => default_path.to_path_buf(),
        None => return Ok((GameConfig::from_env()?, String::from("defaults"))),
    };
    let config = GameConfig::from_file(&path)?;
    Ok((config, path.display().to_string()))
}

/// Install the global subscriber. `RUST_LOG` wins over the configured
/// level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use wildhold_core::ConfigError;

    use super::*;

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = PathBuf::from("/nonexistent/wildhold-missing.yaml");
        let result = resolve_config(Some(missing), Path::new(DEFAULT_CONFIG_PATH));
        assert!(matches!(
            result,
            Err(EngineError::Config {
                source: ConfigError::Io { .. }
            })
        ));
    }

    #[test]
    fn implicit_missing_file_uses_defaults() {
        let result = resolve_config(None, Path::new("/nonexistent/wildhold-config.yaml"));
        assert_eq!(result.ok().map(|(_, source)| source), Some("defaults".to_owned()));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("wildhold-config.yaml");
        let result = resolve_config(Some(path), Path::new(DEFAULT_CONFIG_PATH));
        assert_eq!(result.ok().map(|(config, _)| config.world.node_count), Some(40));
    }
}

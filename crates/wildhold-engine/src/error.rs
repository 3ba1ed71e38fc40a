//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and shutdown so
//! `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: wildhold_core::ConfigError,
    },

    /// The HTTP server failed to bind.
    #[error("server startup error: {source}")]
    Startup {
        /// The underlying startup error.
        #[from]
        source: wildhold_server::StartupError,
    },

    /// The HTTP server failed while running.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: wildhold_server::ServerError,
    },

    /// A background task panicked or was cancelled.
    #[error("task failed: {source}")]
    Join {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },

    /// Installing the Ctrl-C handler failed.
    #[error("signal error: {source}")]
    Signal {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

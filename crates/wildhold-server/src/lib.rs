//! HTTP and `WebSocket` front end for the Wildhold world server.
//!
//! This crate provides an Axum server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws`) carrying the JSON game protocol
//!   between clients and the game actor
//! - **Status endpoint** (`/api/status`) with tick and entity counts
//! - **Banner** (`GET /`)
//!
//! # Architecture
//!
//! Every handler holds a [`GameHandle`](wildhold_core::GameHandle) and
//! nothing else. World state lives only inside the game actor; the server
//! forwards parsed messages in and writes queued messages out.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::{StartupError, spawn_server};
pub use state::AppState;

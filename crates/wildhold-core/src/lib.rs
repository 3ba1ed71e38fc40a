//! Game state, intent resolution, sessions, and the game actor for the
//! Wildhold world server.
//!
//! This crate owns everything between the transport and the world
//! registry: it decides what each client message does, who hears about
//! it, and when snapshots and maintenance sweeps run.
//!
//! # Modules
//!
//! - [`actions`] -- Move, chat, rename, build, click, and tap-move
//!   resolution.
//! - [`clock`] -- Broadcast tick counter and wall-clock access.
//! - [`config`] -- Configuration loading from `wildhold-config.yaml` into
//!   strongly-typed structs.
//! - [`game`] -- [`Game`], the single owned aggregate of all mutable state.
//! - [`runner`] -- The game actor task and its [`GameHandle`].
//! - [`session`] -- Transport-to-player bindings and outbound channels.
//! - [`snapshot`] -- Full-world snapshot construction.

pub mod actions;
pub mod clock;
pub mod config;
pub mod game;
pub mod runner;
pub mod session;
pub mod snapshot;

pub use config::{ConfigError, GameConfig};
pub use game::{Game, GameStatus};
pub use runner::{Command, GameError, GameHandle, spawn_game};

//! The game actor.
//!
//! [`spawn_game`] moves a [`Game`] into its own Tokio task, which is then
//! the only code that ever touches it. Transports reach the game through a
//! cloneable [`GameHandle`] that enqueues [`Command`]s. The task drives two
//! timers of its own:
//!
//! - **Snapshot**: full-state broadcast at `snapshot_hz`
//! - **Maintenance**: node respawn and idle sweep every
//!   `maintenance_interval_ms`
//!
//! Commands, snapshot ticks, and maintenance ticks are multiplexed with
//! `tokio::select!`, so each runs to completion before the next begins.
//! The loop ends when the shutdown signal flips to `true` or every handle
//! has been dropped, and hands the final [`Game`] back through its join
//! handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};
use wildhold_types::{ClientMessage, ServerMessage, SessionId};

use crate::clock::now_ms;
use crate::config::TimingConfig;
use crate::game::{Game, GameStatus};

/// Errors returned to transports talking to the game actor.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The actor task has exited.
    #[error("game actor has stopped")]
    ActorGone,

    /// The actor dropped a reply channel without answering.
    #[error("game actor dropped the reply")]
    ReplyDropped,
}

/// A request for the game actor.
#[derive(Debug)]
pub enum Command {
    /// A transport opened.
    Connect {
        /// Id allocated by [`GameHandle::next_session`].
        session: SessionId,
        /// Where the actor queues outbound messages for this transport.
        outbox: mpsc::UnboundedSender<ServerMessage>,
    },
    /// A transport delivered a well-formed message.
    Message {
        /// Sending transport.
        session: SessionId,
        /// The parsed message.
        message: ClientMessage,
    },
    /// A transport closed.
    Disconnect {
        /// Closing transport.
        session: SessionId,
    },
    /// Report current counts.
    Status {
        /// Where to send the answer.
        reply: oneshot::Sender<GameStatus>,
    },
}

/// Cloneable sending side of the game actor.
#[derive(Debug, Clone)]
pub struct GameHandle {
    commands: mpsc::UnboundedSender<Command>,
    sessions: Arc<AtomicU64>,
}

impl GameHandle {
    /// Allocate a fresh session id. Ids start at 1 and are never reused.
    pub fn next_session(&self) -> SessionId {
        let prev = self.sessions.fetch_add(1, Ordering::Relaxed);
        SessionId::new(prev.saturating_add(1))
    }

    /// Register a transport's outbox.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ActorGone`] if the actor has exited.
    pub fn connect(
        &self,
        session: SessionId,
        outbox: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<(), GameError> {
        self.submit(Command::Connect { session, outbox })
    }

    /// Forward a client message.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ActorGone`] if the actor has exited.
    pub fn send(&self, session: SessionId, message: ClientMessage) -> Result<(), GameError> {
        self.submit(Command::Message { session, message })
    }

    /// Report a closed transport.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ActorGone`] if the actor has exited.
    pub fn disconnect(&self, session: SessionId) -> Result<(), GameError> {
        self.submit(Command::Disconnect { session })
    }

    /// Ask the actor for current counts.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ActorGone`] if the actor has exited, or
    /// [`GameError::ReplyDropped`] if it stopped before answering.
    pub async fn status(&self) -> Result<GameStatus, GameError> {
        let (reply, rx) = oneshot::channel();
        self.submit(Command::Status { reply })?;
        rx.await.map_err(|_closed| GameError::ReplyDropped)
    }

    fn submit(&self, command: Command) -> Result<(), GameError> {
        self.commands
            .send(command)
            .map_err(|_closed| GameError::ActorGone)
    }
}

/// Start the game actor.
///
/// Returns the handle transports use to reach it and the task's join
/// handle, which yields the final game state once the loop ends.
pub fn spawn_game(
    game: Game,
    timing: &TimingConfig,
    shutdown: watch::Receiver<bool>,
) -> (GameHandle, JoinHandle<Game>) {
    let (commands, rx) = mpsc::unbounded_channel();
    let handle = GameHandle {
        commands,
        sessions: Arc::new(AtomicU64::new(0)),
    };
    let snapshot_period = Duration::from_millis(timing.snapshot_period_ms());
    let maintenance_period = Duration::from_millis(timing.maintenance_interval_ms.max(1));
    let task = tokio::spawn(run_game(game, rx, snapshot_period, maintenance_period, shutdown));
    (handle, task)
}

async fn run_game(
    mut game: Game,
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshot_period: Duration,
    maintenance_period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> Game {
    let mut snapshot = time::interval(snapshot_period);
    snapshot.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut maintenance = time::interval(maintenance_period);
    maintenance.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(
        snapshot_ms = snapshot_period.as_millis(),
        maintenance_ms = maintenance_period.as_millis(),
        nodes = game.world().nodes().len(),
        "Game actor started"
    );

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    info!("All game handles dropped");
                    break;
                };
                dispatch(&mut game, command);
            }
            _ = snapshot.tick() => {
                game.broadcast_snapshot();
            }
            _ = maintenance.tick() => {
                game.maintenance(now_ms());
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!(tick = game.tick(), players = game.world().player_count(), "Game actor stopped");
    game
}

fn dispatch(game: &mut Game, command: Command) {
    match command {
        Command::Connect { session, outbox } => game.connect(session, outbox),
        Command::Message { session, message } => game.handle_message(session, message, now_ms()),
        Command::Disconnect { session } => game.disconnect(session),
        Command::Status { reply } => {
            if reply.send(game.status()).is_err() {
                warn!("Status requester went away before the reply");
            }
        }
    }
}

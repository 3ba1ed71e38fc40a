//! The game aggregate: registry, sessions, clock, and randomness.
//!
//! [`Game`] is the only mutable state in the server. It is owned by the
//! game actor (see [`crate::runner`]) and every method runs to completion
//! before the next one starts, so intents, snapshot broadcasts, and
//! maintenance sweeps never interleave.
//!
//! Invalid input is never an error at this level. Rejected intents are
//! logged at `debug` and dropped; dead transports are reaped as
//! disconnects.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};
use wildhold_types::{ClientMessage, PlayerId, RejectionReason, ServerMessage, SessionId};
use wildhold_world::{World, create_world, resource};

use crate::actions::{self, ActionOutcome, text};
use crate::clock::WorldClock;
use crate::config::{GameConfig, RulesConfig};
use crate::session::SessionManager;
use crate::snapshot::build_snapshot;

/// Entity and session counts, served by the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameStatus {
    /// Snapshots broadcast so far.
    pub tick: u64,
    /// Joined players.
    pub players: usize,
    /// Resource nodes, live or depleted.
    pub nodes: usize,
    /// Structures placed.
    pub buildings: usize,
    /// Connected transports, joined or not.
    pub sessions: usize,
}

/// What one maintenance sweep did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    /// Depleted nodes brought back.
    pub respawned: usize,
    /// Players removed for inactivity.
    pub evicted: usize,
}

/// Complete server-side game state.
#[derive(Debug)]
pub struct Game {
    world: World,
    sessions: SessionManager,
    clock: WorldClock,
    rules: RulesConfig,
    idle_timeout_ms: i64,
    rng: StdRng,
}

impl Game {
    /// Seed a fresh world from configuration.
    ///
    /// A configured seed makes the world reproducible; otherwise the
    /// generator is seeded from OS entropy.
    pub fn new(config: &GameConfig) -> Self {
        let mut rng = config
            .world
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let world = create_world(&mut rng, config.world.bounds(), config.world.node_count);
        Self::with_world(world, config.rules, config.timing.idle_timeout_ms(), rng)
    }

    /// Wrap an existing world.
    pub const fn with_world(
        world: World,
        rules: RulesConfig,
        idle_timeout_ms: i64,
        rng: StdRng,
    ) -> Self {
        Self {
            world,
            sessions: SessionManager::new(),
            clock: WorldClock::new(),
            rules,
            idle_timeout_ms,
            rng,
        }
    }

    /// Read access to the registry.
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Read access to the sessions.
    pub const fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Current broadcast tick.
    pub const fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Current counts.
    pub fn status(&self) -> GameStatus {
        GameStatus {
            tick: self.clock.tick(),
            players: self.world.player_count(),
            nodes: self.world.nodes().len(),
            buildings: self.world.structures().len(),
            sessions: self.sessions.session_count(),
        }
    }

    // -------------------------------------------------------------------
    // Sessions
    // -------------------------------------------------------------------

    /// Register a newly connected transport.
    pub fn connect(&mut self, session: SessionId, outbox: UnboundedSender<ServerMessage>) {
        debug!(session = %session, "Session connected");
        self.sessions.connect(session, outbox);
    }

    /// The transport closed. Removes the bound player, if any, and tells
    /// everyone else.
    pub fn disconnect(&mut self, session: SessionId) {
        self.reap(vec![session]);
    }

    /// Handle one message from a transport.
    pub fn handle_message(&mut self, session: SessionId, message: ClientMessage, now_ms: i64) {
        if !self.sessions.contains(session) {
            debug!(session = %session, "Message from unknown session dropped");
            return;
        }

        let Some(player) = self.sessions.player_of(session) else {
            if let ClientMessage::Join { name } = &message {
                if let Err(reason) = self.join(session, name, now_ms) {
                    debug!(session = %session, %reason, "Join rejected");
                }
            } else {
                debug!(session = %session, reason = %RejectionReason::NotJoined, "Intent dropped");
            }
            return;
        };

        if let Err(e) = self.world.touch(player, now_ms) {
            debug!(player = %player, error = %e, "Activity from missing player");
            return;
        }

        let result = actions::execute_action(
            &mut self.world,
            player,
            &message,
            &self.rules,
            now_ms,
            &mut self.rng,
        );
        match result {
            Ok(ActionOutcome::Chat { from_name, text }) => {
                let dead = self
                    .sessions
                    .broadcast(&ServerMessage::Chat { from_name, text });
                self.reap(dead);
            }
            Ok(ActionOutcome::Renamed { name }) => {
                info!(player = %player, name = %name, "Player renamed");
            }
            Ok(_) => {}
            Err(reason) => {
                debug!(player = %player, %reason, "Intent rejected");
            }
        }
    }

    fn join(
        &mut self,
        session: SessionId,
        raw_name: &str,
        now_ms: i64,
    ) -> Result<PlayerId, RejectionReason> {
        let name = text::join_name(raw_name);
        let position = self.world.random_position(&mut self.rng);
        let id = self.world.add_player(name.clone(), position, now_ms)?;
        if let Err(reason) = self.sessions.bind(session, id) {
            self.world.remove_player(id);
            return Err(reason);
        }
        info!(player = %id, session = %session, name = %name, "Player joined");

        let welcome = ServerMessage::Welcome {
            id,
            state: build_snapshot(&self.world, self.clock.tick()),
            tick: self.clock.tick(),
        };
        if !self.sessions.send(session, welcome) {
            self.reap(vec![session]);
        }
        Ok(id)
    }

    /// Remove a player and their session, then announce the departure.
    fn depart(&mut self, player: PlayerId) {
        self.sessions.remove_player(player);
        let dead = self.announce_departure(player);
        self.reap(dead);
    }

    fn announce_departure(&mut self, player: PlayerId) -> Vec<SessionId> {
        let Some(record) = self.world.remove_player(player) else {
            return Vec::new();
        };
        info!(player = %player, name = %record.name, "Player left");
        self.sessions.broadcast(&ServerMessage::PlayerLeft {
            id: player,
            name: record.name,
        })
    }

    /// Forget dead sessions. Each departure broadcast can surface more dead
    /// sessions, so this runs until none remain.
    fn reap(&mut self, mut dead: Vec<SessionId>) {
        while let Some(session) = dead.pop() {
            let Some(player) = self.sessions.remove(session) else {
                debug!(session = %session, "Unbound session closed");
                continue;
            };
            dead.extend(self.announce_departure(player));
        }
    }

    // -------------------------------------------------------------------
    // Timers
    // -------------------------------------------------------------------

    /// Advance the tick and send a full snapshot to every joined session.
    pub fn broadcast_snapshot(&mut self) -> u64 {
        if let Err(e) = self.clock.advance() {
            warn!(error = %e, "Tick counter saturated");
        }
        let tick = self.clock.tick();
        let state = ServerMessage::State(build_snapshot(&self.world, tick));
        let dead = self.sessions.broadcast(&state);
        self.reap(dead);
        tick
    }

    /// Respawn due nodes and evict idle players.
    pub fn maintenance(&mut self, now_ms: i64) -> MaintenanceReport {
        let bounds = self.world.bounds();
        let respawned = resource::respawn_due(self.world.nodes_mut(), now_ms, &mut self.rng, bounds);

        let cutoff = now_ms.saturating_sub(self.idle_timeout_ms);
        let idle = self.world.idle_players(cutoff);
        let evicted = idle.len();
        for player in idle {
            info!(player = %player, "Player timed out");
            self.depart(player);
        }

        if respawned > 0 || evicted > 0 {
            debug!(respawned, evicted, "Maintenance sweep");
        }
        MaintenanceReport { respawned, evicted }
    }
}

//! Session bookkeeping: which transport is bound to which player.
//!
//! Every transport registers an outbound channel under its [`SessionId`]
//! as soon as it connects. A session becomes *bound* after a successful
//! join and stays bound to the same player until it disconnects or the
//! player is swept for inactivity. Only bound sessions receive snapshots
//! and chat.

use std::collections::BTreeMap;

use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;
use wildhold_types::{PlayerId, RejectionReason, ServerMessage, SessionId};

/// One connected transport.
#[derive(Debug)]
pub struct Session {
    /// Messages queued here are written to the transport by its task.
    outbox: UnboundedSender<ServerMessage>,
    /// The player this session controls, once joined.
    player: Option<PlayerId>,
}

/// All connected transports, keyed by session id.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: BTreeMap<SessionId, Session>,
}

impl SessionManager {
    /// An empty manager.
    pub const fn new() -> Self {
        Self {
            sessions: BTreeMap::new(),
        }
    }

    /// Register a freshly connected transport. Replaces any stale entry
    /// with the same id.
    pub fn connect(&mut self, id: SessionId, outbox: UnboundedSender<ServerMessage>) {
        self.sessions.insert(
            id,
            Session {
                outbox,
                player: None,
            },
        );
    }

    /// Bind a session to a player.
    ///
    /// # Errors
    ///
    /// Returns [`RejectionReason::NotJoined`] if the session is unknown and
    /// [`RejectionReason::AlreadyJoined`] if it is already bound.
    pub fn bind(&mut self, id: SessionId, player: PlayerId) -> Result<(), RejectionReason> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(RejectionReason::NotJoined)?;
        if session.player.is_some() {
            return Err(RejectionReason::AlreadyJoined);
        }
        session.player = Some(player);
        Ok(())
    }

    /// Whether the session exists.
    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// The player bound to a session, if any.
    pub fn player_of(&self, id: SessionId) -> Option<PlayerId> {
        self.sessions.get(&id).and_then(|s| s.player)
    }

    /// The session controlling a player, if any.
    pub fn session_of(&self, player: PlayerId) -> Option<SessionId> {
        self.sessions
            .iter()
            .find(|(_, s)| s.player == Some(player))
            .map(|(id, _)| *id)
    }

    /// Forget a session, returning the player it was bound to.
    ///
    /// Dropping the entry drops the outbound sender, which ends the
    /// transport's write loop.
    pub fn remove(&mut self, id: SessionId) -> Option<PlayerId> {
        self.sessions.remove(&id).and_then(|s| s.player)
    }

    /// Forget whichever session controls `player`.
    pub fn remove_player(&mut self, player: PlayerId) -> Option<SessionId> {
        let id = self.session_of(player)?;
        self.sessions.remove(&id);
        Some(id)
    }

    /// Queue a message for one session.
    ///
    /// Returns `false` if the session is unknown or its transport has gone
    /// away.
    pub fn send(&self, id: SessionId, message: ServerMessage) -> bool {
        self.sessions
            .get(&id)
            .is_some_and(|s| s.outbox.send(message).is_ok())
    }

    /// Queue a message for every bound session.
    ///
    /// Returns the sessions whose transport has gone away; the caller reaps
    /// them as disconnects.
    pub fn broadcast(&self, message: &ServerMessage) -> Vec<SessionId> {
        let mut dead = Vec::new();
        for (id, session) in &self.sessions {
            if session.player.is_none() {
                continue;
            }
            if session.outbox.send(message.clone()).is_err() {
                warn!(session = %id, "Outbound channel closed, marking session dead");
                dead.push(*id);
            }
        }
        dead
    }

    /// Number of connected transports, bound or not.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Number of sessions bound to a player.
    pub fn bound_count(&self) -> usize {
        self.sessions.values().filter(|s| s.player.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    fn sid(raw: u64) -> SessionId {
        SessionId::new(raw)
    }

    fn pid(raw: u64) -> PlayerId {
        PlayerId::new(raw)
    }

    fn left(raw: u64) -> ServerMessage {
        ServerMessage::PlayerLeft {
            id: pid(raw),
            name: "x".to_owned(),
        }
    }

    #[test]
    fn second_bind_is_rejected() {
        let mut sessions = SessionManager::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        sessions.connect(sid(1), tx);

        assert_eq!(sessions.bind(sid(1), pid(10)), Ok(()));
        assert_eq!(
            sessions.bind(sid(1), pid(11)),
            Err(RejectionReason::AlreadyJoined)
        );
        assert_eq!(sessions.player_of(sid(1)), Some(pid(10)));
    }

    #[test]
    fn bind_unknown_session_is_rejected() {
        let mut sessions = SessionManager::new();
        assert_eq!(
            sessions.bind(sid(5), pid(1)),
            Err(RejectionReason::NotJoined)
        );
    }

    #[test]
    fn broadcast_reaches_only_bound_sessions() {
        let mut sessions = SessionManager::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        sessions.connect(sid(1), tx_a);
        sessions.connect(sid(2), tx_b);
        assert!(sessions.bind(sid(1), pid(1)).is_ok());

        let dead = sessions.broadcast(&left(9));
        assert!(dead.is_empty());
        assert_eq!(rx_a.try_recv().ok(), Some(left(9)));
        assert!(rx_b.try_recv().is_err());
    }

    #[test]
    fn broadcast_reports_dead_sessions() {
        let mut sessions = SessionManager::new();
        let (tx, rx) = mpsc::unbounded_channel();
        sessions.connect(sid(3), tx);
        assert!(sessions.bind(sid(3), pid(1)).is_ok());
        drop(rx);

        assert_eq!(sessions.broadcast(&left(1)), vec![sid(3)]);
        assert!(!sessions.send(sid(3), left(1)));
    }

    #[test]
    fn remove_returns_bound_player() {
        let mut sessions = SessionManager::new();
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, _rx_b) = mpsc::unbounded_channel();
        sessions.connect(sid(1), tx_a);
        sessions.connect(sid(2), tx_b);
        assert!(sessions.bind(sid(2), pid(7)).is_ok());

        assert_eq!(sessions.remove(sid(1)), None);
        assert_eq!(sessions.session_of(pid(7)), Some(sid(2)));
        assert_eq!(sessions.remove_player(pid(7)), Some(sid(2)));
        assert_eq!(sessions.session_count(), 0);
    }

    #[test]
    fn counts() {
        let mut sessions = SessionManager::new();
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, _rx_b) = mpsc::unbounded_channel();
        sessions.connect(sid(1), tx_a);
        sessions.connect(sid(2), tx_b);
        assert!(sessions.bind(sid(1), pid(1)).is_ok());
        assert_eq!(sessions.session_count(), 2);
        assert_eq!(sessions.bound_count(), 1);
        assert!(sessions.contains(sid(2)));
    }
}

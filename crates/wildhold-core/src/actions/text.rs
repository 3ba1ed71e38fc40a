//! Chat and display-name sanitizing.
//!
//! Player-supplied text is trimmed and length-limited on characters (not
//! bytes). Display names are stored as plain text. Chat lines and the
//! sender name attached to them are markup-escaped on the way out, after
//! truncation, so an escape sequence is never cut in half.

use wildhold_types::{PlayerId, RejectionReason};
use wildhold_world::World;

use super::{ActionOutcome, ActionResult};

/// Longest chat line kept, in characters.
pub const MAX_CHAT_CHARS: usize = 200;

/// Longest display name kept, in characters.
pub const MAX_NAME_CHARS: usize = 16;

/// Name given to a player who joins without one.
pub const DEFAULT_NAME: &str = "Player";

/// Replace `& < > " '` with their HTML entities.
pub fn escape_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Sanitize a chat line. `None` when nothing is left to say.
pub fn sanitize_chat(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cut: String = trimmed.chars().take(MAX_CHAT_CHARS).collect();
    Some(escape_markup(&cut))
}

/// Sanitize a display name. `None` when the name is empty after cleanup.
///
/// The result is plain text of at most [`MAX_NAME_CHARS`] characters.
pub fn sanitize_name(raw: &str) -> Option<String> {
    let visible: String = raw.chars().filter(|c| !c.is_control()).collect();
    let trimmed = visible.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_NAME_CHARS).collect())
}

/// The name a joining player gets.
pub fn join_name(raw: &str) -> String {
    sanitize_name(raw).unwrap_or_else(|| DEFAULT_NAME.to_owned())
}

/// Produce a chat line tagged with the sender's current name, both
/// escaped.
pub fn execute_chat(world: &World, actor: PlayerId, text: &str) -> ActionResult {
    let player = world.player(actor).ok_or(RejectionReason::PlayerNotFound)?;
    let text = sanitize_chat(text).ok_or(RejectionReason::EmptyText)?;
    Ok(ActionOutcome::Chat {
        from_name: escape_markup(&player.name),
        text,
    })
}

/// Change the actor's display name. Names need not be unique.
pub fn execute_rename(world: &mut World, actor: PlayerId, name: &str) -> ActionResult {
    let player = world
        .player_mut(actor)
        .ok_or(RejectionReason::PlayerNotFound)?;
    let name = sanitize_name(name).ok_or(RejectionReason::EmptyText)?;
    player.name.clone_from(&name);
    Ok(ActionOutcome::Renamed { name })
}

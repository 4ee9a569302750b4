//! The identity contract the router consults for character-gated events.

use crate::types::{Character, ClientId};

/// Resolves a connected client to its active in-game character.
///
/// Implemented by the session layer. The router calls
/// [`has_active_character`](IdentityProvider::has_active_character) first and
/// only then asks for the character itself.
pub trait IdentityProvider: Send + Sync {
    /// Whether `client` currently has a selected character.
    fn has_active_character(&self, client: ClientId) -> bool;

    /// The character `client` is currently playing, if any.
    fn active_character(&self, client: ClientId) -> Option<Character>;
}

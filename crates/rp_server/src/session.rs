//! Client sessions and their active characters.
//!
//! The session registry is the server's identity provider: the transport
//! opens a session per connection, the account subsystem selects a character
//! into it, and the event router reads it for character-gated events.

use dashmap::DashMap;
use rp_event_router::{Character, ClientId, IdentityProvider};
use std::net::SocketAddr;
use std::time::SystemTime;
use tracing::{debug, info};

/// State kept for one connected client.
#[derive(Debug, Clone)]
pub struct Session {
    /// The remote network address of the client
    pub remote_addr: SocketAddr,
    /// When the connection was established
    pub connected_at: SystemTime,
    /// The character the client is currently playing
    pub character: Option<Character>,
}

/// Concurrent map of open sessions keyed by client.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<ClientId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session for a newly connected client.
    ///
    /// The session starts without a character, so character-gated events
    /// from this client are dropped until one is activated. Opening an
    /// already open client replaces its session.
    ///
    /// # Arguments
    ///
    /// * `client` - The connection's client handle
    /// * `remote_addr` - Where the client connected from
    pub fn open(&self, client: ClientId, remote_addr: SocketAddr) {
        self.sessions.insert(
            client,
            Session {
                remote_addr,
                connected_at: SystemTime::now(),
                character: None,
            },
        );
        debug!("Opened session for client {} from {}", client, remote_addr);
    }

    /// Closes a session, dropping its character.
    ///
    /// # Returns
    ///
    /// The closed session, or `None` if the client had none open.
    pub fn close(&self, client: ClientId) -> Option<Session> {
        let removed = self.sessions.remove(&client).map(|(_, session)| session);
        if let Some(session) = &removed {
            debug!(
                "Closed session for client {} ({} character)",
                client,
                if session.character.is_some() { "with" } else { "without" }
            );
        }
        removed
    }

    /// Makes `character` the client's active character, replacing any
    /// previous one.
    ///
    /// # Arguments
    ///
    /// * `client` - The client that selected the character
    /// * `character` - The character it now plays
    ///
    /// # Returns
    ///
    /// `false` when the client has no open session.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rp_event_router::{Character, CharacterId, ClientId, IdentityProvider};
    /// use rp_server::SessionRegistry;
    ///
    /// let sessions = SessionRegistry::new();
    /// let client = ClientId::new();
    /// sessions.open(client, "127.0.0.1:4000".parse().unwrap());
    ///
    /// assert!(sessions.activate_character(client, Character::new(CharacterId::new(), "Niko Bellic")));
    /// assert!(sessions.has_active_character(client));
    /// ```
    pub fn activate_character(&self, client: ClientId, character: Character) -> bool {
        match self.sessions.get_mut(&client) {
            Some(mut session) => {
                info!("🎭 Client {} is now playing {}", client, character);
                session.character = Some(character);
                true
            }
            None => false,
        }
    }

    /// Clears the client's active character, returning it.
    pub fn deactivate_character(&self, client: ClientId) -> Option<Character> {
        self.sessions
            .get_mut(&client)
            .and_then(|mut session| session.character.take())
    }

    pub fn session(&self, client: ClientId) -> Option<Session> {
        self.sessions.get(&client).map(|session| session.clone())
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl IdentityProvider for SessionRegistry {
    fn has_active_character(&self, client: ClientId) -> bool {
        self.sessions
            .get(&client)
            .is_some_and(|session| session.character.is_some())
    }

    fn active_character(&self, client: ClientId) -> Option<Character> {
        self.sessions
            .get(&client)
            .and_then(|session| session.character.clone())
    }
}

//! # Roleplay Server
//!
//! The process around the event router: it accepts WebSocket clients, keeps
//! a session per connection, and routes every client event through the fixed
//! event table to the gameplay subsystems.
//!
//! ## Message Flow
//!
//! 1. A client sends a text frame `{"event": "...", "args": [...]}`
//! 2. The connection task parses it into a [`ClientEvent`]
//! 3. The [`EventRouter`](rp_event_router::EventRouter) resolves the caller,
//!    using the [`SessionRegistry`] for character-gated events
//! 4. The subsystem method registered in [`events`] runs
//!
//! ## Components
//!
//! * [`config`] / [`cli`] - TOML configuration with command-line overrides
//! * [`logging`] - `tracing` subscriber setup
//! * [`session`] - Sessions and active characters
//! * [`subsystems`] - Interfaces of the gameplay subsystems
//! * [`events`] - The client event table
//! * [`audit`] - A logging backend for every subsystem
//! * [`server`] - The WebSocket transport

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod messaging;
pub mod server;
pub mod session;
pub mod signals;
pub mod subsystems;

pub use audit::AuditSubsystems;
pub use cli::CliArgs;
pub use config::{AppConfig, ConfigOrigin, ServerConfig};
pub use error::ServerError;
pub use events::{build_router, finish_router, register_roleplay_events};
pub use messaging::ClientEvent;
pub use server::GameServer;
pub use signals::ShutdownSignal;
pub use session::{Session, SessionRegistry};
pub use subsystems::Subsystems;

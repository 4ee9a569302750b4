//! Error types for the roleplay server.

use rp_event_router::RouterError;
use thiserror::Error;

/// Errors that can stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),
    /// Socket binding or accept failures
    #[error("Network error: {0}")]
    Network(String),
    /// The event table could not be built
    #[error("Event table error: {0}")]
    Router(#[from] RouterError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for registration and invocation.

use thiserror::Error;

/// Errors raised while building the registration table.
///
/// These are startup-time configuration errors. A server must not accept
/// traffic after receiving one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// An event name was registered twice
    #[error("Duplicate registration for event '{name}'")]
    DuplicateRegistration { name: String },
}

/// Errors raised while invoking a bound handler.
///
/// An invocation error is confined to the dispatch that produced it; the
/// router reports it and keeps serving other events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    /// The resolved argument list does not match the handler's parameter count
    #[error("Arity mismatch: handler takes {expected} argument(s), received {received}")]
    ArityMismatch { expected: usize, received: usize },
    /// A resolved argument could not be converted to the parameter type
    #[error("Argument {position} should be {expected}, received {found}")]
    ArgumentType {
        position: usize,
        expected: &'static str,
        found: String,
    },
    /// The handler panicked
    #[error("Handler panicked: {0}")]
    Panicked(String),
}

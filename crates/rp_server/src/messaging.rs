//! Wire format of client events.
//!
//! Every text frame a client sends carries one event:
//!
//! ```json
//! { "event": "EVENT_TRY_USE_ITEM", "args": [17] }
//! ```
//!
//! `args` may be omitted when the event takes no arguments.

use crate::error::ServerError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named event sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientEvent {
    /// Event name, matched case-sensitively against the event table
    pub event: String,
    /// Arguments in the order the client sent them
    #[serde(default)]
    pub args: Vec<Value>,
}

impl ClientEvent {
    pub fn new(event: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            event: event.into(),
            args,
        }
    }

    /// Parses one text frame.
    pub fn parse(text: &str) -> Result<Self, ServerError> {
        serde_json::from_str(text).map_err(|e| ServerError::Network(format!("Invalid JSON: {e}")))
    }

    pub fn to_json(&self) -> Result<String, ServerError> {
        serde_json::to_string(self).map_err(|e| ServerError::Network(e.to_string()))
    }
}

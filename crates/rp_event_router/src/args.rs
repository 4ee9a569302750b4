//! Resolved handler arguments and their typed extraction.
//!
//! The router turns `(client, event arguments)` into a positional list of
//! [`EventArg`]s. Handlers declare typed parameters; each parameter type
//! implements [`FromEventArg`] and pulls its value out of one position.

use crate::types::{Character, CharacterId, ClientId};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// One element of a resolved argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum EventArg {
    /// The raw client handle of the caller
    Client(ClientId),
    /// The caller's active character
    Character(Character),
    /// An event name or a transport-supplied argument
    Value(Value),
}

impl EventArg {
    /// Short name of the variant, used in invocation error reports.
    pub fn kind(&self) -> &'static str {
        match self {
            EventArg::Client(_) => "client",
            EventArg::Character(_) => "character",
            EventArg::Value(Value::Null) => "null",
            EventArg::Value(Value::Bool(_)) => "bool",
            EventArg::Value(Value::Number(_)) => "number",
            EventArg::Value(Value::String(_)) => "string",
            EventArg::Value(Value::Array(_)) => "array",
            EventArg::Value(Value::Object(_)) => "object",
        }
    }
}

impl fmt::Display for EventArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventArg::Client(client) => write!(f, "client {client}"),
            EventArg::Character(character) => write!(f, "character {character}"),
            EventArg::Value(value) => write!(f, "{} {value}", self.kind()),
        }
    }
}

impl From<Value> for EventArg {
    fn from(value: Value) -> Self {
        EventArg::Value(value)
    }
}

impl From<ClientId> for EventArg {
    fn from(client: ClientId) -> Self {
        EventArg::Client(client)
    }
}

impl From<Character> for EventArg {
    fn from(character: Character) -> Self {
        EventArg::Character(character)
    }
}

/// Conversion from one resolved argument into a handler parameter.
///
/// On mismatch the argument is handed back so the caller can describe what
/// was actually received.
pub trait FromEventArg: Sized {
    /// Human-readable name of the accepted input, used in error reports.
    const EXPECTED: &'static str;

    fn from_event_arg(arg: EventArg) -> Result<Self, EventArg>;
}

impl FromEventArg for ClientId {
    const EXPECTED: &'static str = "client";

    fn from_event_arg(arg: EventArg) -> Result<Self, EventArg> {
        match arg {
            EventArg::Client(client) => Ok(client),
            other => Err(other),
        }
    }
}

impl FromEventArg for Character {
    const EXPECTED: &'static str = "character";

    fn from_event_arg(arg: EventArg) -> Result<Self, EventArg> {
        match arg {
            EventArg::Character(character) => Ok(character),
            other => Err(other),
        }
    }
}

impl FromEventArg for EventArg {
    const EXPECTED: &'static str = "any argument";

    fn from_event_arg(arg: EventArg) -> Result<Self, EventArg> {
        Ok(arg)
    }
}

/// Nullable parameter: JSON `null` maps to `None`.
impl<T: FromEventArg> FromEventArg for Option<T> {
    const EXPECTED: &'static str = "nullable value";

    fn from_event_arg(arg: EventArg) -> Result<Self, EventArg> {
        match arg {
            EventArg::Value(Value::Null) => Ok(None),
            other => T::from_event_arg(other).map(Some),
        }
    }
}

fn from_json_value<T: DeserializeOwned>(arg: EventArg) -> Result<T, EventArg> {
    match arg {
        EventArg::Value(value) => {
            serde_json::from_value(value.clone()).map_err(|_| EventArg::Value(value))
        }
        other => Err(other),
    }
}

macro_rules! impl_from_json_value {
    ($($ty:ty => $expected:literal),* $(,)?) => {
        $(
            impl FromEventArg for $ty {
                const EXPECTED: &'static str = $expected;

                fn from_event_arg(arg: EventArg) -> Result<Self, EventArg> {
                    from_json_value(arg)
                }
            }
        )*
    };
}

impl_from_json_value! {
    String => "string",
    bool => "bool",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    Value => "JSON value",
    CharacterId => "character id",
}

/// Parameter wrapper that deserializes a structured payload.
///
/// ```rust
/// use rp_event_router::{EventArg, FromEventArg, Json};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Paint { primary: u8, secondary: u8 }
///
/// let arg = EventArg::Value(serde_json::json!({ "primary": 3, "secondary": 9 }));
/// let Json(paint) = Json::<Paint>::from_event_arg(arg).ok().unwrap();
/// assert_eq!(paint.secondary, 9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Json<T>(pub T);

impl<T: DeserializeOwned> FromEventArg for Json<T> {
    const EXPECTED: &'static str = "JSON payload";

    fn from_event_arg(arg: EventArg) -> Result<Self, EventArg> {
        from_json_value(arg).map(Json)
    }
}

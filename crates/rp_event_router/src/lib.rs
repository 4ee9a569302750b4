//! # Roleplay Event Router
//!
//! Routes named events sent by game clients to the subsystem method registered
//! for them, without the transport or the subsystems knowing about each other.
//!
//! ## How an event flows
//!
//! 1. The transport hands the router `(client, event name, arguments)`.
//! 2. The router looks the name up in its registration table. Unknown names
//!    are dropped.
//! 3. Registrations flagged [`EventOption::UsesCharacter`] ask the
//!    [`IdentityProvider`] for the client's active character and drop the event
//!    when there is none.
//! 4. The argument list is built: the event name (with
//!    [`EventOption::IncludeEventName`]), then the character or the client,
//!    then the transport arguments in order.
//! 5. The bound method is invoked. Its return value is discarded; failures are
//!    logged and confined to that one dispatch.
//!
//! ## Registration
//!
//! Registration happens once at startup through [`RouterBuilder`]. Methods
//! are bound as ordinary typed Rust functions (see [`Handler`]); the table is
//! frozen by [`RouterBuilder::build`] and shared read-only afterwards.
//!
//! ```rust
//! use rp_event_router::{
//!     register_events, Character, ClientId, DispatchOutcome, EventRouter, IdentityProvider,
//! };
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! struct Shop;
//!
//! impl Shop {
//!     fn browse(&self, _client: ClientId) {}
//!     fn buy(&self, _character: Character, _item_id: i64) {}
//! }
//!
//! struct Lobby;
//!
//! impl IdentityProvider for Lobby {
//!     fn has_active_character(&self, _client: ClientId) -> bool { false }
//!     fn active_character(&self, _client: ClientId) -> Option<Character> { None }
//! }
//!
//! let shop = Arc::new(Shop);
//! let mut builder = EventRouter::builder();
//! register_events!(builder;
//!     "BROWSE" => shop, <Shop>::browse;
//!     "BUY_ITEM" => shop, <Shop>::buy [UsesCharacter];
//! )
//! .expect("event table has no duplicates");
//! let router = builder.build(Arc::new(Lobby)).unwrap();
//!
//! let client = ClientId::new();
//! assert_eq!(router.try_dispatch(client, "BROWSE", vec![]), DispatchOutcome::Delivered);
//! assert_eq!(
//!     router.try_dispatch(client, "BUY_ITEM", vec![json!(42)]),
//!     DispatchOutcome::MissingCharacter
//! );
//! ```

pub mod args;
pub mod error;
pub mod handler;
pub mod identity;
pub mod options;
pub mod router;
pub mod stats;
pub mod types;

mod macros;

pub use args::{EventArg, FromEventArg, Json};
pub use error::{InvocationError, RouterError};
pub use handler::Handler;
pub use identity::IdentityProvider;
pub use options::{EventOption, EventOptions};
pub use router::{DispatchOutcome, EventRegistration, EventRouter, RouterBuilder};
pub use stats::RouterStats;
pub use types::{Character, CharacterId, ClientId};

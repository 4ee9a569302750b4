//! The registration table and the dispatch pipeline.

use crate::args::EventArg;
use crate::error::{InvocationError, RouterError};
use crate::handler::{BoundHandler, EventHandler, Handler};
use crate::identity::IdentityProvider;
use crate::options::EventOptions;
use crate::stats::{RouterCounters, RouterStats};
use crate::types::{Character, ClientId};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info, trace};

/// The static binding of one event name to a subsystem method.
pub struct EventRegistration {
    name: String,
    target_type: &'static str,
    method_name: String,
    options: EventOptions,
    handler: Box<dyn EventHandler>,
}

impl EventRegistration {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type name of the subsystem instance the handler is bound to.
    pub fn target_type(&self) -> &'static str {
        self.target_type
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn options(&self) -> EventOptions {
        self.options
    }

    /// Number of positional arguments the bound method takes.
    pub fn arity(&self) -> usize {
        self.handler.arity()
    }

    /// Builds the handler's argument list.
    ///
    /// Order: the event name (with `IncludeEventName`), then the character
    /// or the client, then the transport arguments as received.
    fn resolve_arguments(
        &self,
        client: ClientId,
        character: Option<Character>,
        arguments: Vec<Value>,
    ) -> Vec<EventArg> {
        let mut resolved = Vec::with_capacity(arguments.len() + 2);
        if self.options.includes_event_name() {
            resolved.push(EventArg::Value(Value::String(self.name.clone())));
        }
        match character {
            Some(character) => resolved.push(EventArg::Character(character)),
            None => resolved.push(EventArg::Client(client)),
        }
        resolved.extend(arguments.into_iter().map(EventArg::Value));
        resolved
    }
}

impl fmt::Debug for EventRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistration")
            .field("name", &self.name)
            .field("target_type", &self.target_type)
            .field("method_name", &self.method_name)
            .field("options", &self.options)
            .field("arity", &self.arity())
            .finish()
    }
}

/// Collects registrations during startup.
///
/// The builder is the "not ready" half of the router's lifecycle: nothing can
/// be dispatched until [`build`](RouterBuilder::build) hands back an
/// [`EventRouter`], and no registration can be added afterwards.
///
/// A duplicate name is rejected when registered and also poisons the builder,
/// so `build` refuses to produce a router even if the first error was ignored.
#[derive(Default)]
pub struct RouterBuilder {
    table: HashMap<String, EventRegistration>,
    rejected: Vec<String>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler`, a method of `target`, under the event `name`.
    ///
    /// `method_name` is recorded for diagnostics; the binding itself is the
    /// typed `handler`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::DuplicateRegistration`] when `name` is already taken.
    pub fn register<T, H, Args>(
        &mut self,
        name: impl Into<String>,
        target: &Arc<T>,
        method_name: impl Into<String>,
        handler: H,
        options: EventOptions,
    ) -> Result<&mut Self, RouterError>
    where
        T: ?Sized + Send + Sync + 'static,
        H: Handler<T, Args>,
        Args: 'static,
    {
        let name = name.into();
        if self.table.contains_key(&name) {
            error!("❌ Duplicate registration for event '{}'", name);
            self.rejected.push(name.clone());
            return Err(RouterError::DuplicateRegistration { name });
        }

        let registration = EventRegistration {
            name: name.clone(),
            target_type: std::any::type_name::<T>(),
            method_name: method_name.into(),
            options,
            handler: Box::new(BoundHandler::new(target.clone(), handler)),
        };
        debug!(
            "📝 Registered '{}' -> {}::{} [{}]",
            name, registration.target_type, registration.method_name, options
        );
        self.table.insert(name, registration);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Freezes the table and injects the identity provider.
    ///
    /// # Errors
    ///
    /// Fails with the first duplicate seen by [`register`](RouterBuilder::register).
    pub fn build(self, identity: Arc<dyn IdentityProvider>) -> Result<EventRouter, RouterError> {
        if let Some(name) = self.rejected.into_iter().next() {
            return Err(RouterError::DuplicateRegistration { name });
        }

        info!("✅ Event router ready with {} registration(s)", self.table.len());
        Ok(EventRouter {
            table: self.table,
            identity,
            counters: RouterCounters::default(),
        })
    }
}

/// What happened to a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler ran
    Delivered,
    /// No registration matched the event name
    UnknownEvent,
    /// The event requires a character and the client has none
    MissingCharacter,
    /// The handler could not be invoked
    Failed(InvocationError),
}

/// Routes client events to the subsystem methods registered for them.
///
/// The table is immutable, so a router shared as `Arc<EventRouter>` can be
/// dispatched into from any number of connection tasks without locking.
/// Each dispatch runs to completion in the caller's context.
pub struct EventRouter {
    table: HashMap<String, EventRegistration>,
    identity: Arc<dyn IdentityProvider>,
    counters: RouterCounters,
}

impl fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRouter")
            .field("registrations", &self.table.len())
            .field("stats", &self.stats())
            .finish()
    }
}

impl EventRouter {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Routes one client event. Fire-and-forget.
    ///
    /// Unknown events and character-gated events from clients without a
    /// character are dropped silently. Invocation failures are logged at
    /// `error` level and never reach the caller.
    pub fn dispatch(&self, client: ClientId, event_name: &str, arguments: Vec<Value>) {
        if let DispatchOutcome::Failed(e) = self.try_dispatch(client, event_name, arguments) {
            let (target_type, method_name) = self
                .table
                .get(event_name)
                .map(|registration| (registration.target_type, registration.method_name.as_str()))
                .unwrap_or(("?", "?"));
            error!(
                event = event_name,
                subsystem = target_type,
                method = method_name,
                client = %client,
                "❌ Failed to invoke handler: {}",
                e
            );
        }
    }

    /// Routes one client event and reports what happened.
    pub fn try_dispatch(
        &self,
        client: ClientId,
        event_name: &str,
        arguments: Vec<Value>,
    ) -> DispatchOutcome {
        let Some(registration) = self.table.get(event_name) else {
            debug!("Dropping unknown event '{}' from client {}", event_name, client);
            RouterCounters::bump(&self.counters.unknown);
            return DispatchOutcome::UnknownEvent;
        };

        let character = if registration.options.uses_character() {
            match self.resolve_character(client) {
                Some(character) => Some(character),
                None => {
                    debug!(
                        "Dropping '{}' from client {}: no active character",
                        event_name, client
                    );
                    RouterCounters::bump(&self.counters.unauthorized);
                    return DispatchOutcome::MissingCharacter;
                }
            }
        } else {
            None
        };

        let args = registration.resolve_arguments(client, character, arguments);
        let result = catch_unwind(AssertUnwindSafe(|| registration.handler.invoke(args)))
            .unwrap_or_else(|panic| Err(InvocationError::Panicked(panic_message(panic.as_ref()))));

        match result {
            Ok(()) => {
                trace!(
                    "Delivered '{}' to {}::{}",
                    event_name,
                    registration.target_type,
                    registration.method_name
                );
                RouterCounters::bump(&self.counters.delivered);
                DispatchOutcome::Delivered
            }
            Err(e) => {
                RouterCounters::bump(&self.counters.failed);
                DispatchOutcome::Failed(e)
            }
        }
    }

    fn resolve_character(&self, client: ClientId) -> Option<Character> {
        if !self.identity.has_active_character(client) {
            return None;
        }
        // The session may close between the two calls.
        self.identity.active_character(client)
    }

    pub fn contains(&self, event_name: &str) -> bool {
        self.table.contains_key(event_name)
    }

    pub fn registration(&self, event_name: &str) -> Option<&EventRegistration> {
        self.table.get(event_name)
    }

    /// All registrations, sorted by event name.
    pub fn registrations(&self) -> Vec<&EventRegistration> {
        let mut registrations: Vec<_> = self.table.values().collect();
        registrations.sort_by(|a, b| a.name.cmp(&b.name));
        registrations
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn stats(&self) -> RouterStats {
        self.counters.snapshot()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

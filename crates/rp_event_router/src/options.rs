//! Per-registration option flags.

use bitflags::bitflags;
use std::fmt;

/// A behavior switch attached to a registration, by name.
///
/// Used where options are spelled out, such as the rows of
/// [`register_events!`](crate::register_events). Each one maps to a single
/// [`EventOptions`] flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventOption {
    /// The handler receives the caller's active character in place of the
    /// client handle. Dispatch is dropped when the client has none.
    UsesCharacter,
    /// The event's own name is prepended to the handler's arguments.
    IncludeEventName,
}

impl EventOption {
    /// Every option, in the order the resolver consults them.
    pub const ALL: [EventOption; 2] = [EventOption::UsesCharacter, EventOption::IncludeEventName];

    /// The flag this option sets.
    pub const fn flag(self) -> EventOptions {
        match self {
            EventOption::UsesCharacter => EventOptions::USES_CHARACTER,
            EventOption::IncludeEventName => EventOptions::INCLUDE_EVENT_NAME,
        }
    }
}

impl fmt::Display for EventOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventOption::UsesCharacter => f.write_str("uses_character"),
            EventOption::IncludeEventName => f.write_str("include_event_name"),
        }
    }
}

bitflags! {
    /// Option flags of one registration.
    ///
    /// ```rust
    /// use rp_event_router::{EventOption, EventOptions};
    ///
    /// let options = EventOptions::from(EventOption::UsesCharacter);
    /// assert!(options.uses_character());
    /// assert!(!options.includes_event_name());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventOptions: u8 {
        /// No options: the handler receives the client followed by the event arguments
        const NONE = 0b00;
        /// See [`EventOption::UsesCharacter`]
        const USES_CHARACTER = 0b01;
        /// See [`EventOption::IncludeEventName`]
        const INCLUDE_EVENT_NAME = 0b10;
    }
}

impl Default for EventOptions {
    fn default() -> Self {
        EventOptions::NONE
    }
}

impl EventOptions {
    pub const fn uses_character(self) -> bool {
        self.contains(EventOptions::USES_CHARACTER)
    }

    pub const fn includes_event_name(self) -> bool {
        self.contains(EventOptions::INCLUDE_EVENT_NAME)
    }
}

impl From<EventOption> for EventOptions {
    fn from(option: EventOption) -> Self {
        option.flag()
    }
}

impl fmt::Display for EventOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let names: Vec<String> = EventOption::ALL
            .iter()
            .filter(|option| self.contains(option.flag()))
            .map(|option| option.to_string())
            .collect();
        f.write_str(&names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_has_no_options() {
        let options = EventOptions::default();
        assert!(options.is_empty());
        assert_eq!(options, EventOptions::NONE);
        assert!(!options.uses_character());
        assert!(!options.includes_event_name());
        assert_eq!(options.to_string(), "-");
    }

    #[test]
    fn test_named_options_map_to_their_flags() {
        assert_eq!(EventOptions::from(EventOption::UsesCharacter), EventOptions::USES_CHARACTER);
        assert_eq!(
            EventOptions::from(EventOption::IncludeEventName),
            EventOptions::INCLUDE_EVENT_NAME
        );
    }

    #[test]
    fn test_order_of_combination_is_irrelevant() {
        let a = EventOption::IncludeEventName.flag() | EventOption::UsesCharacter.flag();
        let b = EventOptions::USES_CHARACTER | EventOptions::INCLUDE_EVENT_NAME;
        assert_eq!(a, b);
        assert_eq!(a.bits(), 0b11);
        assert_eq!(a.to_string(), "uses_character,include_event_name");
    }

    #[test]
    fn test_repeated_option_is_idempotent() {
        let options = EventOptions::USES_CHARACTER | EventOption::UsesCharacter.flag();
        assert_eq!(options, EventOptions::USES_CHARACTER);
        assert_eq!(options.to_string(), "uses_character");
    }
}

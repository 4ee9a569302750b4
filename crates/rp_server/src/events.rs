//! The client event table.
//!
//! This is the server's entire routing configuration: every event a client
//! may send, the subsystem method that handles it, and whether it requires
//! an active character. New client events are added here.

use crate::error::ServerError;
use crate::subsystems::{
    HouseService, ItemService, JobService, LawEnforcementService, PlayerService, Subsystems,
    VehicleService,
};
use rp_event_router::{register_events, EventRouter, IdentityProvider, RouterBuilder, RouterError};
use std::sync::Arc;
use tracing::info;

/// Registers every client event on `builder`.
///
/// # Arguments
///
/// * `builder` - The builder collecting the startup registrations
/// * `subsystems` - The subsystem instances the events are bound to
///
/// # Errors
///
/// Returns [`RouterError::DuplicateRegistration`] if `builder` already holds
/// one of the client event names.
pub fn register_roleplay_events(
    builder: &mut RouterBuilder,
    subsystems: &Subsystems,
) -> Result<(), RouterError> {
    register_events!(*builder;
        "EVENT_REQUEST_ENTER_HOUSE" => subsystems.houses, <dyn HouseService>::request_enter_house;
        "EVENT_REQUEST_EXIT_HOUSE" => subsystems.houses, <dyn HouseService>::request_exit_house;
        "EVENT_REQUEST_CREATE_ACCOUNT" => subsystems.players, <dyn PlayerService>::request_create_account;
        "EVENT_REQUEST_SELECT_CHARACTER" => subsystems.players, <dyn PlayerService>::request_select_character;
        "EVENT_REQUEST_CREATE_CHARACTER_MENU" => subsystems.players, <dyn PlayerService>::request_create_character_menu;
        "EVENT_REQUEST_CREATE_CHARACTER" => subsystems.players, <dyn PlayerService>::request_create_character;
        "EVENT_REQUEST_OWNED_HOUSES" => subsystems.houses, <dyn HouseService>::send_owned_houses;
        "EVENT_SET_PLAYER_USING_PHONE" => subsystems.players, <dyn PlayerService>::set_using_phone;
        "EVENT_SET_PLAYER_NOT_USING_PHONE" => subsystems.players, <dyn PlayerService>::set_phone_out;
        "EVENT_SEND_TEXT_MESSAGE" => subsystems.players, <dyn PlayerService>::send_text_message;
        "EVENT_ADD_PHONE_CONTACT" => subsystems.players, <dyn PlayerService>::add_contact;
        "EVENT_REMOVE_PHONE_CONTACT" => subsystems.players, <dyn PlayerService>::delete_contact;
        "EVENT_REMOVE_TEXT_MESSAGE" => subsystems.players, <dyn PlayerService>::delete_text_message;
        "EVENT_START_PHONE_CALL" => subsystems.players, <dyn PlayerService>::start_phone_call;
        "EVENT_ACCEPT_PHONE_CALL" => subsystems.players, <dyn PlayerService>::accept_phone_call;
        "EVENT_END_PHONE_CALL" => subsystems.players, <dyn PlayerService>::hangup_phone_call;
        "EVENT_EXIT_VEHICLE_SHOP" => subsystems.vehicles, <dyn VehicleService>::exit_vehicle_shop;
        "EVENT_BUY_VEHICLE" => subsystems.vehicles, <dyn VehicleService>::purchase_vehicle;
        "EVENT_TRY_SPAWN_VEHICLE" => subsystems.vehicles, <dyn VehicleService>::spawn_vehicle;
        "EVENT_TRY_PARK_VEHICLE" => subsystems.vehicles, <dyn VehicleService>::park_vehicle;
        "EVENT_TRY_LOCK_VEHICLE" => subsystems.vehicles, <dyn VehicleService>::lock_vehicle;
        "EVENT_TRY_BUY_PARKING_SPOT" => subsystems.vehicles, <dyn VehicleService>::purchase_parking_spot;
        "EVENT_TRY_SET_SPAWN_LOCATION" => subsystems.players, <dyn PlayerService>::set_spawn_house;
        "EVENT_ACCEPT_JOB" => subsystems.jobs, <dyn JobService>::take_job [UsesCharacter];
        "EVENT_TRY_BUY_PROPERTY" => subsystems.houses, <dyn HouseService>::buy_market_house [UsesCharacter];
        "EVENT_TRY_USE_ITEM" => subsystems.items, <dyn ItemService>::use_item [UsesCharacter];

        // Factions
        "EVENT_ARREST_CHARACTER" => subsystems.law_enforcement, <dyn LawEnforcementService>::arrest_character [UsesCharacter];
    )
}

/// Builds the ready-to-serve router for `subsystems`.
///
/// # Arguments
///
/// * `subsystems` - The subsystem instances the events are bound to
/// * `identity` - Resolves active characters for character-gated events
///
/// # Returns
///
/// The frozen router, or [`ServerError::Router`] if the table could not be
/// built. The server must not start without a router.
///
/// # Examples
///
/// ```rust
/// use rp_server::{build_router, AuditSubsystems, SessionRegistry, Subsystems};
/// use std::sync::Arc;
///
/// let sessions = Arc::new(SessionRegistry::new());
/// let subsystems = Subsystems::from_backend(Arc::new(AuditSubsystems::new(sessions.clone())));
/// let router = build_router(&subsystems, sessions).unwrap();
/// assert!(router.contains("EVENT_TRY_USE_ITEM"));
/// ```
pub fn build_router(
    subsystems: &Subsystems,
    identity: Arc<dyn IdentityProvider>,
) -> Result<EventRouter, ServerError> {
    let mut builder = EventRouter::builder();
    register_roleplay_events(&mut builder, subsystems)?;
    finish_router(builder, identity)
}

/// Freezes `builder` and logs every registration of the resulting table.
///
/// # Errors
///
/// Returns [`ServerError::Router`] when any registration on `builder` was
/// rejected.
pub fn finish_router(
    builder: RouterBuilder,
    identity: Arc<dyn IdentityProvider>,
) -> Result<EventRouter, ServerError> {
    let router = builder.build(identity)?;

    for registration in router.registrations() {
        info!(
            "📝 {} -> {}::{} [{}]",
            registration.name(),
            registration.target_type(),
            registration.method_name(),
            registration.options()
        );
    }
    Ok(router)
}

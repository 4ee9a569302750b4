//! Interfaces of the gameplay subsystems that receive client events.
//!
//! Each method takes the caller (the raw client, or the active character for
//! character-gated events) followed by the arguments the client sent, in the
//! order the client sent them. Gameplay rules live in the implementations.

use rp_event_router::{Character, CharacterId, ClientId};
use std::sync::Arc;

/// Houses, property market and interiors.
pub trait HouseService: Send + Sync {
    fn request_enter_house(&self, client: ClientId, house_id: i64);

    fn request_exit_house(&self, client: ClientId);

    /// Sends the client the list of houses its character owns.
    fn send_owned_houses(&self, client: ClientId);

    fn buy_market_house(&self, character: Character, house_id: i64);
}

/// Accounts, character selection and the phone.
pub trait PlayerService: Send + Sync {
    fn request_create_account(&self, client: ClientId, username: String, password: String);

    /// Selects one of the account's characters as the active character.
    fn request_select_character(&self, client: ClientId, character_name: String);

    fn request_create_character_menu(&self, client: ClientId);

    fn request_create_character(
        &self,
        client: ClientId,
        first_name: String,
        last_name: String,
        model: String,
    );

    fn set_using_phone(&self, client: ClientId);

    fn set_phone_out(&self, client: ClientId);

    fn send_text_message(&self, client: ClientId, number: String, message: String);

    fn add_contact(&self, client: ClientId, name: String, number: String);

    fn delete_contact(&self, client: ClientId, number: String);

    fn delete_text_message(&self, client: ClientId, message_id: i64);

    fn start_phone_call(&self, client: ClientId, number: String);

    fn accept_phone_call(&self, client: ClientId);

    fn hangup_phone_call(&self, client: ClientId);

    fn set_spawn_house(&self, client: ClientId, house_id: i64);
}

/// Vehicle shop, ownership and parking.
pub trait VehicleService: Send + Sync {
    fn exit_vehicle_shop(&self, client: ClientId);

    fn purchase_vehicle(
        &self,
        client: ClientId,
        model: String,
        primary_color: i32,
        secondary_color: i32,
    );

    fn spawn_vehicle(&self, client: ClientId, vehicle_id: i64);

    fn park_vehicle(&self, client: ClientId, vehicle_id: i64);

    fn lock_vehicle(&self, client: ClientId, vehicle_id: i64);

    fn purchase_parking_spot(&self, client: ClientId, spot_id: i64);
}

pub trait JobService: Send + Sync {
    fn take_job(&self, character: Character, job_id: i64);
}

pub trait ItemService: Send + Sync {
    fn use_item(&self, character: Character, item_id: i64);
}

/// The law enforcement faction.
pub trait LawEnforcementService: Send + Sync {
    fn arrest_character(&self, officer: Character, suspect: CharacterId);
}

/// Shared handles to every subsystem the event table routes to.
#[derive(Clone)]
pub struct Subsystems {
    pub houses: Arc<dyn HouseService>,
    pub players: Arc<dyn PlayerService>,
    pub vehicles: Arc<dyn VehicleService>,
    pub jobs: Arc<dyn JobService>,
    pub items: Arc<dyn ItemService>,
    pub law_enforcement: Arc<dyn LawEnforcementService>,
}

impl Subsystems {
    /// Uses one backend for every subsystem.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: HouseService
            + PlayerService
            + VehicleService
            + JobService
            + ItemService
            + LawEnforcementService
            + 'static,
    {
        Self {
            houses: backend.clone(),
            players: backend.clone(),
            vehicles: backend.clone(),
            jobs: backend.clone(),
            items: backend.clone(),
            law_enforcement: backend,
        }
    }
}

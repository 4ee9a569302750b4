//! Audit backend for the gameplay subsystems.
//!
//! Writes one structured log record per routed call and performs no gameplay.
//! The binary runs with it until gameplay crates supply real subsystem
//! implementations; it is also handy for watching client traffic.
//!
//! Character selection is the one call it acts on: selecting a character
//! activates it in the session registry so character-gated events can be
//! exercised end to end.

use crate::session::SessionRegistry;
use crate::subsystems::{
    HouseService, ItemService, JobService, LawEnforcementService, PlayerService, VehicleService,
};
use rp_event_router::{Character, CharacterId, ClientId};
use std::sync::Arc;
use tracing::{info, warn};

pub struct AuditSubsystems {
    sessions: Arc<SessionRegistry>,
}

impl AuditSubsystems {
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self { sessions }
    }
}

impl HouseService for AuditSubsystems {
    fn request_enter_house(&self, client: ClientId, house_id: i64) {
        info!(subsystem = "houses", %client, house_id, "request_enter_house");
    }

    fn request_exit_house(&self, client: ClientId) {
        info!(subsystem = "houses", %client, "request_exit_house");
    }

    fn send_owned_houses(&self, client: ClientId) {
        info!(subsystem = "houses", %client, "send_owned_houses");
    }

    fn buy_market_house(&self, character: Character, house_id: i64) {
        info!(subsystem = "houses", %character, house_id, "buy_market_house");
    }
}

impl PlayerService for AuditSubsystems {
    fn request_create_account(&self, client: ClientId, username: String, _password: String) {
        info!(subsystem = "players", %client, %username, "request_create_account");
    }

    fn request_select_character(&self, client: ClientId, character_name: String) {
        let character = Character::new(CharacterId::new(), character_name);
        if !self.sessions.activate_character(client, character) {
            warn!("Client {} selected a character without an open session", client);
        }
    }

    fn request_create_character_menu(&self, client: ClientId) {
        info!(subsystem = "players", %client, "request_create_character_menu");
    }

    fn request_create_character(
        &self,
        client: ClientId,
        first_name: String,
        last_name: String,
        model: String,
    ) {
        info!(
            subsystem = "players",
            %client,
            %first_name,
            %last_name,
            %model,
            "request_create_character"
        );
    }

    fn set_using_phone(&self, client: ClientId) {
        info!(subsystem = "phone", %client, "set_using_phone");
    }

    fn set_phone_out(&self, client: ClientId) {
        info!(subsystem = "phone", %client, "set_phone_out");
    }

    fn send_text_message(&self, client: ClientId, number: String, message: String) {
        info!(subsystem = "phone", %client, %number, length = message.len(), "send_text_message");
    }

    fn add_contact(&self, client: ClientId, name: String, number: String) {
        info!(subsystem = "phone", %client, %name, %number, "add_contact");
    }

    fn delete_contact(&self, client: ClientId, number: String) {
        info!(subsystem = "phone", %client, %number, "delete_contact");
    }

    fn delete_text_message(&self, client: ClientId, message_id: i64) {
        info!(subsystem = "phone", %client, message_id, "delete_text_message");
    }

    fn start_phone_call(&self, client: ClientId, number: String) {
        info!(subsystem = "phone", %client, %number, "start_phone_call");
    }

    fn accept_phone_call(&self, client: ClientId) {
        info!(subsystem = "phone", %client, "accept_phone_call");
    }

    fn hangup_phone_call(&self, client: ClientId) {
        info!(subsystem = "phone", %client, "hangup_phone_call");
    }

    fn set_spawn_house(&self, client: ClientId, house_id: i64) {
        info!(subsystem = "players", %client, house_id, "set_spawn_house");
    }
}

impl VehicleService for AuditSubsystems {
    fn exit_vehicle_shop(&self, client: ClientId) {
        info!(subsystem = "vehicles", %client, "exit_vehicle_shop");
    }

    fn purchase_vehicle(
        &self,
        client: ClientId,
        model: String,
        primary_color: i32,
        secondary_color: i32,
    ) {
        info!(
            subsystem = "vehicles",
            %client,
            %model,
            primary_color,
            secondary_color,
            "purchase_vehicle"
        );
    }

    fn spawn_vehicle(&self, client: ClientId, vehicle_id: i64) {
        info!(subsystem = "vehicles", %client, vehicle_id, "spawn_vehicle");
    }

    fn park_vehicle(&self, client: ClientId, vehicle_id: i64) {
        info!(subsystem = "vehicles", %client, vehicle_id, "park_vehicle");
    }

    fn lock_vehicle(&self, client: ClientId, vehicle_id: i64) {
        info!(subsystem = "vehicles", %client, vehicle_id, "lock_vehicle");
    }

    fn purchase_parking_spot(&self, client: ClientId, spot_id: i64) {
        info!(subsystem = "vehicles", %client, spot_id, "purchase_parking_spot");
    }
}

impl JobService for AuditSubsystems {
    fn take_job(&self, character: Character, job_id: i64) {
        info!(subsystem = "jobs", %character, job_id, "take_job");
    }
}

impl ItemService for AuditSubsystems {
    fn use_item(&self, character: Character, item_id: i64) {
        info!(subsystem = "items", %character, item_id, "use_item");
    }
}

impl LawEnforcementService for AuditSubsystems {
    fn arrest_character(&self, officer: Character, suspect: CharacterId) {
        info!(subsystem = "law_enforcement", %officer, %suspect, "arrest_character");
    }
}

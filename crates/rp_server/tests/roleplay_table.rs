//! The full client event table routed over a recording backend.

use rp_event_router::{Character, CharacterId, ClientId, DispatchOutcome, EventOptions, EventRouter};
use rp_server::subsystems::{
    HouseService, ItemService, JobService, LawEnforcementService, PlayerService, VehicleService,
};
use rp_server::{build_router, SessionRegistry, Subsystems};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// Records `method(args..)` for every subsystem call.
#[derive(Default)]
struct RecordingBackend {
    calls: Mutex<Vec<String>>,
}

impl RecordingBackend {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }
}

impl HouseService for RecordingBackend {
    fn request_enter_house(&self, _client: ClientId, house_id: i64) {
        self.record(format!("request_enter_house({house_id})"));
    }

    fn request_exit_house(&self, _client: ClientId) {
        self.record("request_exit_house()".to_string());
    }

    fn send_owned_houses(&self, _client: ClientId) {
        self.record("send_owned_houses()".to_string());
    }

    fn buy_market_house(&self, character: Character, house_id: i64) {
        self.record(format!("buy_market_house({}, {house_id})", character.name));
    }
}

impl PlayerService for RecordingBackend {
    fn request_create_account(&self, _client: ClientId, username: String, password: String) {
        self.record(format!("request_create_account({username}, {password})"));
    }

    fn request_select_character(&self, _client: ClientId, character_name: String) {
        self.record(format!("request_select_character({character_name})"));
    }

    fn request_create_character_menu(&self, _client: ClientId) {
        self.record("request_create_character_menu()".to_string());
    }

    fn request_create_character(
        &self,
        _client: ClientId,
        first_name: String,
        last_name: String,
        model: String,
    ) {
        self.record(format!("request_create_character({first_name}, {last_name}, {model})"));
    }

    fn set_using_phone(&self, _client: ClientId) {
        self.record("set_using_phone()".to_string());
    }

    fn set_phone_out(&self, _client: ClientId) {
        self.record("set_phone_out()".to_string());
    }

    fn send_text_message(&self, _client: ClientId, number: String, message: String) {
        self.record(format!("send_text_message({number}, {message})"));
    }

    fn add_contact(&self, _client: ClientId, name: String, number: String) {
        self.record(format!("add_contact({name}, {number})"));
    }

    fn delete_contact(&self, _client: ClientId, number: String) {
        self.record(format!("delete_contact({number})"));
    }

    fn delete_text_message(&self, _client: ClientId, message_id: i64) {
        self.record(format!("delete_text_message({message_id})"));
    }

    fn start_phone_call(&self, _client: ClientId, number: String) {
        self.record(format!("start_phone_call({number})"));
    }

    fn accept_phone_call(&self, _client: ClientId) {
        self.record("accept_phone_call()".to_string());
    }

    fn hangup_phone_call(&self, _client: ClientId) {
        self.record("hangup_phone_call()".to_string());
    }

    fn set_spawn_house(&self, _client: ClientId, house_id: i64) {
        self.record(format!("set_spawn_house({house_id})"));
    }
}

impl VehicleService for RecordingBackend {
    fn exit_vehicle_shop(&self, _client: ClientId) {
        self.record("exit_vehicle_shop()".to_string());
    }

    fn purchase_vehicle(
        &self,
        _client: ClientId,
        model: String,
        primary_color: i32,
        secondary_color: i32,
    ) {
        self.record(format!("purchase_vehicle({model}, {primary_color}, {secondary_color})"));
    }

    fn spawn_vehicle(&self, _client: ClientId, vehicle_id: i64) {
        self.record(format!("spawn_vehicle({vehicle_id})"));
    }

    fn park_vehicle(&self, _client: ClientId, vehicle_id: i64) {
        self.record(format!("park_vehicle({vehicle_id})"));
    }

    fn lock_vehicle(&self, _client: ClientId, vehicle_id: i64) {
        self.record(format!("lock_vehicle({vehicle_id})"));
    }

    fn purchase_parking_spot(&self, _client: ClientId, spot_id: i64) {
        self.record(format!("purchase_parking_spot({spot_id})"));
    }
}

impl JobService for RecordingBackend {
    fn take_job(&self, character: Character, job_id: i64) {
        self.record(format!("take_job({}, {job_id})", character.name));
    }
}

impl ItemService for RecordingBackend {
    fn use_item(&self, character: Character, item_id: i64) {
        self.record(format!("use_item({}, {item_id})", character.name));
    }
}

impl LawEnforcementService for RecordingBackend {
    fn arrest_character(&self, officer: Character, suspect: CharacterId) {
        self.record(format!("arrest_character({}, {suspect})", officer.name));
    }
}

struct Fixture {
    router: EventRouter,
    backend: Arc<RecordingBackend>,
    sessions: Arc<SessionRegistry>,
    client: ClientId,
}

fn fixture() -> Fixture {
    let backend = Arc::new(RecordingBackend::default());
    let sessions = Arc::new(SessionRegistry::new());
    let router = build_router(&Subsystems::from_backend(backend.clone()), sessions.clone())
        .expect("event table has no duplicates");

    let client = ClientId::new();
    sessions.open(client, SocketAddr::from(([127, 0, 0, 1], 50000)));

    Fixture {
        router,
        backend,
        sessions,
        client,
    }
}

const SUSPECT: &str = "6f1c2a3e-9b7d-4c8e-a1f2-0d3b5e7a9c11";

/// Every client event with a sample payload and the call it must produce.
fn client_events() -> Vec<(&'static str, Vec<Value>, String)> {
    vec![
        ("EVENT_REQUEST_ENTER_HOUSE", vec![json!(12)], "request_enter_house(12)".into()),
        ("EVENT_REQUEST_EXIT_HOUSE", vec![], "request_exit_house()".into()),
        (
            "EVENT_REQUEST_CREATE_ACCOUNT",
            vec![json!("tommy"), json!("hunter2")],
            "request_create_account(tommy, hunter2)".into(),
        ),
        (
            "EVENT_REQUEST_SELECT_CHARACTER",
            vec![json!("Tommy Vercetti")],
            "request_select_character(Tommy Vercetti)".into(),
        ),
        ("EVENT_REQUEST_CREATE_CHARACTER_MENU", vec![], "request_create_character_menu()".into()),
        (
            "EVENT_REQUEST_CREATE_CHARACTER",
            vec![json!("Tommy"), json!("Vercetti"), json!("male01")],
            "request_create_character(Tommy, Vercetti, male01)".into(),
        ),
        ("EVENT_REQUEST_OWNED_HOUSES", vec![], "send_owned_houses()".into()),
        ("EVENT_SET_PLAYER_USING_PHONE", vec![], "set_using_phone()".into()),
        ("EVENT_SET_PLAYER_NOT_USING_PHONE", vec![], "set_phone_out()".into()),
        (
            "EVENT_SEND_TEXT_MESSAGE",
            vec![json!("555-0100"), json!("meet at the docks")],
            "send_text_message(555-0100, meet at the docks)".into(),
        ),
        (
            "EVENT_ADD_PHONE_CONTACT",
            vec![json!("Lance"), json!("555-0199")],
            "add_contact(Lance, 555-0199)".into(),
        ),
        ("EVENT_REMOVE_PHONE_CONTACT", vec![json!("555-0199")], "delete_contact(555-0199)".into()),
        ("EVENT_REMOVE_TEXT_MESSAGE", vec![json!(3)], "delete_text_message(3)".into()),
        ("EVENT_START_PHONE_CALL", vec![json!("555-0100")], "start_phone_call(555-0100)".into()),
        ("EVENT_ACCEPT_PHONE_CALL", vec![], "accept_phone_call()".into()),
        ("EVENT_END_PHONE_CALL", vec![], "hangup_phone_call()".into()),
        ("EVENT_EXIT_VEHICLE_SHOP", vec![], "exit_vehicle_shop()".into()),
        (
            "EVENT_BUY_VEHICLE",
            vec![json!("infernus"), json!(1), json!(0)],
            "purchase_vehicle(infernus, 1, 0)".into(),
        ),
        ("EVENT_TRY_SPAWN_VEHICLE", vec![json!(8)], "spawn_vehicle(8)".into()),
        ("EVENT_TRY_PARK_VEHICLE", vec![json!(8)], "park_vehicle(8)".into()),
        ("EVENT_TRY_LOCK_VEHICLE", vec![json!(8)], "lock_vehicle(8)".into()),
        ("EVENT_TRY_BUY_PARKING_SPOT", vec![json!(21)], "purchase_parking_spot(21)".into()),
        ("EVENT_TRY_SET_SPAWN_LOCATION", vec![json!(12)], "set_spawn_house(12)".into()),
        ("EVENT_ACCEPT_JOB", vec![json!(4)], "take_job(Tommy Vercetti, 4)".into()),
        ("EVENT_TRY_BUY_PROPERTY", vec![json!(12)], "buy_market_house(Tommy Vercetti, 12)".into()),
        ("EVENT_TRY_USE_ITEM", vec![json!(17)], "use_item(Tommy Vercetti, 17)".into()),
        (
            "EVENT_ARREST_CHARACTER",
            vec![json!(SUSPECT)],
            format!("arrest_character(Tommy Vercetti, {SUSPECT})"),
        ),
    ]
}

#[test]
fn test_table_contains_every_client_event() {
    let f = fixture();
    let events = client_events();

    assert_eq!(f.router.len(), 27);
    assert_eq!(events.len(), 27);
    for (name, _, _) in &events {
        assert!(f.router.contains(name), "{name} is not registered");
    }
}

#[test]
fn test_only_character_events_are_gated() {
    let f = fixture();
    let gated = [
        "EVENT_ACCEPT_JOB",
        "EVENT_TRY_BUY_PROPERTY",
        "EVENT_TRY_USE_ITEM",
        "EVENT_ARREST_CHARACTER",
    ];

    for registration in f.router.registrations() {
        let expected = if gated.contains(&registration.name()) {
            EventOptions::USES_CHARACTER
        } else {
            EventOptions::NONE
        };
        assert_eq!(registration.options(), expected, "{}", registration.name());
    }
}

#[test]
fn test_every_event_reaches_its_subsystem_method() {
    let f = fixture();
    f.sessions.activate_character(
        f.client,
        Character::new(CharacterId::new(), "Tommy Vercetti"),
    );

    for (name, args, expected) in client_events() {
        let outcome = f.router.try_dispatch(f.client, name, args);
        assert_eq!(outcome, DispatchOutcome::Delivered, "{name}");
        assert_eq!(f.backend.take(), vec![expected], "{name}");
    }

    let stats = f.router.stats();
    assert_eq!(stats.delivered, 27);
    assert_eq!(stats.failed, 0);
}

#[test]
fn test_character_events_need_a_selected_character() {
    let f = fixture();

    for (name, args, _) in client_events() {
        let gated = f.router.registration(name).unwrap().options().uses_character();
        let outcome = f.router.try_dispatch(f.client, name, args);
        if gated {
            assert_eq!(outcome, DispatchOutcome::MissingCharacter, "{name}");
        } else {
            assert_eq!(outcome, DispatchOutcome::Delivered, "{name}");
        }
    }

    assert_eq!(f.backend.take().len(), 23);
    assert_eq!(f.router.stats().unauthorized, 4);
}

#[test]
fn test_wrong_payload_types_fail_without_calling_the_subsystem() {
    let f = fixture();

    let outcome = f
        .router
        .try_dispatch(f.client, "EVENT_TRY_SPAWN_VEHICLE", vec![json!("eight")]);

    assert!(matches!(outcome, DispatchOutcome::Failed(_)));
    assert!(f.backend.take().is_empty());
    assert_eq!(f.router.stats().failed, 1);
}

#[test]
fn test_closing_the_session_revokes_character_events() {
    let f = fixture();
    f.sessions.activate_character(
        f.client,
        Character::new(CharacterId::new(), "Tommy Vercetti"),
    );
    f.sessions.close(f.client);

    let outcome = f.router.try_dispatch(f.client, "EVENT_TRY_USE_ITEM", vec![json!(17)]);

    assert_eq!(outcome, DispatchOutcome::MissingCharacter);
    assert!(f.backend.take().is_empty());
}

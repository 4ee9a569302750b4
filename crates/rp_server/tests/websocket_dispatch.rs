//! WebSocket round trips against a bound server.

use futures::{SinkExt, StreamExt};
use rp_event_router::EventRouter;
use rp_server::{
    build_router, AuditSubsystems, ClientEvent, GameServer, ServerConfig, ServerError,
    SessionRegistry, Subsystems,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::Message;

struct RunningServer {
    server: Arc<GameServer>,
    router: Arc<EventRouter>,
    sessions: Arc<SessionRegistry>,
    url: String,
    serving: JoinHandle<Result<(), ServerError>>,
}

async fn start_server(max_connections: usize) -> RunningServer {
    let sessions = Arc::new(SessionRegistry::new());
    let subsystems = Subsystems::from_backend(Arc::new(AuditSubsystems::new(sessions.clone())));
    let router = Arc::new(build_router(&subsystems, sessions.clone()).unwrap());

    let config = ServerConfig {
        bind_address: SocketAddr::from(([127, 0, 0, 1], 0)),
        max_connections,
    };
    let server = Arc::new(GameServer::new(config, router.clone(), sessions.clone()));
    let listener = server.bind().await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());

    let serving = server.clone();
    let serving = tokio::spawn(async move { serving.serve(listener).await });

    RunningServer {
        server,
        router,
        sessions,
        url,
        serving,
    }
}

/// Polls `condition` until it holds or two seconds pass.
async fn eventually(mut condition: impl FnMut() -> bool) {
    timeout(Duration::from_secs(2), async {
        while !condition() {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

fn frame(event: &str, args: Vec<serde_json::Value>) -> Message {
    Message::Text(ClientEvent::new(event, args).to_json().unwrap().into())
}

#[tokio::test]
async fn test_events_flow_from_socket_to_subsystems() {
    let running = start_server(16).await;
    let (mut ws, _) = connect_async(running.url.as_str()).await.unwrap();
    eventually(|| running.sessions.session_count() == 1).await;

    ws.send(Message::Text("definitely not json".into())).await.unwrap();
    ws.send(frame("EVENT_REQUEST_SELECT_CHARACTER", vec![json!("Victor Vance")]))
        .await
        .unwrap();
    ws.send(frame("EVENT_TRY_USE_ITEM", vec![json!(17)])).await.unwrap();
    ws.send(frame("EVENT_DOES_NOT_EXIST", vec![])).await.unwrap();

    eventually(|| running.router.stats().total() == 3).await;
    let stats = running.router.stats();
    assert_eq!(stats.delivered, 2);
    assert_eq!(stats.unknown, 1);
    assert_eq!(stats.unauthorized, 0);
    assert_eq!(running.server.connection_count(), 1);

    ws.close(None).await.unwrap();
    eventually(|| running.sessions.session_count() == 0).await;
    eventually(|| running.server.connection_count() == 0).await;
}

#[tokio::test]
async fn test_character_events_are_dropped_before_selection() {
    let running = start_server(16).await;
    let (mut ws, _) = connect_async(running.url.as_str()).await.unwrap();

    ws.send(frame("EVENT_ACCEPT_JOB", vec![json!(4)])).await.unwrap();

    eventually(|| running.router.stats().unauthorized == 1).await;
    assert_eq!(running.router.stats().delivered, 0);
}

#[tokio::test]
async fn test_ping_is_answered() {
    let running = start_server(16).await;
    let (mut ws, _) = connect_async(running.url.as_str()).await.unwrap();

    ws.send(Message::Ping(vec![7u8, 7, 7].into())).await.unwrap();

    let pong = timeout(Duration::from_secs(2), async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Pong(payload))) => return payload,
                Some(Ok(_)) => continue,
                other => panic!("connection ended before pong: {other:?}"),
            }
        }
    })
    .await
    .unwrap();

    assert_eq!(&pong[..], &[7u8, 7, 7][..]);
}

#[tokio::test]
async fn test_connections_over_the_limit_are_closed() {
    let running = start_server(1).await;
    let (_first, _) = connect_async(running.url.as_str()).await.unwrap();
    eventually(|| running.server.connection_count() == 1).await;

    let (mut second, _) = connect_async(running.url.as_str()).await.unwrap();
    let message = timeout(Duration::from_secs(2), second.next())
        .await
        .unwrap();

    match message {
        Some(Ok(Message::Close(Some(frame)))) => assert_eq!(frame.code, CloseCode::Again),
        other => panic!("expected a close frame, got {other:?}"),
    }
    assert_eq!(running.sessions.session_count(), 1);
}

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let running = start_server(16).await;

    running.server.shutdown();
    timeout(Duration::from_secs(2), running.serving)
        .await
        .unwrap()
        .unwrap()
        .unwrap();

    assert!(connect_async(running.url.as_str()).await.is_err());
}

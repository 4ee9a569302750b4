//! WebSocket transport.
//!
//! [`GameServer`] accepts client connections, gives each one a [`ClientId`]
//! and a session, and feeds every text frame it receives to the event router.
//! Each connection is served by its own task, so events from one client are
//! dispatched in the order they were sent.

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::messaging::ClientEvent;
use crate::session::SessionRegistry;
use futures::{SinkExt, StreamExt};
use rp_event_router::{ClientId, EventRouter};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

/// The roleplay game server.
///
/// Owns no gameplay state: sessions live in the [`SessionRegistry`] and every
/// client event goes through the shared [`EventRouter`].
pub struct GameServer {
    config: ServerConfig,
    router: Arc<EventRouter>,
    sessions: Arc<SessionRegistry>,
    active_connections: Arc<AtomicUsize>,
    shutdown_sender: watch::Sender<bool>,
}

impl GameServer {
    /// Creates a server that has not bound its listener yet.
    ///
    /// # Arguments
    ///
    /// * `config` - Listen address and connection limit
    /// * `router` - The event table every text frame is dispatched through
    /// * `sessions` - The registry the router also reads identities from
    pub fn new(config: ServerConfig, router: Arc<EventRouter>, sessions: Arc<SessionRegistry>) -> Self {
        let (shutdown_sender, _) = watch::channel(false);
        Self {
            config,
            router,
            sessions,
            active_connections: Arc::new(AtomicUsize::new(0)),
            shutdown_sender,
        }
    }

    /// Binds the configured listen address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Network`] if the address can't be bound.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let listener = TcpListener::bind(self.config.bind_address)
            .await
            .map_err(|e| ServerError::Network(format!("Bind failed: {e}")))?;
        info!("✅ Listening on {}", listener.local_addr()?);
        Ok(listener)
    }

    /// Binds and serves until [`shutdown`](Self::shutdown) is called.
    ///
    /// # Returns
    ///
    /// `Ok(())` once the accept loop has stopped, or the bind error.
    pub async fn start(&self) -> Result<(), ServerError> {
        info!("🚀 Starting roleplay server on {}", self.config.bind_address);
        let listener = self.bind().await?;
        self.serve(listener).await
    }

    /// Accepts connections on `listener` until [`shutdown`](Self::shutdown)
    /// is called.
    ///
    /// Each connection gets its own task. Connections over
    /// `max_connections` are closed with code 1013 right after the
    /// handshake. Accept errors are logged and the loop keeps going.
    ///
    /// # Arguments
    ///
    /// * `listener` - An already bound listener, usually from [`bind`](Self::bind)
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use rp_server::GameServer;
    ///
    /// # async fn run(server: GameServer) -> Result<(), rp_server::ServerError> {
    /// let listener = server.bind().await?;
    /// server.serve(listener).await
    /// # }
    /// ```
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        let mut shutdown_receiver = self.shutdown_sender.subscribe();

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, addr)) => {
                        let router = self.router.clone();
                        let sessions = self.sessions.clone();
                        let active_connections = self.active_connections.clone();
                        let max_connections = self.config.max_connections;

                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(
                                stream,
                                addr,
                                router,
                                sessions,
                                active_connections,
                                max_connections,
                            )
                            .await
                            {
                                error!("Connection error: {}", e);
                            }
                        });
                    }
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                    }
                },
                _ = shutdown_receiver.wait_for(|stopped| *stopped) => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        info!("Server stopped");
        Ok(())
    }

    /// Stops the accept loop. Open connections finish on their own.
    pub fn shutdown(&self) {
        self.shutdown_sender.send_replace(true);
    }

    /// Number of clients currently connected.
    pub fn connection_count(&self) -> usize {
        self.active_connections.load(Ordering::Relaxed)
    }

    /// Spawns a task that logs the router counters every `period`.
    pub fn start_stats_reporter(&self, period: Duration) -> JoinHandle<()> {
        let router = self.router.clone();
        let active_connections = self.active_connections.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let stats = router.stats();
                info!(
                    connections = active_connections.load(Ordering::Relaxed),
                    delivered = stats.delivered,
                    unknown = stats.unknown,
                    unauthorized = stats.unauthorized,
                    failed = stats.failed,
                    "📊 Event router stats"
                );
            }
        })
    }
}

/// Holds one slot of the connection limit until dropped.
struct ConnectionSlot {
    active_connections: Arc<AtomicUsize>,
}

impl ConnectionSlot {
    fn acquire(active_connections: &Arc<AtomicUsize>, max_connections: usize) -> Option<Self> {
        active_connections
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                (count < max_connections).then_some(count + 1)
            })
            .ok()
            .map(|_| Self {
                active_connections: active_connections.clone(),
            })
    }
}

impl Drop for ConnectionSlot {
    fn drop(&mut self) {
        self.active_connections.fetch_sub(1, Ordering::SeqCst);
    }
}

async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    router: Arc<EventRouter>,
    sessions: Arc<SessionRegistry>,
    active_connections: Arc<AtomicUsize>,
    max_connections: usize,
) -> Result<(), ServerError> {
    let mut ws_stream = accept_async(stream)
        .await
        .map_err(|e| ServerError::Network(format!("WebSocket handshake failed for {addr}: {e}")))?;

    let Some(_slot) = ConnectionSlot::acquire(&active_connections, max_connections) else {
        warn!("Refusing connection from {}: server is full ({} clients)", addr, max_connections);
        let frame = CloseFrame {
            code: CloseCode::Again,
            reason: "server is full".into(),
        };
        if let Err(e) = ws_stream.close(Some(frame)).await {
            debug!("Failed to close refused connection from {}: {}", addr, e);
        }
        return Ok(());
    };

    let client = ClientId::new();
    sessions.open(client, addr);
    info!("👋 Client {} connected from {}", client, addr);

    while let Some(message) = ws_stream.next().await {
        match message {
            Ok(Message::Text(text)) => match ClientEvent::parse(text.as_str()) {
                Ok(event) => router.dispatch(client, &event.event, event.args),
                Err(e) => warn!("Skipping malformed frame from client {}: {}", client, e),
            },
            Ok(Message::Ping(payload)) => {
                if let Err(e) = ws_stream.send(Message::Pong(payload)).await {
                    warn!("Failed to answer ping from client {}: {}", client, e);
                    break;
                }
            }
            Ok(Message::Pong(_)) => {}
            Ok(Message::Close(_)) => {
                debug!("Client {} requested close", client);
                break;
            }
            Ok(_) => {
                warn!("Received unsupported message type from client {}", client);
            }
            Err(e) => {
                warn!("WebSocket error for client {}: {}", client, e);
                break;
            }
        }
    }

    sessions.close(client);
    info!("👋 Client {} disconnected", client);
    Ok(())
}

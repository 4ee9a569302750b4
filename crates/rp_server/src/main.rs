//! Roleplay server entry point.
//!
//! Loads the configuration, builds the event table over the audit backend
//! and serves WebSocket clients until SIGINT/SIGTERM.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rp_event_router::IdentityProvider;
use rp_server::{
    build_router, logging, signals, AppConfig, AuditSubsystems, CliArgs, ConfigOrigin,
    GameServer, SessionRegistry, Subsystems,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

const STATS_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    let (mut config, origin) = AppConfig::load_from_file(&args.config)
        .await
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    config.apply_cli_overrides(&args);
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {e}"))?;

    logging::setup_logging(&config.logging)?;
    info!("Starting roleplay server v{}", env!("CARGO_PKG_VERSION"));
    if origin == ConfigOrigin::CreatedDefault {
        info!("Created default configuration file: {}", args.config.display());
    }
    info!("Configuration loaded from: {}", args.config.display());

    let server_config = config.to_server_config()?;

    let sessions = Arc::new(SessionRegistry::new());
    let subsystems = Subsystems::from_backend(Arc::new(AuditSubsystems::new(sessions.clone())));
    let identity: Arc<dyn IdentityProvider> = sessions.clone();
    let router = match build_router(&subsystems, identity) {
        Ok(router) => Arc::new(router),
        Err(e) => {
            error!("❌ Event table rejected: {}", e);
            return Err(e.into());
        }
    };
    info!("🎉 Event table ready with {} event(s)", router.len());

    let server = Arc::new(GameServer::new(server_config, router, sessions));
    let stats_reporter = server.start_stats_reporter(STATS_INTERVAL);

    let mut serving = {
        let server = server.clone();
        tokio::spawn(async move { server.start().await })
    };

    let result = tokio::select! {
        finished = &mut serving => finished,
        signal = signals::shutdown_signal() => {
            let received = signal.context("Failed to install signal handlers")?;
            info!("📡 Received {}", received);
            info!("🛑 Shutting down");
            server.shutdown();
            serving.await
        }
    };

    stats_reporter.abort();
    if let Err(e) = result? {
        error!("❌ Server error: {}", e);
        return Err(e.into());
    }
    info!("✅ Shutdown complete");
    Ok(())
}

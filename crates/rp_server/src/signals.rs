//! Termination signals that stop the server.

use std::fmt;
use tokio::signal;

/// The signal that asked the server to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT, or Ctrl+C where Unix signals are unavailable
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => f.write_str("SIGINT"),
            ShutdownSignal::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Waits until the process is asked to terminate.
///
/// # Platform Support
///
/// * **Unix platforms**: SIGINT and SIGTERM
/// * **Elsewhere**: Ctrl+C, reported as [`ShutdownSignal::Interrupt`]
///
/// # Returns
///
/// The signal that arrived first.
///
/// # Errors
///
/// Fails if the signal handlers can't be installed.
///
/// # Examples
///
/// ```rust,no_run
/// use rp_server::signals::shutdown_signal;
///
/// # async fn run() -> std::io::Result<()> {
/// let received = shutdown_signal().await?;
/// println!("stopping on {received}");
/// # Ok(())
/// # }
/// ```
pub async fn shutdown_signal() -> std::io::Result<ShutdownSignal> {
    #[cfg(unix)]
    {
        use signal::unix::{signal, SignalKind};

        let mut interrupt = signal(SignalKind::interrupt())?;
        let mut terminate = signal(SignalKind::terminate())?;

        let received = tokio::select! {
            _ = interrupt.recv() => ShutdownSignal::Interrupt,
            _ = terminate.recv() => ShutdownSignal::Terminate,
        };
        Ok(received)
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await?;
        Ok(ShutdownSignal::Interrupt)
    }
}

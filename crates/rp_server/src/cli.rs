//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the roleplay server.
///
/// Every option except `--config` overrides the matching configuration file
/// setting.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Roleplay game server", long_about = None)]
pub struct CliArgs {
    /// Configuration file path
    ///
    /// A default configuration is written here if the file doesn't exist.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Listen address, e.g. "127.0.0.1:8080"
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Output logs in JSON format
    #[arg(long)]
    pub json_logs: bool,

    /// Maximum number of concurrent client connections
    #[arg(long)]
    pub max_connections: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["rp_server"]);
        assert_eq!(args.config, PathBuf::from("config.toml"));
        assert!(args.bind.is_none());
        assert!(!args.json_logs);
    }

    #[test]
    fn test_overrides() {
        let args = CliArgs::parse_from([
            "rp_server",
            "-c",
            "server.toml",
            "--bind",
            "0.0.0.0:22005",
            "-l",
            "debug",
            "--json-logs",
            "--max-connections",
            "200",
        ]);
        assert_eq!(args.config, PathBuf::from("server.toml"));
        assert_eq!(args.bind.as_deref(), Some("0.0.0.0:22005"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.json_logs);
        assert_eq!(args.max_connections, Some(200));
    }
}

//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;

/// Top-level service configuration.
///
/// Loaded once at startup via [`LunchConfig::from_env`].
#[derive(Debug, Clone)]
pub struct LunchConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8765`).
    pub listen_addr: SocketAddr,

    /// SQLite connection string for the poll store.
    pub database_url: String,

    /// Slack bot token used for `chat.postMessage`.
    pub slack_token: String,

    /// Channel the weekly poll is announced in.
    pub slack_channel: String,

    /// Message text posted alongside the poll buttons.
    pub announcement: String,

    /// Master switch for broadcasting. When off (or when no token is set)
    /// polls are created without posting to Slack.
    pub broadcast_enabled: bool,
}

impl LunchConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8765".to_string())
            .parse()?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://lunch.db?mode=rwc".to_string());

        let slack_token = std::env::var("SLACK_TOKEN").unwrap_or_default();
        let slack_channel =
            std::env::var("SLACK_CHANNEL").unwrap_or_else(|_| "#general".to_string());
        let announcement =
            std::env::var("SLACK_ANNOUNCEMENT").unwrap_or_else(|_| "What's for lunch?".to_string());

        let broadcast_enabled = parse_env_bool("BROADCAST_ENABLED", true);

        Ok(Self {
            listen_addr,
            database_url,
            slack_token,
            slack_channel,
            announcement,
            broadcast_enabled,
        })
    }
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}

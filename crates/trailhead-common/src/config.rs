//! Application configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for production.
//! Config precedence: env vars > .env file > config.toml > defaults

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Initialize the global configuration from environment.
///
/// Should be called once at application startup, before any other code accesses config.
pub fn init() -> Result<&'static AppConfig, config::ConfigError> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    let cfg = config::Config::builder()
        // Defaults
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("server.name", "localhost")?
        .set_default("club.name", "MIT Outing Club")?
        .set_default("club.time_zone", "America/New_York")?
        .set_default("club.must_update_after_days", 180)?
        .set_default("club.affiliation_cutoff", "2018-10-27T08:30:00Z")?
        .set_default("club.manage_emails_url", "/accounts/email/")?
        .set_default("club.edit_profile_url", "/profile/edit/")?
        .set_default("club.login_url", "/accounts/login/")?
        // Optional config file
        .add_source(config::File::with_name("config").required(false))
        // Environment variables (TRAILHEAD__SERVER__PORT, TRAILHEAD__AUTH__JWT_SECRET, etc.)
        .add_source(
            config::Environment::with_prefix("TRAILHEAD")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = cfg.try_deserialize()?;
    Ok(CONFIG.get_or_init(|| app_config))
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub club: ClubConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Public host name, used only in logs.
    pub name: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// JWT verification secret (HS256), shared with the login service
    pub jwt_secret: String,
}

/// Club-wide rules that feed [`crate::policy::ClubPolicy`].
#[derive(Debug, Deserialize, Clone)]
pub struct ClubConfig {
    /// Shown as the feed title.
    pub name: String,
    /// IANA name of the club's time zone, e.g. `America/New_York`.
    pub time_zone: String,
    /// Profiles older than this many days must be re-confirmed before trips.
    pub must_update_after_days: i64,
    /// Profiles last updated before this instant predate the affiliation overhaul.
    pub affiliation_cutoff: DateTime<Utc>,
    pub manage_emails_url: String,
    pub edit_profile_url: String,
    pub login_url: String,
}

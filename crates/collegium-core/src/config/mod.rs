use anyhow::Result;
use chrono_tz::Tz;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, FileFormat};
use serde::Deserialize;

use crate::constants::DEFAULT_MAX_OCCURRENCES;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
    /// Apply embedded migrations on start-up.
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the address to bind in the format "host:port".
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// What the timetable generator does for a user id that is neither a student nor staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedViewerPolicy {
    /// Show every timetable entry of the semester.
    #[default]
    Unscoped,
    /// Show no timetable entries at all.
    Empty,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// IANA name of the campus time zone, e.g. `Africa/Nairobi`.
    pub timezone: String,
    #[serde(default)]
    pub unresolved_viewer: UnresolvedViewerPolicy,
    pub max_occurrences: u16,
}

impl CalendarConfig {
    /// ## Summary
    /// Parses the configured campus time zone.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the name is not a known IANA zone.
    pub fn zone(&self) -> CoreResult<Tz> {
        self.timezone.parse::<Tz>().map_err(|err| {
            CoreError::ConfigError(format!("unknown time zone `{}`: {err}", self.timezone))
        })
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            unresolved_viewer: UnresolvedViewerPolicy::default(),
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

impl Settings {
    fn with_defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.max_connections", 4)?
            .set_default("database.run_migrations", true)?
            .set_default("logging.level", "info")?
            .set_default("calendar.timezone", "UTC")?
            .set_default("calendar.unresolved_viewer", "unscoped")?
            .set_default("calendar.max_occurrences", i64::from(DEFAULT_MAX_OCCURRENCES))?)
    }

    /// ## Summary
    /// Loads configuration from `config.toml` and environment variables into a `Settings`.
    /// Environment variables (`COLLEGIUM__DATABASE__URL`, ...) take precedence over the file.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::with_defaults()?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Environment
            .add_source(
                config::Environment::with_prefix("COLLEGIUM")
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?)
    }

    /// ## Summary
    /// Builds a `Settings` from TOML text layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the TOML is invalid or required keys are missing.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(Self::with_defaults()?
            .add_source(config::File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

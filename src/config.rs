//! Configuration module for clubboard.

use serde::Deserialize;
use std::path::Path;

use crate::auth::{validate_pin, RegistrationPolicy};
use crate::datetime::is_valid_timezone;
use crate::{BoardError, Result};

/// Environment variable overriding `web.session_secret`.
pub const ENV_SESSION_SECRET: &str = "CLUBBOARD_SESSION_SECRET";
/// Environment variable overriding `database.path`.
pub const ENV_DB_PATH: &str = "CLUBBOARD_DB_PATH";
/// Environment variable overriding `admin.password`.
pub const ENV_ADMIN_PASSWORD: &str = "CLUBBOARD_ADMIN_PASSWORD";

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Timezone for displaying dates (e.g., "Asia/Tokyo", "UTC").
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "Asia/Tokyo".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/clubboard.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Locale configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    /// Language code (ja / en).
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "ja".to_string()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty disables file logging.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/clubboard.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Bootstrap administrator created on first run.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Username of the seeded administrator.
    #[serde(default = "default_admin_username")]
    pub username: String,
    /// 4-digit code of the seeded administrator.
    #[serde(default = "default_admin_password")]
    pub password: String,
}

fn default_admin_username() -> String {
    "teacher".to_string()
}

fn default_admin_password() -> String {
    "9999".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
        }
    }
}

/// Web UI configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// Secret used to sign session cookies (must be set).
    #[serde(default)]
    pub session_secret: String,
    /// Session lifetime in seconds.
    #[serde(default = "default_session_expiry")]
    pub session_expiry_secs: u64,
    /// Mark the session cookie `Secure` (HTTPS deployments).
    #[serde(default)]
    pub secure_cookie: bool,
    /// Who may create accounts.
    #[serde(default)]
    pub registration: RegistrationPolicy,
    /// Whether to serve static files under `/static`. Every page links
    /// `/static/style.css`.
    #[serde(default = "default_serve_static")]
    pub serve_static: bool,
    /// Path to static files directory.
    #[serde(default = "default_static_path")]
    pub static_path: String,
    /// Rate limit for login attempts (requests per minute per IP).
    #[serde(default = "default_login_rate_limit")]
    pub login_rate_limit: u32,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    8080
}

fn default_session_expiry() -> u64 {
    86400 // 24 hours
}

fn default_serve_static() -> bool {
    true
}

fn default_static_path() -> String {
    "static".to_string()
}

fn default_login_rate_limit() -> u32 {
    5
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            session_secret: String::new(),
            session_expiry_secs: default_session_expiry(),
            secure_cookie: false,
            registration: RegistrationPolicy::default(),
            serve_static: default_serve_static(),
            static_path: default_static_path(),
            login_rate_limit: default_login_rate_limit(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Locale configuration.
    #[serde(default)]
    pub locale: LocaleConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Bootstrap administrator.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Web UI configuration.
    #[serde(default)]
    pub web: WebConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BoardError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BoardError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CLUBBOARD_SESSION_SECRET`: session signing secret
    /// - `CLUBBOARD_DB_PATH`: SQLite database path
    /// - `CLUBBOARD_ADMIN_PASSWORD`: bootstrap administrator code
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(secret) = non_empty_env(ENV_SESSION_SECRET) {
            self.web.session_secret = secret;
        }
        if let Some(path) = non_empty_env(ENV_DB_PATH) {
            self.database.path = path;
        }
        if let Some(password) = non_empty_env(ENV_ADMIN_PASSWORD) {
            self.admin.password = password;
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the session secret is not set
    /// - the bootstrap admin code is not exactly 4 digits
    /// - the display timezone is unknown
    pub fn validate(&self) -> Result<()> {
        if self.web.session_secret.is_empty() {
            return Err(BoardError::Config(format!(
                "session_secret is not set. Set it in config.toml or via {ENV_SESSION_SECRET}."
            )));
        }
        if self.admin.username.trim().is_empty() {
            return Err(BoardError::Config("admin.username must not be empty".to_string()));
        }
        validate_pin(&self.admin.password)
            .map_err(|e| BoardError::Config(format!("admin.password: {e}")))?;
        if !is_valid_timezone(&self.server.timezone) {
            return Err(BoardError::Config(format!(
                "unknown timezone: {}",
                self.server.timezone
            )));
        }
        Ok(())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

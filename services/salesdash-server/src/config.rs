//! Server configuration
//!
//! Layered configuration: defaults, optional config file, environment
//! variables with the `SALESDASH` prefix, then CLI overrides.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    /// Server binding configuration
    #[serde(default)]
    pub server: ServerSettings,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthSettings,

    /// API configuration
    #[serde(default)]
    pub api: ApiSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server binding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout_secs: default_shutdown_timeout(),
        }
    }
}

impl ServerSettings {
    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Get the shutdown timeout duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL
    #[serde(default = "default_postgres_url")]
    pub postgres_url: String,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Maximum connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum connections in pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Run migrations on startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            postgres_url: default_postgres_url(),
            redis_url: default_redis_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            run_migrations: true,
        }
    }
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Access token signing secret
    #[serde(default)]
    pub jwt_secret: String,

    /// Refresh token signing secret (must differ from the access secret)
    #[serde(default)]
    pub refresh_token_secret: String,

    /// JWT issuer
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_token_lifetime")]
    pub access_token_lifetime_secs: u64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_token_lifetime")]
    pub refresh_token_lifetime_secs: u64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            refresh_token_secret: String::new(),
            jwt_issuer: default_jwt_issuer(),
            access_token_lifetime_secs: default_access_token_lifetime(),
            refresh_token_lifetime_secs: default_refresh_token_lifetime(),
        }
    }
}

/// API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Allowed CORS origin for the browser dashboard
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Enable request tracing
    #[serde(default = "default_true")]
    pub enable_tracing: bool,

    /// Set the Secure attribute on cookies (requires HTTPS)
    #[serde(default)]
    pub secure_cookies: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            cors_origin: default_cors_origin(),
            enable_tracing: true,
            secure_cookies: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// =============================================================================
// Default Functions
// =============================================================================

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_postgres_url() -> String {
    "postgresql://localhost/salesdash".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_jwt_issuer() -> String {
    "salesdash".to_string()
}

fn default_access_token_lifetime() -> u64 {
    3600 // 1 hour
}

fn default_refresh_token_lifetime() -> u64 {
    604800 // 7 days
}

fn default_cors_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl ServerConfig {
    /// Load configuration from environment and optional config file
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        // Environment variables with SALESDASH prefix, e.g. SALESDASH__SERVER__PORT
        builder = builder.add_source(
            config::Environment::with_prefix("SALESDASH")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;

        let mut server_config: ServerConfig = match config.try_deserialize() {
            Ok(parsed) => parsed,
            Err(e) => {
                // Runs before the tracing subscriber is installed
                eprintln!("Warning: failed to parse configuration, using defaults: {}", e);
                ServerConfig::default()
            }
        };

        // The flat env names take precedence where set
        if let Ok(url) = std::env::var("DATABASE_URL") {
            server_config.database.postgres_url = url;
        }
        if let Ok(url) = std::env::var("REDIS_URL") {
            server_config.database.redis_url = url;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            server_config.auth.jwt_secret = secret;
        }
        if let Ok(secret) = std::env::var("REFRESH_TOKEN_SECRET") {
            server_config.auth.refresh_token_secret = secret;
        }

        Ok(server_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.access_token_lifetime_secs, 3600);
        assert_eq!(config.auth.refresh_token_lifetime_secs, 604800);
        assert!(!config.api.secure_cookies);
    }

    #[test]
    fn test_socket_addr() {
        let settings = ServerSettings::default();
        assert_eq!(settings.socket_addr().port(), 3000);
    }

    #[test]
    fn test_malformed_config_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("salesdash-malformed-config.toml");
        std::fs::write(&path, "server = \"not a table\"").unwrap();

        let config = ServerConfig::load(path.to_str()).unwrap();
        assert_eq!(config.server.port, 3000);

        let _ = std::fs::remove_file(&path);
    }
}

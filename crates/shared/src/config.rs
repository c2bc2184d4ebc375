//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Stock and invoicing behaviour.
    #[serde(default)]
    pub inventory: InventoryConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Run pending migrations on server start.
    #[serde(default)]
    pub auto_migrate: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Inventory behaviour configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    /// Attempts per command when the store reports a transient conflict.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Items whose quantity is strictly below this value are reported as low stock.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i32,
    /// Number of recent orders and purchases shown in reports.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            low_stock_threshold: default_low_stock_threshold(),
            recent_limit: default_recent_limit(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_low_stock_threshold() -> i32 {
    5
}

fn default_recent_limit() -> u64 {
    5
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `STOCKBOOK__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("STOCKBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

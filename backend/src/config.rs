//! Configuration management for the inventory backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with INV_ prefix (`INV__DATABASE__URL`)

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{DEFAULT_INVENTORY_STATUS, DEFAULT_LOCATION, DEFAULT_SAFE_STOCK};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Defaults applied to newly created inventory records
    pub inventory: InventoryConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,

    /// Upper bound on the time spent serving a single request
    pub request_timeout_secs: u64,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL. Without one the server keeps records in memory.
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Apply pending migrations at startup
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InventoryConfig {
    /// Unit used when an inbound transaction has to create the inventory record
    pub default_unit: String,

    /// Reorder threshold for new inventory records
    pub default_safe_stock: i32,

    /// Storage location for new inventory records
    pub default_location: String,

    /// Status for new inventory records
    pub default_status: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human-readable ones
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("INV_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3001)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("server.cors_origins", vec!["http://localhost:3000"])?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.run_migrations", true)?
            .set_default("inventory.default_unit", "ea")?
            .set_default("inventory.default_safe_stock", DEFAULT_SAFE_STOCK)?
            .set_default("inventory.default_location", DEFAULT_LOCATION)?
            .set_default("inventory.default_status", DEFAULT_INVENTORY_STATUS)?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (INV prefix)
            .add_source(
                Environment::with_prefix("INV")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            host: "0.0.0.0".to_string(),
            request_timeout_secs: 30,
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            min_connections: 2,
            run_migrations: true,
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            default_unit: "ea".to_string(),
            default_safe_stock: DEFAULT_SAFE_STOCK,
            default_location: DEFAULT_LOCATION.to_string(),
            default_status: DEFAULT_INVENTORY_STATUS.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            inventory: InventoryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

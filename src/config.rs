use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{Coordinate, StartingPoint};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub discovery: DiscoverySettings,
    #[serde(default)]
    pub starting_points: Vec<StartingPointSettings>,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub pandals: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DiscoverySettings {
    /// Upper bound on pandals returned by one discovery request
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    /// How many documents to pull from the store before ranking
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
    /// Upper bound on stops in one planned route
    #[serde(default = "default_max_route_stops")]
    pub max_route_stops: usize,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            max_limit: default_max_limit(),
            fetch_limit: default_fetch_limit(),
            max_route_stops: default_max_route_stops(),
        }
    }
}

fn default_max_limit() -> u16 { 100 }
fn default_fetch_limit() -> usize { 500 }
fn default_max_route_stops() -> usize { 25 }

/// Preset starting point offered to users (metro stations, landmarks)
#[derive(Debug, Clone, Deserialize)]
pub struct StartingPointSettings {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl StartingPointSettings {
    pub fn to_starting_point(&self) -> StartingPoint {
        StartingPoint {
            name: self.name.clone(),
            location: Coordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Full,
}

impl LogFormat {
    /// Unrecognized values fall back to the plain `Full` format
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Full,
        }
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PANDAL_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PANDAL__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PANDAL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PANDAL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Configured starting point presets, skipping invalid coordinates
    pub fn starting_points(&self) -> Vec<StartingPoint> {
        self.starting_points
            .iter()
            .map(StartingPointSettings::to_starting_point)
            .filter(|start| match start.location.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Ignoring starting point {}: {}", start.name, e);
                    false
                }
            })
            .collect()
    }
}

/// Let the conventional Appwrite variables override the config file
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let overrides = [
        ("APPWRITE_ENDPOINT", "appwrite.endpoint"),
        ("APPWRITE_API_KEY", "appwrite.api_key"),
        ("APPWRITE_PROJECT_ID", "appwrite.project_id"),
        ("APPWRITE_DATABASE_ID", "appwrite.database_id"),
    ];

    let mut builder = Config::builder().add_source(settings);

    for (var, key) in overrides {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}

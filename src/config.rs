use crate::core::DestinationOverrides;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    pub contact: ContactSettings,
    #[serde(default)]
    pub admin: AdminSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Per-destination overrides merged over the built-in profiles
    #[serde(default)]
    pub destinations: BTreeMap<String, DestinationOverrides>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_capacity() -> u64 { 256 }
fn default_cache_ttl() -> u64 { 86_400 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

fn default_page_size() -> usize { crate::core::DEFAULT_PAGE_SIZE }
fn default_max_page_size() -> usize { 50 }
fn default_refresh_interval() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct ContactSettings {
    /// Agency WhatsApp number in international format
    pub whatsapp_number: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminSettings {
    /// Required in `X-Admin-Key` for admin routes when set
    pub api_key: Option<String>,
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

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HOLIDAY_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HOLIDAY__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        let settings = apply_env_shortcuts(settings)?;

        settings.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("HOLIDAY")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Honour the conventional unprefixed variables deployments already set
fn apply_env_shortcuts(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(endpoint) = env::var("STORE_URL") {
        builder = builder.set_override("store.endpoint", endpoint)?;
    }
    if let Ok(api_key) = env::var("STORE_API_KEY") {
        builder = builder.set_override("store.api_key", api_key)?;
    }
    if let Ok(number) = env::var("WHATSAPP_NUMBER") {
        builder = builder.set_override("contact.whatsapp_number", number)?;
    }
    if let Ok(port) = env::var("PORT") {
        builder = builder.set_override("server.port", port)?;
    }

    builder.build()
}

//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Billing API configuration.
    pub billing: BillingConfig,
    /// Cost cache configuration.
    pub cache: CacheConfig,
    /// Account catalog configuration.
    pub catalog: CatalogConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
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
    8000
}

/// Billing API (AWS Cost Explorer) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Endpoint override. When unset, `https://ce.{region}.amazonaws.com` is used.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Signing region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            region: default_region(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BillingConfig {
    /// Resolved endpoint URL.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://ce.{}.amazonaws.com", self.region))
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Cost cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for cached billing lookups, in minutes.
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
    /// Interval between expired-entry sweeps, in seconds.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_ttl_minutes() -> u64 {
    60
}

fn default_sweep_interval_secs() -> u64 {
    300 // 5 minutes
}

/// Account catalog configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path to the JSON file listing accounts and contracts.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String {
    "config/accounts.json".to_string()
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("COSTRECON")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.billing.region, "us-east-1");
        assert_eq!(config.billing.timeout_secs, 30);
        assert_eq!(config.cache.ttl_minutes, 60);
        assert_eq!(config.catalog.path, "config/accounts.json");
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_endpoint_url_from_region() {
        let billing = BillingConfig {
            region: "eu-west-1".to_string(),
            ..BillingConfig::default()
        };
        assert_eq!(billing.endpoint_url(), "https://ce.eu-west-1.amazonaws.com");
    }

    #[test]
    fn test_endpoint_url_override() {
        let billing = BillingConfig {
            endpoint: Some("http://localhost:4566".to_string()),
            ..BillingConfig::default()
        };
        assert_eq!(billing.endpoint_url(), "http://localhost:4566");
    }

    #[test]
    fn test_load_with_env_overrides() {
        temp_env::with_vars(
            [
                ("COSTRECON__SERVER__PORT", Some("9090")),
                ("COSTRECON__CACHE__TTL_MINUTES", Some("15")),
                ("COSTRECON__CATALOG__PATH", Some("/etc/costrecon/accounts.json")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.cache.ttl_minutes, 15);
                assert_eq!(config.catalog.path, "/etc/costrecon/accounts.json");
                assert_eq!(config.billing.region, "us-east-1");
            },
        );
    }
}

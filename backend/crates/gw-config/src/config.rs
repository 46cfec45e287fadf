use crate::{
    CONFIG_DIR_ENV, CONFIG_FILE_NAME, CacheConfig, CircuitBreakerConfig, ConfigError,
    ConfigErrorResult, DEFAULT_CONFIG_DIR, ListingConfig, LoggingConfig, RateLimitConfig,
    ServerConfig, ServicesConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cache: CacheConfig,
    pub listing: ListingConfig,
    pub rate_limit: RateLimitConfig,
    pub circuit_breaker: CircuitBreakerConfig,
    pub services: ServicesConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Load `.env` from the working directory if present
    /// 2. Check for GW_CONFIG_DIR env var, else use ./.gw/
    /// 3. Auto-create config directory if it doesn't exist
    /// 4. Load config.toml if it exists, else use defaults
    /// 5. Apply GW_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        // A missing .env is the normal case
        let _ = dotenvy::dotenv();

        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: GW_CONFIG_DIR env var > ./.gw/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.cache.validate()?;
        self.listing.validate()?;
        self.rate_limit.validate()?;
        self.circuit_breaker.validate()?;
        self.services.validate()?;
        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);

        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );

        info!(
            "  cache: identity={}s, tenant={}s, listing={}s, max_entries={}",
            self.cache.identity_ttl_secs,
            self.cache.tenant_ttl_secs,
            self.cache.listing_ttl_secs,
            self.cache.max_entries
        );

        info!(
            "  listing: default_limit={}, max_limit={}",
            self.listing.default_limit, self.listing.max_limit
        );

        info!(
            "  rate_limit: {} ({}/{}s)",
            if self.rate_limit.enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.rate_limit.max_requests,
            self.rate_limit.window_secs
        );

        info!(
            "  circuit_breaker: threshold={}, open={}s, window={}s",
            self.circuit_breaker.failure_threshold,
            self.circuit_breaker.open_duration_secs,
            self.circuit_breaker.failure_window_secs
        );

        for (name, endpoint) in [
            ("auth", &self.services.auth),
            ("users", &self.services.users),
            ("shops", &self.services.shops),
            ("products", &self.services.products),
        ] {
            info!(
                "  services.{}: {} (timeout {}ms)",
                name, endpoint.url, endpoint.timeout_ms
            );
        }
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("GW_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("GW_SERVER_PORT", &mut self.server.port);

        // Logging
        Self::apply_env_parse("GW_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("GW_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("GW_LOG_FILE", &mut self.logging.file);
        Self::apply_env_string("GW_LOG_DIR", &mut self.logging.dir);

        // Cache
        Self::apply_env_parse(
            "GW_CACHE_IDENTITY_TTL_SECS",
            &mut self.cache.identity_ttl_secs,
        );
        Self::apply_env_parse("GW_CACHE_TENANT_TTL_SECS", &mut self.cache.tenant_ttl_secs);
        Self::apply_env_parse(
            "GW_CACHE_LISTING_TTL_SECS",
            &mut self.cache.listing_ttl_secs,
        );
        Self::apply_env_parse("GW_CACHE_MAX_ENTRIES", &mut self.cache.max_entries);
        Self::apply_env_parse(
            "GW_CACHE_SWEEP_INTERVAL_SECS",
            &mut self.cache.sweep_interval_secs,
        );

        // Listing
        Self::apply_env_parse(
            "GW_LISTING_DEFAULT_LIMIT",
            &mut self.listing.default_limit,
        );
        Self::apply_env_parse("GW_LISTING_MAX_LIMIT", &mut self.listing.max_limit);

        // Rate limit
        Self::apply_env_bool("GW_RATE_LIMIT_ENABLED", &mut self.rate_limit.enabled);
        Self::apply_env_parse(
            "GW_RATE_LIMIT_MAX_REQUESTS",
            &mut self.rate_limit.max_requests,
        );
        Self::apply_env_parse(
            "GW_RATE_LIMIT_WINDOW_SECS",
            &mut self.rate_limit.window_secs,
        );

        // Circuit Breaker
        Self::apply_env_parse(
            "GW_CB_FAILURE_THRESHOLD",
            &mut self.circuit_breaker.failure_threshold,
        );
        Self::apply_env_parse(
            "GW_CB_OPEN_DURATION_SECS",
            &mut self.circuit_breaker.open_duration_secs,
        );
        Self::apply_env_parse(
            "GW_CB_HALF_OPEN_SUCCESS_THRESHOLD",
            &mut self.circuit_breaker.half_open_success_threshold,
        );
        Self::apply_env_parse(
            "GW_CB_FAILURE_WINDOW_SECS",
            &mut self.circuit_breaker.failure_window_secs,
        );

        // Services
        Self::apply_env_string("GW_SERVICES_AUTH_URL", &mut self.services.auth.url);
        Self::apply_env_parse(
            "GW_SERVICES_AUTH_TIMEOUT_MS",
            &mut self.services.auth.timeout_ms,
        );
        Self::apply_env_string("GW_SERVICES_USERS_URL", &mut self.services.users.url);
        Self::apply_env_parse(
            "GW_SERVICES_USERS_TIMEOUT_MS",
            &mut self.services.users.timeout_ms,
        );
        Self::apply_env_string("GW_SERVICES_SHOPS_URL", &mut self.services.shops.url);
        Self::apply_env_parse(
            "GW_SERVICES_SHOPS_TIMEOUT_MS",
            &mut self.services.shops.timeout_ms,
        );
        Self::apply_env_string("GW_SERVICES_PRODUCTS_URL", &mut self.services.products.url);
        Self::apply_env_parse(
            "GW_SERVICES_PRODUCTS_TIMEOUT_MS",
            &mut self.services.products.timeout_ms,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}

use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const MIN_TIMEOUT_MS: u64 = 100;
pub const MAX_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;
pub const DEFAULT_LISTING_TIMEOUT_MS: u64 = 5_000;

pub const DEFAULT_AUTH_URL: &str = "http://127.0.0.1:50051";
pub const DEFAULT_USERS_URL: &str = "http://127.0.0.1:50052";
pub const DEFAULT_SHOPS_URL: &str = "http://127.0.0.1:50053";
pub const DEFAULT_PRODUCTS_URL: &str = "http://127.0.0.1:50054";

/// Where a downstream service lives and how long a call to it may take.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceEndpoint {
    pub url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl ServiceEndpoint {
    pub fn new(url: &str, timeout_ms: u64) -> Self {
        Self {
            url: url.to_string(),
            timeout_ms,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn validate(&self, name: &str) -> ConfigErrorResult<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::service(format!(
                "services.{}.url must start with http:// or https://, got {:?}",
                name, self.url
            )));
        }

        if self.timeout_ms < MIN_TIMEOUT_MS || self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::service(format!(
                "services.{}.timeout_ms must be {}-{}, got {}",
                name, MIN_TIMEOUT_MS, MAX_TIMEOUT_MS, self.timeout_ms
            )));
        }

        Ok(())
    }
}

/// Downstream services the gateway talks to.
///
/// `auth` is the Identity Authority, `shops` doubles as the Tenant Authority,
/// `products` is the Resource Authority for listings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub auth: ServiceEndpoint,
    pub users: ServiceEndpoint,
    pub shops: ServiceEndpoint,
    pub products: ServiceEndpoint,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            auth: ServiceEndpoint::new(DEFAULT_AUTH_URL, DEFAULT_TIMEOUT_MS),
            users: ServiceEndpoint::new(DEFAULT_USERS_URL, DEFAULT_TIMEOUT_MS),
            shops: ServiceEndpoint::new(DEFAULT_SHOPS_URL, DEFAULT_TIMEOUT_MS),
            products: ServiceEndpoint::new(DEFAULT_PRODUCTS_URL, DEFAULT_LISTING_TIMEOUT_MS),
        }
    }
}

impl ServicesConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.auth.validate("auth")?;
        self.users.validate("users")?;
        self.shops.validate("shops")?;
        self.products.validate("products")?;
        Ok(())
    }
}

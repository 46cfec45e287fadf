mod cache_config;
mod circuit_breaker_config;
mod config;
mod error;
mod listing_config;
mod log_level;
mod logging_config;
mod rate_limit_config;
mod server_config;
mod services_config;

pub use cache_config::CacheConfig;
pub use circuit_breaker_config::CircuitBreakerConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
use error::ensure_within;
pub use listing_config::ListingConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use rate_limit_config::RateLimitConfig;
pub use server_config::ServerConfig;
pub use services_config::{ServiceEndpoint, ServicesConfig};

pub const CONFIG_DIR_ENV: &str = "GW_CONFIG_DIR";
pub const DEFAULT_CONFIG_DIR: &str = ".gw";
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const MIN_PORT: u16 = 1024;

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

#[cfg(test)]
mod tests;

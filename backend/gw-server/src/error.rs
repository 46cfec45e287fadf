use thiserror::Error;

/// Startup failures. Request-time failures are [`crate::ApiError`].
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] gw_config::ConfigError),

    #[error("Service client error: {0}")]
    Rpc(#[from] gw_rpc::RpcError),

    #[error("Failed to install metrics recorder: {message}")]
    Metrics { message: String },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;

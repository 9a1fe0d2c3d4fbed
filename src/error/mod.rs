pub use headlist_error::{ErrorExt, ListError, ListResult, StatusCode};
use thiserror::Error;

/// Ошибки настройки и установки логирования.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Unknown log level: {0}")]
    InvalidLevel(String),

    #[error("Invalid filter directive: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Logging already initialized: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

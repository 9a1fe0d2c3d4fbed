pub mod config;
mod filters;
mod formatter;

pub use self::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::LoggingError;

/// Инициализация логирования с конфигурацией.
///
/// Устанавливает глобальный subscriber; повторный вызов возвращает
/// [`LoggingError::Init`].
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    config.validate()?;

    let env_filter = filters::build_filter_from_config(config)?;
    let layer = formatter::build_formatter_from_config(config);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        commit = option_env!("GIT_COMMIT").unwrap_or("unknown"),
        build_time = option_env!("BUILD_TIME").unwrap_or("unknown"),
        log_level = %config.level,
        format = ?config.format,
        "Logging system initialized"
    );

    Ok(())
}

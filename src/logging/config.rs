use ::config::{Config, Environment};
use serde::Deserialize;

use crate::error::LoggingError;

/// Уровни, которые принимает фильтр логирования.
const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Формат вывода событий.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

/// Конфигурация логирования.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Уровень для событий крейта (`trace`..`error`, `off`).
    pub level: String,
    pub format: LogFormat,
    /// ANSI-цвета в консоли.
    pub ansi: bool,
    pub with_target: bool,
}

impl LoggingConfig {
    /// Загружает конфигурацию: значения по умолчанию, затем переменные
    /// окружения с префиксом `HEADLIST_LOG` (например, `HEADLIST_LOG_LEVEL`).
    pub fn load() -> Result<Self, LoggingError> {
        let defaults = Self::default();

        let cfg = Config::builder()
            .set_default("level", defaults.level)?
            .set_default("format", "compact")?
            .set_default("ansi", defaults.ansi)?
            .set_default("with_target", defaults.with_target)?
            .add_source(Environment::with_prefix("HEADLIST_LOG").try_parsing(true))
            .build()?;

        let config: Self = cfg.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Проверяет, что уровень известен фильтру.
    pub fn validate(&self) -> Result<(), LoggingError> {
        let level = self.level.to_ascii_lowercase();
        if LEVELS.contains(&level.as_str()) {
            Ok(())
        } else {
            Err(LoggingError::InvalidLevel(self.level.clone()))
        }
    }

    /// Директива `EnvFilter`, ограничивающая события этим крейтом.
    pub fn build_filter_directive(&self) -> String {
        format!("headlist={}", self.level.to_ascii_lowercase())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            ansi: true,
            with_target: true,
        }
    }
}

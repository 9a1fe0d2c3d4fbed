use tracing_subscriber::EnvFilter;

use crate::{error::LoggingError, logging::config::LoggingConfig};

/// Собирает фильтр: `RUST_LOG`, если задан и корректен, иначе директива из
/// конфигурации.
pub fn build_filter_from_config(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(env_filter) => Ok(env_filter),
        Err(_) => Ok(EnvFilter::try_new(config.build_filter_directive())?),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serial_test::serial;
    use tracing_subscriber::{fmt, prelude::*, registry::Registry};

    use super::*;

    // Мини-буферный writer для тестов
    struct VecMakeWriter(Arc<Mutex<Vec<u8>>>);

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for VecMakeWriter {
        type Writer = VecWriterGuard;

        fn make_writer(&'a self) -> Self::Writer {
            VecWriterGuard(self.0.clone())
        }
    }

    struct VecWriterGuard(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for VecWriterGuard {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> std::io::Result<usize> {
            let mut locked = self.0.lock().unwrap();
            locked.extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Тест проверяет, что фильтр из конфигурации пропускает события крейта
    /// на заданном уровне и отбрасывает более подробные.
    #[test]
    #[serial]
    fn test_config_filter_applies_level() {
        std::env::remove_var("RUST_LOG");
        let cfg = LoggingConfig {
            level: "warn".into(),
            ..LoggingConfig::default()
        };
        let filter = build_filter_from_config(&cfg).unwrap();

        let buffer = Arc::new(Mutex::new(Vec::new()));
        let layer = fmt::layer()
            .with_writer(VecMakeWriter(buffer.clone()))
            .with_ansi(false)
            .with_filter(filter);
        let subscriber = Registry::default().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "headlist", "kept");
            tracing::info!(target: "headlist", "dropped");
        });

        let out = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(out.contains("kept"), "got: {out}");
        assert!(!out.contains("dropped"), "got: {out}");
    }

    /// Тест проверяет, что RUST_LOG имеет приоритет над конфигурацией.
    #[test]
    #[serial]
    fn test_rust_log_overrides_config() {
        std::env::set_var("RUST_LOG", "headlist=trace");
        let cfg = LoggingConfig {
            level: "error".into(),
            ..LoggingConfig::default()
        };
        let filter = build_filter_from_config(&cfg);
        std::env::remove_var("RUST_LOG");

        let filter = filter.unwrap();
        assert!(filter.to_string().contains("trace"), "got: {filter}");
    }
}

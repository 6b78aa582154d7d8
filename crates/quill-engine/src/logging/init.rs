use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` filter syntax (e.g. "info",
/// "quill_engine=trace,wgpu_core=warn"). Precedence: `env_filter`, then
/// `RUST_LOG`, then `info` with the wgpu/naga crates held at `warn`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    pub fn with_write_style(mut self, style: env_logger::WriteStyle) -> Self {
        self.write_style = style;
        self
    }

    fn builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();

        match (&self.env_filter, std::env::var("RUST_LOG")) {
            (Some(filter), _) => {
                builder.parse_filters(filter);
            }
            (None, Ok(filter)) => {
                builder.parse_filters(&filter);
            }
            (None, Err(_)) => {
                builder
                    .filter_level(LevelFilter::Info)
                    .filter_module("wgpu_core", LevelFilter::Warn)
                    .filter_module("wgpu_hal", LevelFilter::Warn)
                    .filter_module("naga", LevelFilter::Warn);
            }
        }

        builder.write_style(self.write_style);
        builder
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// Call early in `main`. A logger installed elsewhere first is left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        if config.builder().try_init().is_err() {
            return;
        }
        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_set_fields() {
        let cfg = LoggingConfig::default()
            .with_filter("quill_engine=trace")
            .with_write_style(env_logger::WriteStyle::Never);
        assert_eq!(cfg.env_filter.as_deref(), Some("quill_engine=trace"));
        assert!(matches!(cfg.write_style, env_logger::WriteStyle::Never));
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::default().with_filter("warn"));
        init_logging(LoggingConfig::default());
    }
}

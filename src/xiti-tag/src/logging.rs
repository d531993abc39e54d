use crate::config::Config;
use crate::constants::LOG_FILE_NAME;
use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    prelude::*,
    EnvFilter,
};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `log_level` from the configuration. When `log_dir`
/// is set, logs go to `xiti-tag.log` in that directory, otherwise to stderr.
pub fn setup_logging(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("invalid log level {:?}", config.log_level))?;

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match &config.log_dir {
        Some(dir) => {
            let file_appender = RollingFileAppender::new(Rotation::NEVER, dir, LOG_FILE_NAME);

            let file_layer = fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_timer(SystemTime)
                .with_writer(file_appender);

            tracing::subscriber::set_global_default(registry.with(file_layer))
        }
        None => {
            let stderr_layer = fmt::layer()
                .with_thread_names(true)
                .with_target(true)
                .with_timer(SystemTime)
                .with_writer(std::io::stderr);

            tracing::subscriber::set_global_default(registry.with(stderr_layer))
        }
    };
    installed.context("Failed to set tracing subscriber")?;

    tracing::debug!("Logging system initialized");

    Ok(())
}

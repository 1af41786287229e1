//! Logging system initialization
//!
//! Sets up tracing output according to the loaded configuration: stdout
//! or a log file, text or JSON formatting, level from config.

use crate::config::AppConfig;
use crate::errors::Result;

/// Initialize the logging system.
///
/// Returns the non-blocking writer guard, which must be kept alive for
/// the duration of the program so buffered log lines get flushed. Fails
/// if the configured log file cannot be opened.
///
/// # Panics
/// * If a global subscriber is already installed
pub fn init_logging(config: &AppConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let writer: Box<dyn std::io::Write + Send + Sync> = match config.logging.file.as_deref() {
        Some(log_file) if !log_file.is_empty() => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;
            Box::new(file)
        }
        _ => Box::new(std::io::stdout()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::new(config.logging.level.clone());

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(config.logging.file.as_ref().is_none_or(|f| f.is_empty()));

    if config.logging.format == "json" {
        subscriber_builder.json().init();
    } else {
        subscriber_builder.init();
    }

    Ok(guard)
}

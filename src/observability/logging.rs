//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global tracing subscriber
//! - Mirror console output to a log file when `log_dir` is set
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level
//! - File output is non-blocking and never ANSI-coloured
//! - `log_format` applies to console and file alike
//! - The returned guard must live as long as the process logs

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::{LogFormat, LogRotation, ObservabilityConfig};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter {0:?}: {1}")]
    Filter(String, #[source] tracing_subscriber::filter::ParseError),

    #[error("cannot open log file: {0}")]
    File(#[from] tracing_appender::rolling::InitError),

    #[error("subscriber already installed: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

fn rotation(policy: LogRotation) -> Rotation {
    match policy {
        LogRotation::Never => Rotation::NEVER,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
    }
}

fn env_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => {
            EnvFilter::try_new(level).map_err(|e| LoggingError::Filter(level.to_string(), e))
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Non-blocking file layer in the configured format, plus its flush guard.
fn file_output(
    config: &ObservabilityConfig,
    dir: &Path,
) -> Result<(BoxedLayer, WorkerGuard), LoggingError> {
    let appender = RollingFileAppender::builder()
        .rotation(rotation(config.log_rotation))
        .filename_prefix(config.log_file.as_str())
        .build(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = match config.log_format {
        LogFormat::Text => fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
            .boxed(),
    };
    Ok((layer, guard))
}

/// Install the global subscriber. Hold the returned guard until shutdown so
/// buffered file output is flushed.
pub fn init(config: &ObservabilityConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = env_filter(&config.log_level)?;

    let (text_layer, json_layer) = match config.log_format {
        LogFormat::Text => (Some(fmt::layer()), None),
        LogFormat::Json => (None, Some(fmt::layer().json())),
    };

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let (layer, guard) = file_output(config, Path::new(dir))?;
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .try_init()?;

    if let Some(dir) = &config.log_dir {
        tracing::info!(dir = %dir, file = %config.log_file, "File logging enabled");
    }

    Ok(guard)
}

use crate::config::LoggingConfig;
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{filter::ParseError, EnvFilter};

/// Set up logging into a file.
///
/// The terminal belongs to the presentation so nothing is logged unless a file is configured. The
/// returned guard flushes pending logs when dropped, so it must outlive the presentation.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let Some(path) = &config.path else {
        return Ok(None);
    };
    let file_name = path.file_name().ok_or_else(|| LoggingError::InvalidPath(path.clone()))?;
    let directory = path.parent().filter(|parent| !parent.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let directives = env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| config.level.clone());
    let filter = EnvFilter::try_new(directives)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;
    Ok(Some(guard))
}

/// An error setting up logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log file path: {0}")]
    InvalidPath(PathBuf),

    #[error("cannot open log file: {0}")]
    Open(#[from] InitError),

    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("cannot install logger: {0}")]
    Install(String),
}

use crate::error::ConfigError;
use crate::settings::{LogFormat, LoggingSettings};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "vantage.log";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. When a log directory is
/// configured the returned guard must be kept alive for the lifetime of the
/// program, otherwise buffered lines are lost on exit.
pub fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| {
            ConfigError::LoggingError(format!("invalid log level '{}': {e}", settings.level))
        })?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let (result, guard) = match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let builder = builder.with_writer(writer).with_ansi(false);
            let result = match settings.format {
                LogFormat::Full => builder.try_init(),
                LogFormat::Compact => builder.compact().try_init(),
                LogFormat::Pretty => builder.pretty().try_init(),
            };
            (result, Some(guard))
        }
        None => {
            let builder = builder.with_writer(std::io::stderr);
            let result = match settings.format {
                LogFormat::Full => builder.try_init(),
                LogFormat::Compact => builder.compact().try_init(),
                LogFormat::Pretty => builder.pretty().try_init(),
            };
            (result, None)
        }
    };

    result.map_err(|e| ConfigError::LoggingError(e.to_string()))?;
    Ok(guard)
}

use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `settings.level`. Console output goes to
/// stderr so that stdout stays clean for tables and JSON. When
/// `settings.directory` is set, a daily rolling log file is added; the returned
/// guard must be held until shutdown so buffered lines get flushed.
pub fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

    // Timestamps use the local offset, RFC 3339 formatted.
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(LocalTime::rfc_3339())
        .with_target(false);

    let (file, guard) = match &settings.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, &settings.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_timer(LocalTime::rfc_3339())
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test in this crate that installs the global subscriber.
    #[test]
    fn file_layer_writes_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LoggingSettings {
            level: "info".to_string(),
            directory: Some(dir.path().to_path_buf()),
            file_prefix: "telemetry-test.log".to_string(),
        };

        let guard = init_tracing(&settings).unwrap();
        assert!(guard.is_some());
        tracing::info!("written to the log file");
        drop(guard);

        let contents: String = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| std::fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect();
        let line = contents
            .lines()
            .find(|l| l.contains("written to the log file"))
            .unwrap();
        assert!(line.contains("INFO"));
        assert!(!line.contains('\u{1b}'), "file output must not carry ANSI codes");

        // A second subscriber cannot be installed over the first.
        assert!(init_tracing(&settings).is_err());
    }
}

//! Logging for the server and CLI.
//!
//! Console output follows the chosen level. Optionally the whole run is also
//! recorded at trace level in `reelpost-last-run.log`, so a post that went
//! wrong can be replayed step by step from the poster attempts.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const LOG_FILE_NAME: &str = "reelpost-last-run.log";

/// HTTP client internals stay quiet unless `RUST_LOG` asks for them.
const NOISY_TARGETS: &str = "hyper=warn,hyper_util=warn,reqwest=warn,h2=warn";

/// Console directive for `level` with dependency noise suppressed.
pub fn console_directive(level: Level) -> String {
    format!("{},{NOISY_TARGETS}", level.to_string().to_ascii_lowercase())
}

/// Installs the global subscriber.
///
/// `RUST_LOG` replaces the console directive when set. With `logs_dir`, a
/// second layer writes every event to `logs_dir/reelpost-last-run.log`,
/// truncated at startup; without it only the console is used.
///
/// # Errors
///
/// - `std::io::Error` - If the logs directory or log file cannot be created
pub fn init_tracing(console_level: Level, logs_dir: Option<&Path>) -> std::io::Result<()> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_directive(console_level)));
    let console = fmt::layer().compact().with_filter(console_filter);

    let (file, file_path) = match logs_dir {
        Some(dir) => {
            let (writer, path) = open_log_file(dir)?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_writer(writer)
                .with_filter(EnvFilter::new("trace"));
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();

    match file_path {
        Some(path) => tracing::info!(
            level = %console_level,
            log_file = %path.display(),
            "Logging ready"
        ),
        None => tracing::info!(level = %console_level, "Logging ready, console only"),
    }

    Ok(())
}

/// Creates `logs_dir` if needed and truncates the last-run log inside it.
///
/// # Errors
///
/// - `std::io::Error` - If the directory or file cannot be created
pub fn open_log_file(logs_dir: &Path) -> std::io::Result<(File, PathBuf)> {
    fs::create_dir_all(logs_dir)?;
    let path = logs_dir.join(LOG_FILE_NAME);
    let file = File::create(&path)?;
    Ok((file, path))
}

/// `--log-level` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    /// Everything, including each HTTP exchange with the providers
    Trace,
}

impl CliLogLevel {
    pub fn as_tracing_level(self) -> Level {
        Level::from(self)
    }
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_open_log_file_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("nested").join("logs");

        let (mut file, path) = open_log_file(&nested).unwrap();
        writeln!(file, "hello").unwrap();

        assert!(nested.is_dir());
        assert_eq!(path, nested.join("reelpost-last-run.log"));
    }

    #[test]
    fn test_open_log_file_truncates_previous_run() {
        let temp = tempfile::tempdir().unwrap();
        {
            let (mut file, _) = open_log_file(temp.path()).unwrap();
            writeln!(file, "previous run output").unwrap();
        }

        let (_, path) = open_log_file(temp.path()).unwrap();
        assert_eq!(fs::metadata(path).unwrap().len(), 0);
    }

    #[test]
    fn test_console_directive_quiets_http_internals() {
        assert_eq!(
            console_directive(CliLogLevel::Warn.as_tracing_level()),
            "warn,hyper=warn,hyper_util=warn,reqwest=warn,h2=warn"
        );
        assert_eq!(Level::from(CliLogLevel::Trace), Level::TRACE);
    }
}

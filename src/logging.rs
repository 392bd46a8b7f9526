//! Tracing setup.
//!
//! The terminal client owns the screen, so it only logs to a file, and only
//! when one is configured. The reference server logs to stderr.

use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Environment variable naming a log file for the terminal client.
pub const LOG_ENV: &str = "SALESDESK_LOG";

/// Where log output should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Disabled,
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    /// Target for the terminal client: CLI flag, then config, then `SALESDESK_LOG`.
    pub fn for_ui(cli_file: Option<&Path>, config: &LoggingConfig) -> Self {
        cli_file
            .map(Path::to_path_buf)
            .or_else(|| config.file.clone())
            .or_else(|| std::env::var_os(LOG_ENV).map(PathBuf::from))
            .map_or(LogTarget::Disabled, LogTarget::File)
    }

    /// Target for `serve`: a file when one is given, stderr otherwise.
    pub fn for_server(cli_file: Option<&Path>, config: &LoggingConfig) -> Self {
        cli_file
            .map(Path::to_path_buf)
            .or_else(|| config.file.clone())
            .map_or(LogTarget::Stderr, LogTarget::File)
    }
}

/// Append `.{timestamp}.{pid}` so concurrent instances never share a file.
pub fn unique_log_path(path: &Path) -> PathBuf {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{}.{}", timestamp, pid));
    PathBuf::from(name)
}

/// Install the global subscriber. `RUST_LOG` overrides `config.level`.
///
/// Returns the file actually written to, if any.
pub fn init_tracing(target: LogTarget, config: &LoggingConfig) -> Option<PathBuf> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match target {
        LogTarget::Disabled => None,
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init();
            None
        }
        LogTarget::File(path) => {
            let unique_path = unique_log_path(&path);
            let Ok(file) = std::fs::File::create(&unique_path) else {
                eprintln!("Warning: Failed to create log file: {}", unique_path.display());
                return None;
            };

            let layer = fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_level(true);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init();
            Some(unique_path)
        }
    }
}

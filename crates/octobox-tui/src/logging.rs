//! Tracing setup.
//!
//! The interactive UI owns the terminal, so its logs go to a file. Snapshot
//! mode logs to stderr.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    Off,
}

/// Pick where logs go for the chosen run mode.
#[must_use]
pub fn log_target(interactive: bool, log_file: Option<&Path>) -> LogTarget {
    match (interactive, log_file) {
        (false, _) => LogTarget::Stderr,
        (true, Some(path)) => LogTarget::File(path.to_path_buf()),
        (true, None) => LogTarget::Off,
    }
}

/// Install the global subscriber. The returned guard flushes the file
/// writer on drop and must live as long as the program.
pub fn init_logging(target: &LogTarget, level: &str) -> Option<WorkerGuard> {
    match target {
        LogTarget::Off => None,
        LogTarget::Stderr => {
            let _ = tracing_subscriber::registry()
                .with(env_filter(level))
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .try_init();
            None
        }
        LogTarget::File(path) => {
            let (writer, guard) = match create_file_writer(path) {
                Ok(pair) => pair,
                Err(err) => {
                    eprintln!("warning: logging disabled: {err}");
                    return None;
                }
            };
            let _ = tracing_subscriber::registry()
                .with(env_filter(level))
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init();
            Some(guard)
        }
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn create_file_writer(
    path: &Path,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard), String> {
    let file_name = path
        .file_name()
        .ok_or_else(|| format!("log path {} has no file name", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)
        .map_err(|err| format!("create log directory {}: {err}", dir.display()))?;
    let appender = tracing_appender::rolling::never(&dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

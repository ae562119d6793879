//! Tracing setup: console by default, or an append-only log file

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log records go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// stderr, so it never mixes with REPL output on stdout
    Console,
    File(PathBuf),
}

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "agentica=debug,info"
    } else {
        "agentica=info,warn"
    }
}

/// Default log file path
pub fn log_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("agentica").join("agentica.log")
    } else {
        PathBuf::from("agentica.log")
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(target: &LogTarget, verbose: bool) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into());

    match target {
        LogTarget::Console => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Open (or create) the log file and write a session start marker
fn open_log_file(path: &Path) -> anyhow::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(file, "\n=== Agentica Session Started at {} ===\n", timestamp)?;

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "agentica=info,warn");
        assert!(default_filter(true).contains("debug"));
    }

    #[test]
    fn test_log_path_file_name() {
        assert!(log_path().ends_with("agentica.log"));
    }

    #[test]
    fn test_open_log_file_writes_marker() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("agentica.log");

        drop(open_log_file(&path).unwrap());
        drop(open_log_file(&path).unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("Agentica Session Started").count(), 2);
    }
}

//! Tracing setup for the command-line client.
use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Installs the global subscriber.
///
/// Everything at the `RUST_LOG` level (INFO by default) goes to
/// `petcalc.log` in `log_dir`; warnings and errors are also echoed to stderr
/// so command output on stdout stays clean.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<()> {
    let log_dir = log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "petcalc.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(env_filter);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    // Keep the file writer alive for the life of the process.
    std::mem::forget(guard);

    Ok(())
}

fn default_log_dir() -> PathBuf {
    ProjectDirs::from("", "", "petcalc")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("petcalc").join("logs"))
}

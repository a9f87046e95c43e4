//! Tracing setup
//!
//! Logs go to a daily file under the data directory. The dashboard owns the
//! terminal, so only plain CLI commands also echo warnings to stderr. A log
//! directory that can't be created costs the file, never the command.

use std::path::PathBuf;

use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::Config;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Log file only
    FileOnly,
    /// Log file, plus warnings and errors on stderr
    FileAndStderr,
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &Config, target: LogTarget) {
    init_at(config, target, Config::log_dir());
}

fn init_at(config: &Config, target: LogTarget, log_dir: Result<PathBuf>) {
    let log_dir = ready_log_dir(log_dir);

    let file_layer = log_dir.as_ref().ok().map(|dir| {
        fmt::layer()
            .with_writer(rolling::daily(dir, "sprout.log"))
            .with_ansi(false)
    });

    let stderr_layer = (target == LogTarget::FileAndStderr).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
            .with_filter(LevelFilter::WARN)
    });

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sprout={}", config.log_level)));

    // A second init (tests, repeated calls) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    if let Err(reason) = log_dir {
        warn!(%reason, "log file disabled");
    }
}

/// Create the log directory, or say why there is none
fn ready_log_dir(log_dir: Result<PathBuf>) -> std::result::Result<PathBuf, String> {
    let dir = log_dir.map_err(|e| e.to_string())?;
    std::fs::create_dir_all(&dir).map_err(|e| format!("{}: {}", dir.display(), e))?;
    Ok(dir)
}

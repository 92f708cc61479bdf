//! Tracing setup for the command line tools.
//!
//! Console output is always enabled. When a log directory is configured a
//! rolling file is written as well, and files beyond `max_log_files` are pruned
//! on startup.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// How often the log file is rolled over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RotationPeriod {
    /// Start a new file every hour.
    Hourly,
    /// Start a new file every day (default).
    #[default]
    Daily,
    /// Keep writing to a single file.
    Never,
}

impl std::str::FromStr for RotationPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hourly" | "hour" => Ok(RotationPeriod::Hourly),
            "daily" | "day" => Ok(RotationPeriod::Daily),
            "never" | "none" => Ok(RotationPeriod::Never),
            _ => Err(format!(
                "Invalid rotation period '{s}'. Valid options: hourly, daily, never"
            )),
        }
    }
}

impl From<RotationPeriod> for Rotation {
    fn from(period: RotationPeriod) -> Self {
        match period {
            RotationPeriod::Hourly => Rotation::HOURLY,
            RotationPeriod::Daily => Rotation::DAILY,
            RotationPeriod::Never => Rotation::NEVER,
        }
    }
}

/// File logging settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Directory the log files are written to.
    pub log_dir: PathBuf,
    /// File name prefix, followed by the rotation date and `.log`.
    pub log_prefix: String,
    /// How often to roll over to a new file.
    pub rotation: RotationPeriod,
    /// Number of files kept on disk (0 keeps every file).
    pub max_log_files: usize,
}

impl LogConfig {
    /// Default settings writing into `log_dir`.
    pub fn in_dir(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            ..Self::default()
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("."),
            log_prefix: "zcl-quirks".to_string(),
            rotation: RotationPeriod::Daily,
            max_log_files: 7,
        }
    }
}

/// Flushes buffered file output when dropped; hold it for the life of the process.
pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

/// Installs the global subscriber. `RUST_LOG` controls the filter.
///
/// Without a config only the console layer is installed. With one, old files
/// are pruned first and a non-blocking rolling file layer is added.
///
/// Fails when the log directory cannot be read or the appender cannot be created.
pub fn init(config: Option<&LogConfig>) -> std::io::Result<LogGuard> {
    let console = Layer::default().with_target(true);

    let Some(config) = config else {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(console)
            .init();
        return Ok(LogGuard { _guard: None });
    };

    if config.max_log_files > 0 {
        prune_logs(&config.log_dir, &config.log_prefix, config.max_log_files)?;
    }

    let mut builder = RollingFileAppender::builder()
        .rotation(config.rotation.into())
        .filename_prefix(&config.log_prefix)
        .filename_suffix("log");
    if config.max_log_files > 0 {
        builder = builder.max_log_files(config.max_log_files);
    }
    let appender = builder
        .build(&config.log_dir)
        .map_err(std::io::Error::other)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file = Layer::default()
        .with_writer(writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(console)
        .with(file)
        .init();

    Ok(LogGuard {
        _guard: Some(guard),
    })
}

/// Deletes the oldest `<prefix>*.log` files so that at most `keep` remain.
///
/// A file that cannot be removed is reported and skipped.
fn prune_logs(log_dir: &Path, prefix: &str, keep: usize) -> std::io::Result<()> {
    if !log_dir.exists() {
        return Ok(());
    }

    let mut logs: Vec<_> = std::fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(prefix) && name.ends_with(".log"))
        })
        .filter_map(|entry| {
            let modified = entry.metadata().and_then(|m| m.modified()).ok()?;
            Some((entry.path(), modified))
        })
        .collect();

    logs.sort_by(|a, b| b.1.cmp(&a.1));

    for (path, _) in logs.into_iter().skip(keep) {
        if let Err(e) = std::fs::remove_file(&path) {
            eprintln!("Warning: failed to remove old log file {}: {e}", path.display());
        }
    }

    Ok(())
}

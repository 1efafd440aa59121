use std::env;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Logging setup, read from the environment by `LogConfig::from_env`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub default_filter: String,
    /// Daily-rolling log file; console only when `None`
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { default_filter: "info".to_string(), file: None }
    }
}

impl LogConfig {
    /// `RUST_LOG_FILE=logs/camera.log` enables file output next to stderr
    pub fn from_env() -> Self {
        Self {
            file: env::var_os("RUST_LOG_FILE").map(PathBuf::from),
            ..Self::default()
        }
    }
}

pub fn init() {
    init_with(&LogConfig::from_env());
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_with(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    // Console (stderr) layer with file/line
    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .compact();

    let file_layer = config.file.as_deref().map(|path| {
        let dir = path.parent().unwrap_or(Path::new("."));
        let name = path.file_name().unwrap_or(std::ffi::OsStr::new("camera.log"));
        let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));
        let _ = FILE_GUARD.set(guard);
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .compact()
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        install_panic_hook();
        tracing::debug!(file = ?config.file, "logging initialised");
    }
}

// Route panics through tracing so they also land in the log file
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("<non-string panic>");
        let location = info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_default();
        let bt = std::backtrace::Backtrace::force_capture();
        tracing::error!("panic at {location}: {payload}\nBacktrace:\n{bt}");
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_console_only() {
        let config = LogConfig::default();
        assert_eq!(config.default_filter, "info");
        assert!(config.file.is_none());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        // init installs a process-wide panic hook; put the harness's back
        let harness_hook = std::panic::take_hook();
        init_with(&LogConfig::default());
        init_with(&LogConfig::default());
        tracing::info!("still logging");
        std::panic::set_hook(harness_hook);
    }
}

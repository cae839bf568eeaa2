use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var holding the filter directives, e.g. `six_cities=debug`.
pub const LOG_ENV: &str = "SIX_CITIES_LOG";

/// Default log file under the user's cache directory.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("six-cities")
        .join("six-cities.log")
}

/// Initialize tracing into a file.
///
/// The terminal belongs to the TUI, so nothing is logged unless a log file
/// was requested or `SIX_CITIES_LOG` is set. Returns the file actually used.
pub fn init_tracing(log_file: Option<&Path>) -> Option<PathBuf> {
    let directives = std::env::var(LOG_ENV).ok();
    if log_file.is_none() && directives.is_none() {
        return None;
    }

    let path = log_file.map(Path::to_path_buf).unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Warning: Failed to create log directory {}: {}", parent.display(), e);
            return None;
        }
    }
    let file = match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: Failed to open log file {}: {}", path.display(), e);
            return None;
        }
    };

    let filter = directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        return None;
    }
    Some(path)
}

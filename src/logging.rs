//! Debug log: every tracing event becomes one timestamped line appended to
//! the log file.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::Subscriber;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

/// `[YYYY-MM-DD HH:MM:SS]` in local time.
struct LogTimestamp;

impl FormatTime for LogTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "[{}]", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Opens the file for each line, so concurrent hook processes only ever
/// append whole lines. Unopenable files swallow output.
fn append_writer(path: PathBuf) -> impl Fn() -> Box<dyn Write> + Send + Sync + 'static {
    move || match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => Box::new(file),
        Err(_) => Box::new(io::sink()),
    }
}

fn filter(level: &str, verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { level };
    EnvFilter::try_new(format!("{level},hyper=warn,hyper_util=warn,reqwest=warn"))
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,hyper_util=warn,reqwest=warn"))
}

/// Build the file-backed subscriber without installing it.
pub fn subscriber(path: &Path, level: &str, verbose: bool) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level, verbose))
        .with_timer(LogTimestamp)
        .with_target(false)
        .with_ansi(false)
        .with_writer(append_writer(path.to_path_buf()))
        .finish()
}

/// Create the log directory and install the global subscriber.
///
/// The subscriber is installed even when the directory cannot be created;
/// writes are then dropped.
pub fn init(path: &Path, level: &str, verbose: bool) -> io::Result<()> {
    let created = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    };
    // Only fails if a subscriber is already set.
    let _ = tracing::subscriber::set_global_default(subscriber(path, level, verbose));
    created
}

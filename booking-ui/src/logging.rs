//! Tracing setup for the booking client.
//!
//! The screens own the terminal, so records go to the configured log file.
//! The stderr layer is only installed when `logging.console` is set, for
//! runs with stderr redirected (`2>booking.log`).

use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::LoggingSection;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Level filter for the subscriber. A non-blank `RUST_LOG` wins over the
/// configured level.
pub fn level_filter(
    configured: &str,
    env: Option<&str>,
) -> Result<EnvFilter> {
    let directive = env
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(configured);
    EnvFilter::try_new(directive).with_context(|| format!("invalid log level '{directive}'"))
}

/// Installs the global subscriber. Call once, after configuration is loaded.
pub fn init(settings: &LoggingSection) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = level_filter(&settings.level, env.as_deref())?;

    let console = settings.console.then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
            .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
    });

    let file = match &settings.file {
        Some(path) => Some(
            fmt::layer()
                .with_writer(Mutex::new(open_log(path)?))
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_string())),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .context("installing log subscriber")
}

/// Opens `path` for appending. The directory must already exist.
fn open_log(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

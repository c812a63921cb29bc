use std::path::PathBuf;

use anyhow::Context;
use booking_core::PermissionStatus;
use booking_ui::{AppConfig, app, logging};
use clap::Parser;
use tracing::debug;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Thandra Self Drive booking client.
///
/// Walks through branch selection and the booking form, then posts the
/// request to the booking API.
#[derive(Debug, Parser)]
struct Cli {
    /// Config file (defaults to `thandra.toml` when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Booking API base URL, e.g. `http://localhost:5000`.
    #[arg(long)]
    api_url: Option<String>,

    /// Booking API backend.
    #[arg(long)]
    backend: Option<String>,

    /// Go straight to branch selection after the splash.
    #[arg(long)]
    no_onboarding: bool,

    /// Minimum splash time in milliseconds.
    #[arg(long)]
    splash_ms: Option<u64>,

    /// Address-book CSV used for emergency contacts.
    #[arg(long)]
    contacts: Option<PathBuf>,

    /// Answer given when contacts access is requested: granted, denied or prompt.
    #[arg(long)]
    contacts_permission: Option<PermissionStatus>,

    /// Run as a web build: no native contacts or notifications.
    #[arg(long)]
    web: bool,

    /// Log filter, e.g. `debug` or `booking_core=trace`.
    #[arg(long)]
    log_level: Option<String>,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Also log to stderr (redirect it, the screens use the terminal).
    #[arg(long)]
    log_stderr: bool,
}

impl Cli {
    fn apply(
        self,
        config: &mut AppConfig,
    ) {
        if let Some(url) = self.api_url {
            config.api.base_url = url;
        }
        if let Some(backend) = self.backend {
            config.api.backend = backend;
        }
        if self.no_onboarding {
            config.app.onboarding = false;
        }
        if let Some(ms) = self.splash_ms {
            config.app.splash_ms = ms;
        }
        if let Some(file) = self.contacts {
            config.contacts.file = file;
        }
        if let Some(permission) = self.contacts_permission {
            config.contacts.permission = permission;
        }
        if self.web {
            config.app.native = false;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(file) = self.log_file {
            config.logging.file = Some(file);
        }
        if self.log_stderr {
            config.logging.console = true;
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply(&mut config);

    logging::init(&config.logging).context("initialising logging")?;
    debug!(?config, "configuration loaded");

    app::run(config).await
}

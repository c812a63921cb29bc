//! Runtime configuration.
//!
//! Values are layered, later sources winning:
//! 1. built-in defaults
//! 2. a TOML file (`--config`, or `thandra.toml` in the working directory)
//! 3. the `THANDRA_API_URL` environment variable
//! 4. command-line flags (applied by the binary)
//!
//! ### Example
//!
//! ```toml
//! [api]
//! base_url = "https://bookings.thandra.example"
//! timeout_secs = 15
//!
//! [app]
//! splash_ms = 2500
//! onboarding = true
//! native = true
//!
//! [contacts]
//! file = "contacts.csv"
//! permission = "granted"
//!
//! [logging]
//! level = "info"
//! file = "thandra-booking.log"
//! console = false
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use booking_core::services::factory::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use booking_core::{ApiConfig, ControllerSettings, PermissionStatus};
use booking_core::controller::DEFAULT_SPLASH_DURATION;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "thandra.toml";
pub const API_URL_ENV: &str = "THANDRA_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiSection {
    pub backend: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppSection {
    /// Minimum splash display, in milliseconds.
    pub splash_ms: u64,
    pub onboarding: bool,
    /// Pretend to run on a device with native contacts and notifications.
    pub native: bool,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            splash_ms: DEFAULT_SPLASH_DURATION.as_millis() as u64,
            onboarding: true,
            native: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactsSection {
    /// Address-book export read by the contacts provider.
    pub file: PathBuf,
    /// Answer given the first time contacts access is requested.
    pub permission: PermissionStatus,
}

impl Default for ContactsSection {
    fn default() -> Self {
        Self {
            file: PathBuf::from("contacts.csv"),
            permission: PermissionStatus::Granted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// Bare level or any `EnvFilter` directive.
    pub level: String,
    pub file: Option<PathBuf>,
    /// Also write records to stderr. Off by default, since the screens
    /// draw on the same terminal.
    pub console: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            console: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub api: ApiSection,
    pub app: AppSection,
    pub contacts: ContactsSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    pub fn from_toml(
        text: &str,
        origin: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads `path` if given, else `thandra.toml` when it exists, else defaults.
    /// Environment overrides are applied afterwards.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::read(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Applies environment overrides using `lookup` to read variables.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            backend: self.api.backend.clone(),
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
        }
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            splash_duration: Duration::from_millis(self.app.splash_ms),
            onboarding: self.app.onboarding,
        }
    }
}

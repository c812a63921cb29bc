use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;

use super::booking_api::{BookingApi, BookingError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const BOOK_PATH: &str = "/api/book";

/// Backend-agnostic booking endpoint configuration.
///
/// `backend` must match the [`BookingApiFactory::backend_name`] of a
/// registered factory. `base_url` is the scheme and host the booking
/// path is appended to.
///
/// | backend | base_url examples                                   |
/// |---------|-----------------------------------------------------|
/// | `http`  | `http://localhost:5000`, `https://api.example.com/` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"http"`).
    pub backend: String,
    pub base_url: String,
    /// Upper bound for one booking request, connect to last byte.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Full URL of the booking endpoint. A trailing `/` on the base is ignored.
    pub fn book_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), BOOK_PATH)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// One implementation per transport. Each backend crate exports a single
/// unit struct that implements this trait and is registered with a
/// [`BookingApiRegistry`] at startup.
#[async_trait]
pub trait BookingApiFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Build a ready-to-use client for `config`.
    async fn create(&self, config: &ApiConfig) -> Result<Box<dyn BookingApi>, BookingError>;
}

/// Registry of [`BookingApiFactory`] instances, keyed by backend name.
///
/// Typical lifetime:
/// 1. Create with `BookingApiRegistry::new()`.
/// 2. Call `register` once per known backend.
/// 3. Call `create` when the controller is assembled.
pub struct BookingApiRegistry {
    factories: HashMap<&'static str, Box<dyn BookingApiFactory>>,
}

impl BookingApiRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory.
    ///
    /// If a factory with the same [`BookingApiFactory::backend_name`] is
    /// already present it is silently replaced.
    pub fn register(&mut self, factory: Box<dyn BookingApiFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`BookingError::Configuration`] when no factory is registered for
    ///   the requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(&self, config: &ApiConfig) -> Result<Box<dyn BookingApi>, BookingError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                BookingError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for BookingApiRegistry {
    fn default() -> Self {
        Self::new()
    }
}

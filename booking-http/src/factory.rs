use async_trait::async_trait;
use booking_core::{ApiConfig, BookingApi, BookingApiFactory, BookingError};

use crate::HttpBookingApi;

/// [`BookingApiFactory`] for the HTTP endpoint.
///
/// Register this with a [`booking_core::BookingApiRegistry`] to make the
/// `"http"` backend available:
///
/// ```rust,no_run
/// use booking_core::BookingApiRegistry;
/// use booking_http::HttpBookingApiFactory;
///
/// let mut registry = BookingApiRegistry::new();
/// registry.register(Box::new(HttpBookingApiFactory));
/// ```
pub struct HttpBookingApiFactory;

#[async_trait]
impl BookingApiFactory for HttpBookingApiFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    /// Builds a client posting to `{config.base_url}/api/book`.
    ///
    /// Only `http://` and `https://` base URLs are accepted.
    async fn create(&self, config: &ApiConfig) -> Result<Box<dyn BookingApi>, BookingError> {
        let base = config.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(BookingError::Configuration(format!(
                "base URL '{}' must start with http:// or https://",
                config.base_url
            )));
        }
        Ok(Box::new(HttpBookingApi::new(config)?))
    }
}

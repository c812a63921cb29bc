use async_trait::async_trait;
use thiserror::Error;

use crate::models::BookingPayload;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// The endpoint answered with a non-success status.
    #[error("Booking rejected with HTTP status {status}")]
    Rejected { status: u16 },

    /// The request never produced a response (DNS, refused, timeout, ...).
    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// The remote booking endpoint.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Sends one booking. `Ok` means the endpoint accepted it.
    async fn submit(&self, payload: &BookingPayload) -> Result<(), BookingError>;
}

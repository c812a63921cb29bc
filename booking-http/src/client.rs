use async_trait::async_trait;
use booking_core::{ApiConfig, BookingApi, BookingError, BookingPayload};
use tracing::{debug, info};

/// Booking endpoint reached over HTTP with a JSON body.
pub struct HttpBookingApi {
    client: reqwest::Client,
    book_url: String,
}

impl HttpBookingApi {
    pub fn new(config: &ApiConfig) -> Result<Self, BookingError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BookingError::Configuration(format!("cannot build HTTP client: {e}")))?;
        Ok(Self::with_client(client, config))
    }

    fn with_client(client: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            client,
            book_url: config.book_url(),
        }
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn submit(&self, payload: &BookingPayload) -> Result<(), BookingError> {
        debug!(
            url = %self.book_url,
            branch = %payload.branch_id,
            contacts = payload.contacts.len(),
            "posting booking"
        );

        let response = self
            .client
            .post(&self.book_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| BookingError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), "booking accepted");
            Ok(())
        } else {
            Err(BookingError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

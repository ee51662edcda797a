use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, instrument};
use crate::domain::{BookingConfirmation, BookingRequest, Product};
use super::{BookingGateway, GatewayError};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/BookingService/api";

const CATALOG_PATH: &str = "accommodations";
const BOOKING_PATH: &str = "booking";

/// [`BookingGateway`] over HTTP. Both operations are JSON POSTs and only a
/// `200 OK` counts as success.
#[derive(Debug, Clone)]
pub struct HttpBookingGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBookingGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(url = %url, "Sending request");

        let request = self.client.post(&url);
        let request = match body {
            Some(body) => request.json(body),
            None => request.header(CONTENT_TYPE, "application/json"),
        };

        let response = request.send().await.map_err(|e| {
            error!(error = %e, "Request failed");
            GatewayError::Transport(e.to_string())
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if status != StatusCode::OK {
            error!(status = status.as_u16(), "Booking service rejected request");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BookingGateway for HttpBookingGateway {
    #[instrument(skip(self))]
    async fn fetch_catalog(&self) -> Result<Vec<Product>, GatewayError> {
        self.post_json::<(), _>(CATALOG_PATH, None).await
    }

    #[instrument(skip(self, request), fields(items = request.products.len()))]
    async fn submit_booking(&self, request: &BookingRequest) -> Result<BookingConfirmation, GatewayError> {
        self.post_json(BOOKING_PATH, Some(request)).await
    }
}

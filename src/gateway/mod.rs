//! The remote booking service, seen from the storefront.

mod error;
mod http;

pub use error::*;
pub use http::*;

use async_trait::async_trait;
use crate::domain::{BookingConfirmation, BookingRequest, Product};

/// The two operations the storefront needs from the booking service.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Lists every bookable accommodation.
    async fn fetch_catalog(&self) -> Result<Vec<Product>, GatewayError>;

    /// Places a booking and returns the service's confirmation as-is.
    async fn submit_booking(&self, request: &BookingRequest) -> Result<BookingConfirmation, GatewayError>;
}

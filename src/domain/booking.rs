use serde::{Deserialize, Serialize};
use super::customer::Customer;

/// A line of the booking request: the booked product or one of its services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingItem {
    pub name: String,
    pub code: String,
}

impl BookingItem {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// Body posted to the booking endpoint. The booked product is always the
/// first entry of `products`, followed by the selected services in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub products: Vec<BookingItem>,
    pub customer: Customer,
}

/// Whatever the booking service answered with. Never inspected, only shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingConfirmation(pub serde_json::Value);

impl BookingConfirmation {
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

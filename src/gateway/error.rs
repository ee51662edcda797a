use thiserror::Error;

/// Errors talking to the booking service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    #[error("Could not reach booking service: {0}")]
    Transport(String),
    #[error("Booking service answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response from booking service: {0}")]
    Decode(String),
}

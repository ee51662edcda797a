use clap::Parser;
use std::num::NonZeroUsize;
use std::time::Duration;
use crate::gateway::DEFAULT_API_URL;

/// Terminal storefront for booking accommodations.
#[derive(Debug, Clone, Parser)]
#[command(name = "booking-wizard", version, about)]
pub struct Config {
    /// Base URL of the booking service API
    #[arg(long, env = "BOOKING_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds for calls to the booking service
    #[arg(long, env = "BOOKING_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Mailbox size of each wizard actor
    #[arg(long, default_value = "32")]
    pub channel_capacity: NonZeroUsize,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

//! Terminal storefront for bookable accommodations.
//!
//! Each opened product runs its own booking wizard actor; the shell talks to
//! it through a [`clients::WizardClient`] and the actor talks to the booking
//! service through a [`gateway::BookingGateway`].

mod app_system;
mod clients;
mod config;
mod domain;
mod gateway;
mod messages;
mod shell;
mod validation;
mod wizard;
mod wizard_actor;

#[cfg(test)]
mod mock_framework;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, Instrument};
use crate::app_system::{setup_tracing, Storefront};
use crate::config::Config;
use crate::gateway::HttpBookingGateway;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Setup tracing once for the entire application
    setup_tracing();

    info!(api_url = %config.api_url, "Starting storefront");

    let gateway = HttpBookingGateway::new(config.api_url.clone(), config.timeout())
        .context("Failed to build booking service client")?;
    let storefront = Storefront::new(Arc::new(gateway), config.channel_capacity);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let span = tracing::info_span!("storefront_session");
    shell::run(&storefront, &mut lines).instrument(span).await?;

    info!("Storefront closed");
    Ok(())
}

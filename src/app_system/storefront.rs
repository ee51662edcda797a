use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};
use crate::clients::WizardClient;
use crate::domain::Product;
use crate::gateway::{BookingGateway, GatewayError};
use crate::wizard::WizardError;
use crate::wizard_actor::WizardService;

/// The storefront system: loads the catalog and starts a wizard actor for
/// each product the shopper opens.
pub struct Storefront {
    gateway: Arc<dyn BookingGateway>,
    channel_capacity: NonZeroUsize,
}

impl Storefront {
    pub fn new(gateway: Arc<dyn BookingGateway>, channel_capacity: NonZeroUsize) -> Self {
        Self {
            gateway,
            channel_capacity,
        }
    }

    #[instrument(skip(self))]
    pub async fn load_catalog(&self) -> Result<Vec<Product>, GatewayError> {
        let catalog = self.gateway.fetch_catalog().await?;
        info!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Spawns a fresh wizard for `product`. Nothing is shared between
    /// sessions; closing one discards its state.
    #[instrument(fields(product_code = %product.code), skip(self, product))]
    pub fn open_wizard(&self, product: Product) -> WizardSession {
        info!("Opening booking wizard");
        let (service, client) = WizardService::new(self.channel_capacity.get(), product, Arc::clone(&self.gateway));
        let handle = tokio::spawn(service.run());
        WizardSession { client, handle }
    }
}

/// An open wizard: the client to drive it and the task running it.
pub struct WizardSession {
    pub client: WizardClient,
    handle: JoinHandle<()>,
}

impl WizardSession {
    /// Closes the wizard and waits for its actor to stop.
    ///
    /// A submission still in flight is not cancelled, but its outcome is
    /// never applied to this wizard.
    pub async fn close(self) -> Result<(), WizardError> {
        info!("Closing booking wizard");
        match self.client.close().await {
            Ok(()) | Err(WizardError::Closed) => {}
            Err(e) => return Err(e),
        }
        drop(self.client);

        self.handle.await.map_err(|e| {
            error!("Wizard task failed: {:?}", e);
            WizardError::TaskFailed(e.to_string())
        })
    }
}

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};
use crate::domain::{BookingConfirmation, CustomerField, ServiceId};
use crate::messages::{WizardRequest, WizardView};
use crate::wizard::{Stage, WizardError};

/// Handle to a running wizard actor. Cheap to clone; every method is one
/// message round trip.
#[derive(Clone)]
pub struct WizardClient {
    sender: mpsc::Sender<WizardRequest>,
}

impl WizardClient {
    pub fn new(sender: mpsc::Sender<WizardRequest>) -> Self {
        Self { sender }
    }

    /// Customer input is not recorded in the span.
    #[instrument(skip(self, value))]
    pub async fn update_customer_field(&self, field: CustomerField, value: String) -> Result<(), WizardError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(WizardRequest::UpdateCustomerField { field, value, respond_to })
            .await
            .map_err(|_| WizardError::Closed)?;

        response.await.map_err(|_| WizardError::Closed)?
    }
}

client_method!(WizardClient => fn advance() -> Stage as WizardRequest::Advance, Error = WizardError);
client_method!(WizardClient => fn retreat() -> Stage as WizardRequest::Retreat, Error = WizardError);
client_method!(WizardClient => fn toggle_service(service_id: ServiceId) -> bool as WizardRequest::ToggleService, Error = WizardError);
client_method!(WizardClient => fn blur_field(field: CustomerField) -> Option<String> as WizardRequest::BlurField, Error = WizardError);
client_method!(WizardClient => fn view() -> WizardView as WizardRequest::View, Error = WizardError);
client_method!(WizardClient => fn submit_booking() -> BookingConfirmation as WizardRequest::SubmitBooking, Error = WizardError);
client_method!(WizardClient => fn close() -> () as WizardRequest::Close, Error = WizardError);

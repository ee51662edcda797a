use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn, Instrument};
use crate::clients::WizardClient;
use crate::domain::{BookingConfirmation, CustomerField, Product, ServiceId};
use crate::gateway::{BookingGateway, GatewayError};
use crate::messages::{WizardRequest, WizardResponse, WizardView};
use crate::wizard::{Stage, WizardError, WizardState};

/// Actor owning one open booking wizard.
///
/// The state is only ever touched from [`WizardService::run`], so requests
/// are applied one at a time in arrival order. The booking submission is the
/// one piece of work that leaves the actor: it runs in a spawned task and
/// comes back as [`WizardRequest::SubmissionSettled`].
pub struct WizardService {
    receiver: mpsc::Receiver<WizardRequest>,
    mailbox: mpsc::WeakSender<WizardRequest>,
    gateway: Arc<dyn BookingGateway>,
    state: WizardState,
    submitting: bool,
}

impl WizardService {
    pub fn new(buffer_size: usize, product: Product, gateway: Arc<dyn BookingGateway>) -> (Self, WizardClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            mailbox: sender.downgrade(),
            gateway,
            state: WizardState::open(product),
            submitting: false,
        };
        (service, WizardClient::new(sender))
    }

    #[instrument(name = "wizard_service", skip(self), fields(product_code = %self.state.product().code))]
    pub async fn run(mut self) {
        info!("WizardService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                WizardRequest::Advance { respond_to } => self.handle_advance(respond_to),
                WizardRequest::Retreat { respond_to } => self.handle_retreat(respond_to),
                WizardRequest::ToggleService { service_id, respond_to } => {
                    self.handle_toggle_service(service_id, respond_to);
                }
                WizardRequest::UpdateCustomerField { field, value, respond_to } => {
                    self.handle_update_customer_field(field, value, respond_to);
                }
                WizardRequest::BlurField { field, respond_to } => {
                    self.handle_blur_field(field, respond_to);
                }
                WizardRequest::View { respond_to } => {
                    let _ = respond_to.send(Ok(self.view()));
                }
                WizardRequest::SubmitBooking { respond_to } => {
                    self.handle_submit_booking(respond_to);
                }
                WizardRequest::SubmissionSettled { outcome, respond_to } => {
                    self.handle_submission_settled(outcome, respond_to);
                }
                WizardRequest::Close { respond_to } => {
                    if self.submitting {
                        warn!("Closing wizard with a submission in flight; its outcome will be ignored");
                    }
                    info!("WizardService closing");
                    let _ = respond_to.send(Ok(()));
                    break;
                }
            }
        }

        info!("WizardService stopped");
    }

    fn ensure_idle(&self) -> Result<(), WizardError> {
        if self.submitting {
            Err(WizardError::SubmissionInFlight)
        } else {
            Ok(())
        }
    }

    #[instrument(fields(stage = ?self.state.stage()), skip(self, respond_to))]
    fn handle_advance(&mut self, respond_to: WizardResponse<Stage>) {
        debug!("Processing advance request");
        let result = self.ensure_idle().and_then(|_| self.state.advance());
        match &result {
            Ok(stage) => info!(stage = ?stage, "Advanced"),
            Err(WizardError::InvalidCustomer(errors)) => {
                info!(invalid_fields = errors.len(), "Customer form incomplete; staying on stage")
            }
            Err(e) => debug!(error = %e, "Advance rejected"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(stage = ?self.state.stage()), skip(self, respond_to))]
    fn handle_retreat(&mut self, respond_to: WizardResponse<Stage>) {
        debug!("Processing retreat request");
        let result = self.ensure_idle().map(|_| self.state.retreat());
        let _ = respond_to.send(result);
    }

    #[instrument(fields(service_id = %service_id), skip(self, respond_to))]
    fn handle_toggle_service(&mut self, service_id: ServiceId, respond_to: WizardResponse<bool>) {
        debug!("Processing toggle_service request");
        let result = self
            .ensure_idle()
            .and_then(|_| self.state.toggle_service(&service_id));
        if let Ok(selected) = &result {
            debug!(selected = *selected, total = self.state.selected().total_price(), "Selection changed");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(field = %field), skip(self, value, respond_to))]
    fn handle_update_customer_field(&mut self, field: CustomerField, value: String, respond_to: WizardResponse<()>) {
        debug!("Processing update_customer_field request");
        let result = self
            .ensure_idle()
            .and_then(|_| self.state.update_customer_field(field, value));
        let _ = respond_to.send(result);
    }

    #[instrument(fields(field = %field), skip(self, respond_to))]
    fn handle_blur_field(&mut self, field: CustomerField, respond_to: WizardResponse<Option<String>>) {
        debug!("Processing blur_field request");
        let result = self.ensure_idle().and_then(|_| self.state.blur_field(field));
        let _ = respond_to.send(result);
    }

    fn view(&self) -> WizardView {
        WizardView {
            stage: self.state.stage(),
            product: self.state.product().clone(),
            selected: self.state.selected().to_vec(),
            customer: self.state.customer().clone(),
            field_errors: self.state.field_errors().clone(),
            summary: self.state.summary(),
            submitting: self.submitting,
        }
    }

    /// **Background handler** - the spawned task owns `respond_to` and hands
    /// it back to the actor together with the outcome. If the wizard was
    /// closed in the meantime the message cannot be delivered, the outcome is
    /// dropped and the caller sees [`WizardError::Closed`].
    #[instrument(skip(self, respond_to))]
    fn handle_submit_booking(&mut self, respond_to: WizardResponse<BookingConfirmation>) {
        debug!("Processing submit_booking request");
        let request = match self.ensure_idle().and_then(|_| self.state.booking_request()) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Submission rejected");
                let _ = respond_to.send(Err(e));
                return;
            }
        };

        self.submitting = true;
        info!(items = request.products.len(), total = self.state.summary().total_price, "Submitting booking");

        let gateway = Arc::clone(&self.gateway);
        let mailbox = self.mailbox.clone();
        tokio::spawn(
            async move {
                let outcome = gateway.submit_booking(&request).await;
                let Some(sender) = mailbox.upgrade() else {
                    debug!("Wizard gone before submission settled; discarding outcome");
                    return;
                };
                if sender
                    .send(WizardRequest::SubmissionSettled { outcome, respond_to })
                    .await
                    .is_err()
                {
                    debug!("Wizard closed before submission settled; discarding outcome");
                }
            }
            .in_current_span(),
        );
    }

    #[instrument(skip(self, outcome, respond_to))]
    fn handle_submission_settled(
        &mut self,
        outcome: Result<BookingConfirmation, GatewayError>,
        respond_to: WizardResponse<BookingConfirmation>,
    ) {
        self.submitting = false;
        let result = match outcome {
            Ok(confirmation) => {
                info!("Booking confirmed");
                Ok(confirmation)
            }
            Err(e) => {
                error!(error = %e, "Booking submission failed; wizard stays on summary");
                Err(WizardError::Submission(e))
            }
        };
        let _ = respond_to.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Service;
    use crate::mock_framework::MockGateway;

    fn product() -> Product {
        Product::new("P1", "P1 name", 100.0).with_service(Service::new(1, "S1", "S1 name", 20.0))
    }

    #[tokio::test]
    async fn test_wizard_service_applies_transitions() -> Result<(), Box<dyn std::error::Error>> {
        let (service, client) = WizardService::new(10, product(), Arc::new(MockGateway::new()));
        let handle = tokio::spawn(service.run());

        assert_eq!(client.retreat().await?, Stage::ProductDetails);
        assert_eq!(client.advance().await?, Stage::ServiceSelection);
        assert!(client.toggle_service(ServiceId::from(1)).await?);

        let view = client.view().await?;
        assert_eq!(view.stage, Stage::ServiceSelection);
        assert_eq!(view.summary.total_price, 120.0);
        assert!(!view.submitting);

        client.close().await?;
        handle.await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_requests_after_close_report_closed() {
        let (service, client) = WizardService::new(10, product(), Arc::new(MockGateway::new()));
        let handle = tokio::spawn(service.run());

        client.close().await.unwrap();
        handle.await.unwrap();

        assert_eq!(client.advance().await, Err(WizardError::Closed));
    }

    #[tokio::test]
    async fn test_actor_stops_when_last_client_dropped() {
        let (service, client) = WizardService::new(10, product(), Arc::new(MockGateway::new()));
        let handle = tokio::spawn(service.run());

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_submit_outside_summary_is_rejected_without_calling_gateway() {
        let gateway = Arc::new(MockGateway::new());
        let (service, client) = WizardService::new(10, product(), gateway.clone());
        tokio::spawn(service.run());

        let err = client.submit_booking().await.unwrap_err();
        assert_eq!(
            err,
            WizardError::NotAvailable { operation: "submit_booking", stage: Stage::ProductDetails }
        );
        assert!(gateway.requests().is_empty());
    }
}

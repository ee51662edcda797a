//! # Mock Framework
//!
//! Utilities for testing the storefront without a running wizard actor or a
//! real booking service.
//!
//! Use [`create_mock_client`] to get a [`WizardClient`] and the receiver its
//! requests land on, then answer them with helpers like [`expect_advance`].
//! [`MockGateway`] stands in for the booking service.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use serde_json::json;
use tokio::sync::{mpsc, oneshot};
use crate::clients::WizardClient;
use crate::domain::{BookingConfirmation, BookingRequest, Product, ServiceId};
use crate::gateway::{BookingGateway, GatewayError};
use crate::messages::{WizardRequest, WizardResponse};
use crate::wizard::Stage;

/// Creates a client whose requests go to a receiver the test controls.
pub fn create_mock_client(buffer_size: usize) -> (WizardClient, mpsc::Receiver<WizardRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (WizardClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Advance request
pub async fn expect_advance(receiver: &mut mpsc::Receiver<WizardRequest>) -> Option<WizardResponse<Stage>> {
    match receiver.recv().await {
        Some(WizardRequest::Advance { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a ToggleService request
pub async fn expect_toggle(receiver: &mut mpsc::Receiver<WizardRequest>) -> Option<(ServiceId, WizardResponse<bool>)> {
    match receiver.recv().await {
        Some(WizardRequest::ToggleService { service_id, respond_to }) => Some((service_id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a SubmitBooking request
pub async fn expect_submit(
    receiver: &mut mpsc::Receiver<WizardRequest>,
) -> Option<WizardResponse<BookingConfirmation>> {
    match receiver.recv().await {
        Some(WizardRequest::SubmitBooking { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Scripted stand-in for the booking service.
///
/// Submissions pop outcomes from a queue (a generic confirmation once it is
/// empty) and are recorded for later assertions. A gated mock holds the first
/// submission until the returned sender fires, which keeps it "in flight".
#[derive(Default)]
pub struct MockGateway {
    catalog: Vec<Product>,
    outcomes: Mutex<VecDeque<Result<BookingConfirmation, GatewayError>>>,
    requests: Mutex<Vec<BookingRequest>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: Vec<Product>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_outcome(self, outcome: Result<BookingConfirmation, GatewayError>) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    pub fn gated(self) -> (Self, oneshot::Sender<()>) {
        let (release, gate) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(gate);
        (self, release)
    }

    pub fn requests(&self) -> Vec<BookingRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingGateway for MockGateway {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, GatewayError> {
        Ok(self.catalog.clone())
    }

    async fn submit_booking(&self, request: &BookingRequest) -> Result<BookingConfirmation, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(BookingConfirmation(json!({"status": "CONFIRMED"}))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardError;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let toggle_task = tokio::spawn(async move { client.toggle_service(ServiceId::from(3)).await });

        let (service_id, responder) = expect_toggle(&mut receiver).await.expect("Expected ToggleService request");
        assert_eq!(service_id, ServiceId::from(3));
        responder.send(Ok(true)).unwrap();

        let result = toggle_task.await.unwrap();
        assert_eq!(result, Ok(true));
    }

    #[tokio::test]
    async fn test_dropped_responder_reads_as_closed() {
        let (client, mut receiver) = create_mock_client(10);

        let advance_task = tokio::spawn(async move { client.advance().await });

        let responder = expect_advance(&mut receiver).await.expect("Expected Advance request");
        drop(responder);

        assert_eq!(advance_task.await.unwrap(), Err(WizardError::Closed));
    }

    #[tokio::test]
    async fn test_submission_error_reaches_caller_unchanged() {
        let (client, mut receiver) = create_mock_client(10);

        let submit_task = tokio::spawn(async move { client.submit_booking().await });

        let responder = expect_submit(&mut receiver).await.expect("Expected SubmitBooking request");
        let failure = GatewayError::Transport("connection refused".to_string());
        responder.send(Err(WizardError::Submission(failure.clone()))).unwrap();

        assert_eq!(submit_task.await.unwrap(), Err(WizardError::Submission(failure)));
    }

    #[tokio::test]
    async fn test_mock_gateway_replays_outcomes_in_order() {
        let failure = GatewayError::Status { status: 503, body: String::new() };
        let gateway = MockGateway::new().with_outcome(Err(failure.clone()));
        let request = BookingRequest {
            products: Vec::new(),
            customer: Default::default(),
        };

        assert_eq!(gateway.submit_booking(&request).await, Err(failure));
        assert!(gateway.submit_booking(&request).await.is_ok());
        assert_eq!(gateway.requests().len(), 2);
    }
}

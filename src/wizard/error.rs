use thiserror::Error;
use crate::domain::ServiceId;
use crate::gateway::GatewayError;
use crate::validation::FieldErrors;
use super::Stage;

/// Errors that can occur while driving the booking wizard.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WizardError {
    #[error("'{operation}' is not available at stage {stage}")]
    NotAvailable { operation: &'static str, stage: Stage },
    #[error("Customer details are invalid: {}", describe_errors(.0))]
    InvalidCustomer(FieldErrors),
    #[error("Unknown service: {0}")]
    UnknownService(ServiceId),
    #[error("A booking submission is already in progress")]
    SubmissionInFlight,
    #[error("Booking submission failed: {0}")]
    Submission(#[from] GatewayError),
    #[error("Wizard is closed")]
    Closed,
    #[error("Wizard task failed: {0}")]
    TaskFailed(String),
}

fn describe_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

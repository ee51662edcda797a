use tokio::sync::oneshot;
use crate::domain::{BookingConfirmation, Customer, CustomerField, Product, Service, ServiceId};
use crate::gateway::GatewayError;
use crate::validation::FieldErrors;
use crate::wizard::{BookingSummary, Stage, WizardError};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;
pub type WizardResponse<T> = ServiceResponse<T, WizardError>;

/// Snapshot of an open wizard, everything needed to render it.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardView {
    pub stage: Stage,
    pub product: Product,
    pub selected: Vec<Service>,
    pub customer: Customer,
    pub field_errors: FieldErrors,
    pub summary: BookingSummary,
    /// True while a booking submission is waiting on the booking service.
    pub submitting: bool,
}

/// Messages understood by the wizard actor. Each variant carries its
/// parameters and a oneshot channel for the reply.
#[derive(Debug)]
pub enum WizardRequest {
    Advance {
        respond_to: WizardResponse<Stage>,
    },
    Retreat {
        respond_to: WizardResponse<Stage>,
    },
    ToggleService {
        service_id: ServiceId,
        respond_to: WizardResponse<bool>,
    },
    UpdateCustomerField {
        field: CustomerField,
        value: String,
        respond_to: WizardResponse<()>,
    },
    BlurField {
        field: CustomerField,
        respond_to: WizardResponse<Option<String>>,
    },
    View {
        respond_to: WizardResponse<WizardView>,
    },
    SubmitBooking {
        respond_to: WizardResponse<BookingConfirmation>,
    },
    /// Sent by the background submission task back to its own wizard.
    SubmissionSettled {
        outcome: Result<BookingConfirmation, GatewayError>,
        respond_to: WizardResponse<BookingConfirmation>,
    },
    Close {
        respond_to: WizardResponse<()>,
    },
}

use crate::domain::{BookingItem, BookingRequest, Customer, CustomerField, Product, Service, ServiceId};
use crate::validation::{validate_field, validate_form, FieldErrors};
use super::{SelectedServices, Stage, WizardError};

/// Read-only price breakdown shown in the selection and summary stages.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSummary {
    pub product_name: String,
    pub base_price: f64,
    pub services: Vec<Service>,
    pub total_extra_service_price: f64,
    pub total_price: f64,
    /// Present once a first name has been entered.
    pub customer: Option<Customer>,
}

/// State of one open booking wizard.
///
/// Created when a product is opened and dropped when the wizard closes.
/// All mutation goes through the transition methods below; each one checks
/// the stage it is allowed in and leaves the state untouched otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    product: Product,
    stage: Stage,
    selected: SelectedServices,
    customer: Customer,
    field_errors: FieldErrors,
}

impl WizardState {
    pub fn open(product: Product) -> Self {
        Self {
            product,
            stage: Stage::ProductDetails,
            selected: SelectedServices::new(),
            customer: Customer::default(),
            field_errors: FieldErrors::new(),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn selected(&self) -> &SelectedServices {
        &self.selected
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Moves one stage forward. Leaving the customer stage requires a valid
    /// form; on failure the errors are recorded and the stage stays put.
    pub fn advance(&mut self) -> Result<Stage, WizardError> {
        let next = self.stage.next().ok_or(WizardError::NotAvailable {
            operation: "advance",
            stage: self.stage,
        })?;

        if self.stage == Stage::CustomerInfo {
            let errors = validate_form(&self.customer);
            if !errors.is_empty() {
                self.field_errors = errors.clone();
                return Err(WizardError::InvalidCustomer(errors));
            }
            self.field_errors.clear();
        }

        self.stage = next;
        Ok(self.stage)
    }

    /// Moves one stage back; does nothing on the first stage.
    pub fn retreat(&mut self) -> Stage {
        if let Some(previous) = self.stage.previous() {
            self.stage = previous;
        }
        self.stage
    }

    /// Adds or removes one of the product's services.
    /// Returns whether the service is selected afterwards.
    pub fn toggle_service(&mut self, id: &ServiceId) -> Result<bool, WizardError> {
        self.require_stage(Stage::ServiceSelection, "toggle_service")?;
        let service = self
            .product
            .service(id)
            .cloned()
            .ok_or_else(|| WizardError::UnknownService(id.clone()))?;
        Ok(self.selected.toggle(service))
    }

    pub fn update_customer_field(
        &mut self,
        field: CustomerField,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.require_stage(Stage::CustomerInfo, "update_customer_field")?;
        self.customer.set(field, value);
        Ok(())
    }

    /// Validates one field as soon as the shopper leaves it, updating only
    /// that field's entry in the error map.
    pub fn blur_field(&mut self, field: CustomerField) -> Result<Option<String>, WizardError> {
        self.require_stage(Stage::CustomerInfo, "blur_field")?;
        let error = validate_field(field, &self.customer);
        match &error {
            Some(message) => {
                self.field_errors.insert(field, message.clone());
            }
            None => {
                self.field_errors.remove(&field);
            }
        }
        Ok(error)
    }

    pub fn summary(&self) -> BookingSummary {
        let total_extra_service_price = self.selected.total_price();
        BookingSummary {
            product_name: self.product.name.clone(),
            base_price: self.product.price,
            services: self.selected.to_vec(),
            total_extra_service_price,
            total_price: self.product.price + total_extra_service_price,
            customer: (!self.customer.first_name.is_empty()).then(|| self.customer.clone()),
        }
    }

    /// Builds the request posted when the shopper books from the summary.
    pub fn booking_request(&self) -> Result<BookingRequest, WizardError> {
        self.require_stage(Stage::Summary, "submit_booking")?;
        let products = std::iter::once(BookingItem::new(&self.product.name, &self.product.code))
            .chain(
                self.selected
                    .iter()
                    .map(|service| BookingItem::new(&service.name, &service.code)),
            )
            .collect();

        Ok(BookingRequest {
            products,
            customer: self.customer.clone(),
        })
    }

    fn require_stage(&self, expected: Stage, operation: &'static str) -> Result<(), WizardError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(WizardError::NotAvailable {
                operation,
                stage: self.stage,
            })
        }
    }
}

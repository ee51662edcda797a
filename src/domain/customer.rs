use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the contact fields collected in the customer-details stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomerField {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl CustomerField {
    pub const ALL: [CustomerField; 4] = [
        CustomerField::FirstName,
        CustomerField::LastName,
        CustomerField::Email,
        CustomerField::Phone,
    ];

    /// Wire name of the field, as used in the booking request body.
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerField::FirstName => "firstName",
            CustomerField::LastName => "lastName",
            CustomerField::Email => "email",
            CustomerField::Phone => "phone",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CustomerField::FirstName => "First name",
            CustomerField::LastName => "Last name",
            CustomerField::Email => "Email",
            CustomerField::Phone => "Phone number",
        }
    }
}

impl fmt::Display for CustomerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown customer field: {0}")]
pub struct UnknownFieldError(pub String);

impl FromStr for CustomerField {
    type Err = UnknownFieldError;

    /// Accepts the wire name (`firstName`) as well as the snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "firstName" | "first_name" => Ok(CustomerField::FirstName),
            "lastName" | "last_name" => Ok(CustomerField::LastName),
            "email" => Ok(CustomerField::Email),
            "phone" => Ok(CustomerField::Phone),
            other => Err(UnknownFieldError(other.to_string())),
        }
    }
}

/// Contact details of the shopper. Every field starts out empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl Customer {
    #[cfg(test)]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn get(&self, field: CustomerField) -> &str {
        match field {
            CustomerField::FirstName => &self.first_name,
            CustomerField::LastName => &self.last_name,
            CustomerField::Email => &self.email,
            CustomerField::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: CustomerField, value: impl Into<String>) {
        let slot = match field {
            CustomerField::FirstName => &mut self.first_name,
            CustomerField::LastName => &mut self.last_name,
            CustomerField::Email => &mut self.email,
            CustomerField::Phone => &mut self.phone,
        };
        *slot = value.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_parse_both_spellings() {
        assert_eq!("firstName".parse::<CustomerField>(), Ok(CustomerField::FirstName));
        assert_eq!("last_name".parse::<CustomerField>(), Ok(CustomerField::LastName));
        assert_eq!(
            "age".parse::<CustomerField>(),
            Err(UnknownFieldError("age".to_string()))
        );
    }

    #[test]
    fn test_customer_serializes_with_wire_names() {
        let mut customer = Customer::default();
        customer.set(CustomerField::FirstName, "Ada");
        customer.set(CustomerField::Phone, "0401234567");

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "");
        assert_eq!(json["phone"], "0401234567");
        assert_eq!(customer.get(CustomerField::FirstName), "Ada");
    }
}

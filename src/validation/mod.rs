//! Customer-form validation.
//!
//! Every field has an ordered list of checks in [`RULES`]; the first failing
//! check decides the message for that field. Validation never fails as an
//! operation, it only produces [`FieldErrors`].

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use crate::domain::{Customer, CustomerField};

/// Validation messages keyed by field. A field without an entry is valid.
pub type FieldErrors = BTreeMap<CustomerField, String>;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+.\S+").expect("Invalid email regex"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid phone regex"));

fn email_pattern() -> &'static Regex {
    &EMAIL_PATTERN
}

fn phone_pattern() -> &'static Regex {
    &PHONE_PATTERN
}

#[derive(Debug, Clone, Copy)]
enum Check {
    /// Fails when the value is empty after trimming whitespace.
    NotBlank(&'static str),
    /// Fails when the value is the empty string.
    NotEmpty(&'static str),
    /// Fails when the value does not match the pattern.
    Matches(fn() -> &'static Regex, &'static str),
}

impl Check {
    fn run(&self, value: &str) -> Option<&'static str> {
        match *self {
            Check::NotBlank(message) => value.trim().is_empty().then_some(message),
            Check::NotEmpty(message) => value.is_empty().then_some(message),
            Check::Matches(pattern, message) => (!pattern().is_match(value)).then_some(message),
        }
    }
}

struct FieldRule {
    field: CustomerField,
    checks: &'static [Check],
}

const RULES: &[FieldRule] = &[
    FieldRule {
        field: CustomerField::FirstName,
        checks: &[Check::NotBlank("Please enter your first name")],
    },
    FieldRule {
        field: CustomerField::LastName,
        checks: &[Check::NotEmpty("Please enter your last name")],
    },
    FieldRule {
        field: CustomerField::Email,
        checks: &[
            Check::NotEmpty("Please enter your email"),
            Check::Matches(email_pattern, "Please enter a valid email"),
        ],
    },
    FieldRule {
        field: CustomerField::Phone,
        checks: &[
            Check::NotEmpty("Please enter your phone number"),
            Check::Matches(phone_pattern, "Please enter a valid 10-digit phone number"),
        ],
    },
];

/// Validates a single field of `customer`, returning its error message.
pub fn validate_field(field: CustomerField, customer: &Customer) -> Option<String> {
    let rule = RULES.iter().find(|rule| rule.field == field)?;
    let value = customer.get(field);
    rule.checks
        .iter()
        .find_map(|check| check.run(value))
        .map(str::to_string)
}

/// Same as [`validate_field`] for a field given by its exact wire name
/// (`firstName`, `lastName`, `email`, `phone`). Any other name has no rule
/// and is always valid.
#[allow(dead_code)]
pub fn validate_field_named(name: &str, customer: &Customer) -> Option<String> {
    let field = CustomerField::ALL.into_iter().find(|field| field.as_str() == name)?;
    validate_field(field, customer)
}

/// Validates every known field and collects the failures.
pub fn validate_form(customer: &Customer) -> FieldErrors {
    RULES
        .iter()
        .filter_map(|rule| validate_field(rule.field, customer).map(|message| (rule.field, message)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_customer() -> Customer {
        Customer::new("Ada", "Lovelace", "ada@example.com", "0401234567")
    }

    fn with(field: CustomerField, value: &str) -> Customer {
        let mut customer = valid_customer();
        customer.set(field, value);
        customer
    }

    #[test]
    fn test_email_rules_in_order() {
        assert_eq!(
            validate_field(CustomerField::Email, &with(CustomerField::Email, "")).as_deref(),
            Some("Please enter your email")
        );
        assert_eq!(
            validate_field(CustomerField::Email, &with(CustomerField::Email, "bad")).as_deref(),
            Some("Please enter a valid email")
        );
        assert_eq!(validate_field(CustomerField::Email, &with(CustomerField::Email, "a@b.co")), None);
    }

    #[test]
    fn test_email_dot_is_a_wildcard() {
        // The separator before the tld is any character, not a literal dot.
        assert_eq!(validate_field(CustomerField::Email, &with(CustomerField::Email, "a@bxc")), None);
        assert!(validate_field(CustomerField::Email, &with(CustomerField::Email, "a@b")).is_some());
        assert!(validate_field(CustomerField::Email, &with(CustomerField::Email, "@b.co")).is_some());
    }

    #[test]
    fn test_phone_needs_exactly_ten_digits() {
        assert_eq!(
            validate_field(CustomerField::Phone, &with(CustomerField::Phone, "")).as_deref(),
            Some("Please enter your phone number")
        );
        assert_eq!(
            validate_field(CustomerField::Phone, &with(CustomerField::Phone, "12345")).as_deref(),
            Some("Please enter a valid 10-digit phone number")
        );
        assert!(validate_field(CustomerField::Phone, &with(CustomerField::Phone, "12345678901")).is_some());
        assert!(validate_field(CustomerField::Phone, &with(CustomerField::Phone, "12345 67890")).is_some());
        assert!(validate_field(CustomerField::Phone, &with(CustomerField::Phone, "١٢٣٤٥٦٧٨٩٠")).is_some());
        assert_eq!(validate_field(CustomerField::Phone, &with(CustomerField::Phone, "1234567890")), None);
    }

    #[test]
    fn test_first_name_is_trimmed_last_name_is_not() {
        assert_eq!(
            validate_field(CustomerField::FirstName, &with(CustomerField::FirstName, "   ")).as_deref(),
            Some("Please enter your first name")
        );
        assert_eq!(validate_field(CustomerField::LastName, &with(CustomerField::LastName, "  ")), None);
        assert_eq!(
            validate_field(CustomerField::LastName, &with(CustomerField::LastName, "")).as_deref(),
            Some("Please enter your last name")
        );
    }

    #[test]
    fn test_unknown_field_name_has_no_rule() {
        assert_eq!(validate_field_named("nickname", &Customer::default()), None);
        assert_eq!(validate_field_named("first_name", &Customer::default()), None);
        assert_eq!(validate_field_named(" email ", &Customer::default()), None);
        assert_eq!(validate_field_named("Email", &Customer::default()), None);
        assert_eq!(
            validate_field_named("firstName", &Customer::default()).as_deref(),
            Some("Please enter your first name")
        );
    }

    #[test]
    fn test_blank_form_reports_all_four_fields() {
        let errors = validate_form(&Customer::default());
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.keys().copied().collect::<Vec<_>>(), CustomerField::ALL.to_vec());
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate_form(&valid_customer()).is_empty());
    }
}

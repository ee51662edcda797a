//! Actor hosting a [`crate::wizard::WizardState`].

mod service;

pub use service::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an extra service. The catalog may send it as a JSON number
/// or as a string, so both shapes are kept as-is. Numbers keep their JSON
/// form, which covers floats and integers beyond `i64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceId::Number(id) => write!(f, "{}", id),
            ServiceId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for ServiceId {
    fn from(id: i64) -> Self {
        ServiceId::Number(id.into())
    }
}

impl From<&str> for ServiceId {
    fn from(id: &str) -> Self {
        ServiceId::Text(id.to_string())
    }
}

impl From<String> for ServiceId {
    fn from(id: String) -> Self {
        ServiceId::Text(id)
    }
}

/// An optional add-on that can be booked together with an accommodation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub price: f64,
    pub code: String,
}

impl Service {
    #[cfg(test)]
    pub fn new(
        id: impl Into<ServiceId>,
        code: impl Into<String>,
        name: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            code: code.into(),
        }
    }
}

/// A bookable accommodation as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub image_src: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub code: String,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Product {
    #[cfg(test)]
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            image_src: String::new(),
            name: name.into(),
            description: String::new(),
            price,
            code: code.into(),
            services: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[cfg(test)]
    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// Looks up one of this product's extra services by id.
    pub fn service(&self, id: &ServiceId) -> Option<&Service> {
        self.services.iter().find(|service| &service.id == id)
    }
}

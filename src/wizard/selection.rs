use crate::domain::{Service, ServiceId};

/// Services picked in the selection stage, in the order they were first picked.
///
/// A product carries only a handful of services, so a plain vector with a
/// linear membership scan is enough.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedServices {
    services: Vec<Service>,
}

impl SelectedServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the service if present, appends it otherwise.
    /// Returns whether the service is selected afterwards.
    pub fn toggle(&mut self, service: Service) -> bool {
        match self.position(&service.id) {
            Some(index) => {
                self.services.remove(index);
                false
            }
            None => {
                self.services.push(service);
                true
            }
        }
    }

    #[cfg(test)]
    pub fn contains(&self, id: &ServiceId) -> bool {
        self.position(id).is_some()
    }

    pub fn total_price(&self) -> f64 {
        self.services.iter().map(|service| service.price).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Service> {
        self.services.clone()
    }

    fn position(&self, id: &ServiceId) -> Option<usize> {
        self.services.iter().position(|service| &service.id == id)
    }
}

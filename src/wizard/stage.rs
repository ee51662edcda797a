use std::fmt;

/// The four sequential stages of the booking wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    ProductDetails,
    ServiceSelection,
    CustomerInfo,
    Summary,
}

impl Stage {
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::ProductDetails => Some(Stage::ServiceSelection),
            Stage::ServiceSelection => Some(Stage::CustomerInfo),
            Stage::CustomerInfo => Some(Stage::Summary),
            Stage::Summary => None,
        }
    }

    pub fn previous(self) -> Option<Stage> {
        match self {
            Stage::ProductDetails => None,
            Stage::ServiceSelection => Some(Stage::ProductDetails),
            Stage::CustomerInfo => Some(Stage::ServiceSelection),
            Stage::Summary => Some(Stage::CustomerInfo),
        }
    }

    /// 1-based position of the stage.
    pub fn number(self) -> u8 {
        match self {
            Stage::ProductDetails => 1,
            Stage::ServiceSelection => 2,
            Stage::CustomerInfo => 3,
            Stage::Summary => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::ProductDetails => "Product details",
            Stage::ServiceSelection => "Select extra services",
            Stage::CustomerInfo => "Customer",
            Stage::Summary => "Summary",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/4)", self.title(), self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_chain_in_order() {
        let mut stage = Stage::ProductDetails;
        let mut seen = vec![stage.number()];
        while let Some(next) = stage.next() {
            assert_eq!(next.previous(), Some(stage));
            stage = next;
            seen.push(stage.number());
        }
        assert_eq!(seen, vec![1, 2, 3, 4]);
        assert_eq!(Stage::ProductDetails.previous(), None);
    }
}

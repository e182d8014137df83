use serde::{Deserialize, Serialize};

use super::domain::PropertyDescriptor;

/// Collateral classes the deposit rules distinguish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    /// Apartments, villas, multi-family and detached houses.
    #[default]
    Residential,
    Land,
    /// Retail units and factories.
    Commercial,
}

const LAND_TERMS: &[&str] = &["토지", "land"];
const COMMERCIAL_TERMS: &[&str] = &["상가", "공장", "commercial", "factory"];

impl PropertyCategory {
    pub const ALL: [PropertyCategory; 3] = [
        PropertyCategory::Residential,
        PropertyCategory::Land,
        PropertyCategory::Commercial,
    ];

    /// Classify a free-text type label. Land terms win over commercial terms.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();

        if LAND_TERMS.iter().any(|term| label.contains(term)) {
            return Self::Land;
        }

        if COMMERCIAL_TERMS.iter().any(|term| label.contains(term)) {
            return Self::Commercial;
        }

        Self::Residential
    }

    pub fn categorize(property: Option<&PropertyDescriptor>) -> Self {
        property
            .and_then(|property| property.property_type.as_deref())
            .map(Self::from_label)
            .unwrap_or_default()
    }

    pub const fn label(self) -> &'static str {
        match self {
            PropertyCategory::Residential => "residential",
            PropertyCategory::Land => "land",
            PropertyCategory::Commercial => "commercial",
        }
    }
}

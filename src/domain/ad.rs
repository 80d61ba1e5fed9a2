// ============================================================
// AD TYPES
// ============================================================
// The listing record and the fixed bulk-upload template contract

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Condition values offered by the listing form. The record itself stores
/// plain text so imported values outside this set survive untouched.
pub const CONDITION_OPTIONS: [&str; 4] = ["New", "Used - Like New", "Used - Good", "Used - Fair"];

/// Shipping values offered by the listing form.
pub const SHIPPING_OPTIONS: [&str; 2] = ["Yes", "No"];

/// Header row of the bulk-upload template.
/// MUST be uppercase to match Facebook's exact template format.
pub const REQUIRED_HEADERS: [&str; 6] = [
    "TITLE",
    "PRICE",
    "CONDITION",
    "DESCRIPTION",
    "CATEGORY",
    "OFFER SHIPPING",
];

/// Caption cell on row 1 of the template.
pub const TEMPLATE_TITLE: &str = "Facebook Marketplace Bulk Upload Template";

/// Caption cell on row 2 of the template.
pub const TEMPLATE_INSTRUCTIONS: &str = "You can create up to 50 listings at once. When you are finished, be sure to save or export this as an XLS/XLSX file.";

/// Sheet name used on export.
pub const SHEET_NAME: &str = "Marketplace Ads";

/// File name suggested for the exported workbook.
pub const EXPORT_FILE_NAME: &str = "Facebook_Marketplace_Bulk_Ads.xlsx";

/// Category path substituted when an imported row has no category cell.
pub const DEFAULT_CATEGORY: &str = "Home & Garden > Tools & Workshop Equipment";

/// A raw cell scalar from the interchange sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// A single marketplace listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ad {
    /// Opaque unique identifier, assigned once at creation
    pub id: String,

    /// Human-readable listing name
    pub title: String,

    /// Asking price in currency units, never negative once valid
    pub price: f64,

    /// One of [`CONDITION_OPTIONS`] for a form-edited record; imported
    /// records may carry arbitrary text verbatim
    pub condition: String,

    /// Free text, may be multi-line
    pub description: String,

    /// "Parent > Child" category path, vocabulary not enforced
    pub category: String,

    /// "Yes" or "No"
    pub offer_shipping: String,

    /// Extra template columns captured on import, keyed by original header
    /// text in column order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub other_fields: IndexMap<String, CellValue>,
}

impl Ad {
    /// Create a blank listing with a fresh id and the form defaults.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            price: 0.0,
            condition: "New".to_string(),
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            offer_shipping: "No".to_string(),
            other_fields: IndexMap::new(),
        }
    }
}

impl Default for Ad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ad_has_form_defaults() {
        let ad = Ad::new();
        assert!(ad.title.is_empty());
        assert_eq!(ad.price, 0.0);
        assert_eq!(ad.condition, "New");
        assert_eq!(ad.category, DEFAULT_CATEGORY);
        assert_eq!(ad.offer_shipping, "No");
        assert!(ad.other_fields.is_empty());
    }

    #[test]
    fn test_new_ads_get_distinct_ids() {
        let a = Ad::new();
        let b = Ad::new();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_cell_value_serializes_as_plain_scalar() {
        let json = serde_json::to_string(&CellValue::Number(19.99)).unwrap();
        assert_eq!(json, "19.99");

        let json = serde_json::to_string(&CellValue::Text("Photo".to_string())).unwrap();
        assert_eq!(json, "\"Photo\"");
    }

    #[test]
    fn test_ad_json_omits_empty_other_fields() {
        let ad = Ad::new();
        let json = serde_json::to_string(&ad).unwrap();
        assert!(!json.contains("other_fields"));
    }
}

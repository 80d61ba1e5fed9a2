//! Field-level validation for listings.
//!
//! Returns a map of field name -> message; an empty map means the ad is
//! publishable. Condition and shipping are constrained by the form's
//! selection controls, not checked here, so imported values pass through.

use std::collections::HashMap;

use crate::domain::ad::Ad;

/// Per-field error messages keyed by field name.
pub type ValidationErrors = HashMap<String, String>;

/// Minimum title length accepted by Marketplace.
const MIN_TITLE_CHARS: usize = 5;

/// Validate a listing for required fields and data integrity.
///
/// Pure and deterministic; each field is checked in isolation and carries
/// at most one error. Safe to call on every keystroke.
pub fn validate_ad(ad: &Ad) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if ad.title.trim().is_empty() {
        errors.insert("title".to_string(), "Title is required".to_string());
    } else if ad.title.chars().count() < MIN_TITLE_CHARS {
        errors.insert(
            "title".to_string(),
            "Title is too short (min 5 chars)".to_string(),
        );
    }

    if ad.price.is_nan() {
        errors.insert("price".to_string(), "Price is required".to_string());
    } else if ad.price < 0.0 {
        errors.insert("price".to_string(), "Price cannot be negative".to_string());
    }

    if ad.category.trim().is_empty() {
        errors.insert("category".to_string(), "Category is required".to_string());
    }

    if ad.description.trim().is_empty() {
        errors.insert(
            "description".to_string(),
            "Description is required".to_string(),
        );
    }

    errors
}

/// Whether the ad would survive a publish attempt as-is.
pub fn is_publishable(ad: &Ad) -> bool {
    validate_ad(ad).is_empty()
}

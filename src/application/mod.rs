pub mod use_cases;

pub use use_cases::ad_validation::{is_publishable, validate_ad, ValidationErrors};
pub use use_cases::catalog::AdCatalog;

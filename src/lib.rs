//! Listing catalog with Facebook Marketplace bulk-upload spreadsheet
//! interchange: import a template workbook into records, validate them
//! field by field, and export them back into the exact template layout.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{is_publishable, validate_ad, AdCatalog, ValidationErrors};
pub use domain::ad::{
    Ad, CellValue, CONDITION_OPTIONS, DEFAULT_CATEGORY, EXPORT_FILE_NAME, REQUIRED_HEADERS,
    SHEET_NAME, SHIPPING_OPTIONS, TEMPLATE_INSTRUCTIONS, TEMPLATE_TITLE,
};
pub use domain::error::{AppError, Result};
pub use infrastructure::excel::{ExcelReader, ExcelWriter};

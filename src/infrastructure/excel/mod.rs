// ============================================================
// EXCEL INFRASTRUCTURE LAYER
// ============================================================
// Reading and writing the bulk-upload workbook format

pub mod reader;
pub mod writer;

pub use reader::ExcelReader;
pub use writer::ExcelWriter;

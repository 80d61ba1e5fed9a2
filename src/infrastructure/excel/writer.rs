// ============================================================
// TEMPLATE WRITER
// ============================================================
// Serialize listings into the bulk-upload workbook layout:
// row 1 template caption, row 2 instructions, row 3 headers, data after.

use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::domain::ad::{
    Ad, CellValue, REQUIRED_HEADERS, SHEET_NAME, TEMPLATE_INSTRUCTIONS, TEMPLATE_TITLE,
};
use crate::domain::error::{AppError, Result};

/// First data row, right below the caption and header rows.
const DATA_START_ROW: u32 = 3;

/// Writer for the bulk-upload template.
#[derive(Default)]
pub struct ExcelWriter {
    /// Whether `other_fields` are re-emitted as trailing columns.
    /// Off by default; the stock template carries only the six columns.
    include_other_fields: bool,
}

impl ExcelWriter {
    /// Create a writer producing the stock six-column template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-emit captured extra columns after the six fixed ones, so a
    /// read-modify-write cycle keeps them.
    pub fn with_other_fields(mut self, include: bool) -> Self {
        self.include_other_fields = include;
        self
    }

    /// Serialize the listings to workbook bytes for a caller-owned sink.
    pub fn write_buffer(&self, ads: &[Ad]) -> Result<Vec<u8>> {
        let mut workbook = self.build_workbook(ads)?;
        let bytes = workbook
            .save_to_buffer()
            .map_err(|e| AppError::Internal(format!("Failed to serialize workbook: {}", e)))?;
        tracing::debug!(count = ads.len(), bytes = bytes.len(), "Exported listings");
        Ok(bytes)
    }

    /// Serialize the listings straight to a file on disk.
    pub fn write_file(&self, ads: &[Ad], path: &Path) -> Result<()> {
        let mut workbook = self.build_workbook(ads)?;
        workbook.save(path).map_err(|e| {
            AppError::IoError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        tracing::debug!(count = ads.len(), path = %path.display(), "Exported listings");
        Ok(())
    }

    fn build_workbook(&self, ads: &[Ad]) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        self.write_sheet(sheet, ads)
            .map_err(|e| AppError::Internal(format!("Failed to build workbook: {}", e)))?;
        Ok(workbook)
    }

    fn write_sheet(
        &self,
        sheet: &mut Worksheet,
        ads: &[Ad],
    ) -> std::result::Result<(), XlsxError> {
        sheet.set_name(SHEET_NAME)?;
        sheet.write_string(0, 0, TEMPLATE_TITLE)?;
        sheet.write_string(1, 0, TEMPLATE_INSTRUCTIONS)?;
        for (col, header) in REQUIRED_HEADERS.iter().enumerate() {
            sheet.write_string(2, col as u16, *header)?;
        }

        let extras = if self.include_other_fields {
            let extras = extra_columns(ads);
            for (offset, header) in extras.iter().enumerate() {
                sheet.write_string(2, (REQUIRED_HEADERS.len() + offset) as u16, header)?;
            }
            extras
        } else {
            Vec::new()
        };

        for (i, ad) in ads.iter().enumerate() {
            let row = DATA_START_ROW + i as u32;
            sheet.write_string(row, 0, &ad.title)?;
            // Price is numeric by type; a transient NaN from an aborted
            // edit is written as 0
            let price = if ad.price.is_finite() { ad.price } else { 0.0 };
            sheet.write_number(row, 1, price)?;
            sheet.write_string(row, 2, &ad.condition)?;
            sheet.write_string(row, 3, &ad.description)?;
            sheet.write_string(row, 4, &ad.category)?;
            sheet.write_string(row, 5, &ad.offer_shipping)?;

            for (offset, header) in extras.iter().enumerate() {
                if let Some(value) = ad.other_fields.get(header) {
                    let col = (REQUIRED_HEADERS.len() + offset) as u16;
                    write_cell_value(sheet, row, col, value)?;
                }
            }
        }

        Ok(())
    }
}

/// Union of extra column names across all listings, first-seen order.
fn extra_columns(ads: &[Ad]) -> Vec<String> {
    let mut extras: Vec<String> = Vec::new();
    for ad in ads {
        for key in ad.other_fields.keys() {
            if !extras.iter().any(|existing| existing == key) {
                extras.push(key.clone());
            }
        }
    }
    extras
}

fn write_cell_value(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
) -> std::result::Result<(), XlsxError> {
    match value {
        CellValue::Text(s) => sheet.write_string(row, col, s)?,
        CellValue::Number(n) => sheet.write_number(row, col, *n)?,
        CellValue::Bool(b) => sheet.write_boolean(row, col, *b)?,
        CellValue::Empty => return Ok(()),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::excel::reader::ExcelReader;
    use calamine::{Data, Reader, Xlsx};
    use std::io::Cursor;

    fn sample_ads() -> Vec<Ad> {
        vec![
            Ad {
                title: "Garden Hose 50ft".to_string(),
                price: 19.99,
                condition: "Used - Good".to_string(),
                description: "Lightly used hose".to_string(),
                category: "Home & Garden > Tools".to_string(),
                offer_shipping: "Yes".to_string(),
                ..Ad::new()
            },
            Ad {
                title: "Cordless Drill".to_string(),
                price: 45.0,
                condition: "New".to_string(),
                description: "Still boxed".to_string(),
                category: "Home & Garden > Tools".to_string(),
                offer_shipping: "No".to_string(),
                ..Ad::new()
            },
        ]
    }

    #[test]
    fn test_layout_matches_template_contract() {
        let bytes = ExcelWriter::new().write_buffer(&sample_ads()).unwrap();

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);

        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        let rows: Vec<&[Data]> = range.rows().collect();

        assert_eq!(rows[0][0], Data::String(TEMPLATE_TITLE.to_string()));
        assert_eq!(rows[1][0], Data::String(TEMPLATE_INSTRUCTIONS.to_string()));
        for (col, header) in REQUIRED_HEADERS.iter().enumerate() {
            assert_eq!(rows[2][col], Data::String(header.to_string()));
        }
        assert_eq!(rows[3][0], Data::String("Garden Hose 50ft".to_string()));
        assert_eq!(rows[3][1], Data::Float(19.99));
        assert_eq!(rows[4][5], Data::String("No".to_string()));
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_round_trip_preserves_listing_fields() {
        let ads = sample_ads();
        let bytes = ExcelWriter::new().write_buffer(&ads).unwrap();
        let parsed = ExcelReader::new().parse_bytes(&bytes).unwrap();

        assert_eq!(parsed.len(), ads.len());
        for (before, after) in ads.iter().zip(&parsed) {
            assert_eq!(before.title, after.title);
            assert_eq!(before.price, after.price);
            assert_eq!(before.condition, after.condition);
            assert_eq!(before.description, after.description);
            assert_eq!(before.category, after.category);
            assert_eq!(before.offer_shipping, after.offer_shipping);
            // ids are minted fresh on import
            assert_ne!(before.id, after.id);
        }
    }

    #[test]
    fn test_other_fields_drop_by_default_but_round_trip_on_request() {
        let mut ad = sample_ads().remove(0);
        ad.other_fields
            .insert("PHOTO URL".to_string(), CellValue::Text("x.jpg".to_string()));
        ad.other_fields
            .insert("VIEWS".to_string(), CellValue::Number(12.0));

        let minimal = ExcelWriter::new().write_buffer(&[ad.clone()]).unwrap();
        let parsed = ExcelReader::new().parse_bytes(&minimal).unwrap();
        assert!(parsed[0].other_fields.is_empty());

        let full = ExcelWriter::new()
            .with_other_fields(true)
            .write_buffer(&[ad.clone()])
            .unwrap();
        let parsed = ExcelReader::new().parse_bytes(&full).unwrap();
        assert_eq!(parsed[0].other_fields, ad.other_fields);
    }

    #[test]
    fn test_empty_catalog_still_writes_captions_and_headers() {
        let bytes = ExcelWriter::new().write_buffer(&[]).unwrap();

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        let rows: Vec<&[Data]> = range.rows().collect();
        assert_eq!(rows.len(), 3);

        // An exported empty catalog is itself a valid template
        let bytes = ExcelWriter::new().write_buffer(&[]).unwrap();
        let parsed = ExcelReader::new().parse_bytes(&bytes).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_non_finite_price_written_as_zero() {
        let mut ad = sample_ads().remove(0);
        ad.price = f64::NAN;

        let bytes = ExcelWriter::new().write_buffer(&[ad]).unwrap();
        let parsed = ExcelReader::new().parse_bytes(&bytes).unwrap();
        assert_eq!(parsed[0].price, 0.0);
    }
}

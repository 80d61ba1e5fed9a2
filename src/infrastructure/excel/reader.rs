// ============================================================
// TEMPLATE READER
// ============================================================
// Parse an uploaded bulk-upload workbook into listing records.
// The template dictates fixed positions: row 1 title caption, row 2
// instructions, row 3 headers, data from row 4. Column order inside the
// header row is not assumed; fields are looked up by name.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use indexmap::IndexMap;
use uuid::Uuid;

use crate::domain::ad::{Ad, CellValue, DEFAULT_CATEGORY};
use crate::domain::error::{AppError, Result};

/// Row index of the header row inside the template.
const HEADER_ROW: usize = 2;

/// Reader for the bulk-upload template.
pub struct ExcelReader {
    /// Category path substituted when a row has no category cell
    default_category: String,

    /// Whether columns outside the template schema are captured into
    /// `other_fields`
    collect_unknown_columns: bool,
}

impl Default for ExcelReader {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            collect_unknown_columns: true,
        }
    }
}

impl ExcelReader {
    /// Create a reader with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category substituted for rows without one.
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    /// Set whether unknown columns are captured into `other_fields`.
    pub fn with_collect_unknown_columns(mut self, collect: bool) -> Self {
        self.collect_unknown_columns = collect;
        self
    }

    /// Parse an uploaded workbook from its raw bytes.
    ///
    /// All-or-nothing at file level: a structural failure yields
    /// `AppError::FormatError` and no records. Malformed individual data
    /// rows never abort the import; their fields coerce to defaults.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<Ad>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| AppError::FormatError(format!("Failed to open Excel file: {}", e)))?;
        let range = first_sheet_range(&mut workbook)?;
        self.parse_range(&range)
    }

    /// Parse a workbook from disk.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Ad>> {
        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
            AppError::IoError(format!(
                "Failed to open Excel file {}: {}",
                path.display(),
                e
            ))
        })?;
        let range = first_sheet_range(&mut workbook)?;
        self.parse_range(&range)
    }

    fn parse_range(&self, range: &Range<Data>) -> Result<Vec<Ad>> {
        let rows: Vec<&[Data]> = range.rows().collect();

        if rows.len() < 3 {
            return Err(AppError::FormatError(
                "File is too short. It must contain at least 3 rows (Title, Instructions, Headers)."
                    .to_string(),
            ));
        }

        let mapping = HeaderMapping::from_header(rows[HEADER_ROW])?;

        let mut ads = Vec::new();
        for row in rows.iter().skip(HEADER_ROW + 1) {
            if row.iter().all(cell_is_blank) {
                continue;
            }
            ads.push(self.ad_from_row(row, &mapping));
        }

        tracing::debug!(count = ads.len(), "Parsed listings from workbook");
        Ok(ads)
    }

    fn ad_from_row(&self, row: &[Data], mapping: &HeaderMapping) -> Ad {
        let mut other_fields = IndexMap::new();
        if self.collect_unknown_columns {
            for (idx, header) in &mapping.extra {
                let value = cell_value(cell_at(row, Some(*idx)));
                if !value.is_empty() {
                    other_fields.insert(header.clone(), value);
                }
            }
        }

        Ad {
            // Import always mints a fresh id, never one from the file
            id: Uuid::new_v4().to_string(),
            title: text_or(row, mapping.title_idx, ""),
            price: number_or_zero(cell_at(row, mapping.price_idx)),
            condition: text_or(row, mapping.condition_idx, "New"),
            description: text_or(row, mapping.description_idx, ""),
            category: text_or(row, mapping.category_idx, &self.default_category),
            offer_shipping: text_or(row, mapping.offer_shipping_idx, "No"),
            other_fields,
        }
    }
}

/// Column positions resolved from the header row.
///
/// Headers are matched after trimming and lowercasing, so reordered or
/// oddly-cased template columns still map. Only title and price are
/// mandatory; everything else defaults when absent.
#[derive(Debug, Clone)]
struct HeaderMapping {
    title_idx: Option<usize>,
    price_idx: Option<usize>,
    condition_idx: Option<usize>,
    description_idx: Option<usize>,
    category_idx: Option<usize>,
    offer_shipping_idx: Option<usize>,

    /// Unmapped columns as (index, original header text)
    extra: Vec<(usize, String)>,
}

impl HeaderMapping {
    fn from_header(header: &[Data]) -> Result<Self> {
        let mut mapping = Self {
            title_idx: None,
            price_idx: None,
            condition_idx: None,
            description_idx: None,
            category_idx: None,
            offer_shipping_idx: None,
            extra: Vec::new(),
        };

        for (idx, cell) in header.iter().enumerate() {
            let Some(name) = header_text(cell) else {
                continue;
            };
            let key = name.trim().to_lowercase();

            match key.as_str() {
                "title" if mapping.title_idx.is_none() => mapping.title_idx = Some(idx),
                "price" if mapping.price_idx.is_none() => mapping.price_idx = Some(idx),
                "condition" if mapping.condition_idx.is_none() => {
                    mapping.condition_idx = Some(idx)
                }
                "description" if mapping.description_idx.is_none() => {
                    mapping.description_idx = Some(idx)
                }
                "category" if mapping.category_idx.is_none() => mapping.category_idx = Some(idx),
                "offer shipping" if mapping.offer_shipping_idx.is_none() => {
                    mapping.offer_shipping_idx = Some(idx)
                }
                _ => mapping.extra.push((idx, name)),
            }
        }

        if mapping.title_idx.is_none() || mapping.price_idx.is_none() {
            return Err(AppError::FormatError(
                "Invalid Template. Could not find 'Title' and 'Price' in Row 3.".to_string(),
            ));
        }

        Ok(mapping)
    }
}

fn first_sheet_range<RS>(workbook: &mut Xlsx<RS>) -> Result<Range<Data>>
where
    RS: std::io::Read + std::io::Seek,
{
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::FormatError("No worksheet found".to_string()))?
        .map_err(|e| AppError::FormatError(format!("Failed to read Excel range: {}", e)))
}

fn cell_is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_at<'a>(row: &'a [Data], idx: Option<usize>) -> &'a Data {
    idx.and_then(|i| row.get(i)).unwrap_or(&Data::Empty)
}

/// Header cell as text; empty cells yield None.
fn header_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        other => Some(format!("{}", other)),
    }
}

/// Cell as text, falling back to a default for missing or empty cells.
fn text_or(row: &[Data], idx: Option<usize>, default: &str) -> String {
    match cell_at(row, idx) {
        Data::String(s) if !s.is_empty() => s.clone(),
        Data::Float(f) => format!("{}", f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        _ => default.to_string(),
    }
}

/// Cell coerced to a number; anything non-numeric becomes 0.
fn number_or_zero(cell: &Data) -> f64 {
    let parsed = match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        Data::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Cell as the raw scalar kept in `other_fields`.
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(format!("{}", other)),
    }
}

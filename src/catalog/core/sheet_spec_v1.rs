//! Product sheet schema (frozen v1): single source of truth on the code side.
//!
//! - Export column names, order and widths are frozen; any new information
//!   must go through new optional response fields, not column changes.
//! - Import matches header keys after lower-casing + trimming.

use chrono::NaiveDate;

pub const SPEC_VERSION_V1: &str = "v1";

/// Sheet name written on export. Import does not require it: the first
/// worksheet is read regardless of its name.
pub const EXPORT_SHEET_NAME_V1: &str = "Produtos";

/// Frozen v1: export columns, verbatim and in order.
pub const EXPORT_HEADERS_V1: [&str; 7] = [
    "ID",
    "EAN",
    "Name",
    "Status",
    "Score",
    "Mirakl_Image",
    "BB_Image_Url",
];

/// Frozen v1: display width per export column, same order as headers.
pub const EXPORT_COLUMN_WIDTHS_V1: [f64; 7] = [15.0, 15.0, 30.0, 15.0, 12.0, 60.0, 60.0];

/// Header row style: bold white text on a solid indigo fill.
pub const EXPORT_HEADER_FILL_RGB_V1: u32 = 0x4F46E5;

/// Frozen v1: recognized import header keys (after `normalize_header_key`).
pub const IMPORT_KEYS_V1: [&str; 7] = [
    "id",
    "ean",
    "name",
    "status",
    "score",
    "mirakl_image",
    "bb_image_url",
];

/// Placeholder written in place of an inline (locally uploaded) image.
/// Lossy by design: a re-import reads back the placeholder, not the image.
pub const LOCAL_IMAGE_PLACEHOLDER: &str = "[Imagem Local - Upload]";

/// Id prefix for imported rows that carry no `id` cell.
pub const IMPORT_ID_FALLBACK_PREFIX: &str = "PROD-";

pub const DELIVERY_FILE_PREFIX: &str = "produtos_";
pub const DELIVERY_FILE_EXTENSION: &str = "xlsx";

pub fn normalize_header_key(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Key for a cell beyond (or under a blank slot of) the header row,
/// 1-based by column.
pub fn fallback_column_key(col_number: usize) -> String {
    format!("col{col_number}")
}

/// Deterministic id for a data row without an `id` cell, 1-based by row.
pub fn fallback_row_id(row_index: usize) -> String {
    format!("{IMPORT_ID_FALLBACK_PREFIX}{row_index}")
}

pub fn delivery_file_name(date: NaiveDate) -> String {
    format!(
        "{DELIVERY_FILE_PREFIX}{}.{DELIVERY_FILE_EXTENSION}",
        date.format("%Y-%m-%d")
    )
}

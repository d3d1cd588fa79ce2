//! Spreadsheet → products mapping layer.
//!
//! - Reads only the first worksheet.
//! - Row 1 is the header row; keys are lower-cased + trimmed cell text,
//!   blank slots and extra columns fall back to `col<N>`.
//! - Malformed cells never fail the import: they degrade to defaults and,
//!   where useful, surface as warnings.
//! - Rows without a name are skipped silently; only the diagnostics count
//!   them.

use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Xlsx};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::core::model::{CatalogWarning, Product, NA_SENTINEL};
use crate::catalog::core::sheet_spec_v1 as sheet_spec;
use crate::catalog::error::{
    ImportProductsError, ImportProductsErrorDetails, ImportProductsErrorKind,
};

#[derive(Debug, Error)]
pub enum ImportXlsxError {
    #[error("failed to open workbook: {0}")]
    OpenWorkbook(String),

    #[error("workbook has no worksheet")]
    NoWorksheet,

    #[error("failed to read worksheet '{sheet_name}': {message}")]
    ReadWorksheet { sheet_name: String, message: String },
}

impl ImportXlsxError {
    pub fn to_import_error(&self) -> ImportProductsError {
        match self {
            ImportXlsxError::OpenWorkbook(message) => ImportProductsError {
                kind: ImportProductsErrorKind::XlsxReadError,
                message: format!("failed to open workbook: {message}"),
                details: None,
            },
            ImportXlsxError::NoWorksheet => ImportProductsError {
                kind: ImportProductsErrorKind::NoWorksheet,
                message: "workbook has no worksheet".to_string(),
                details: None,
            },
            ImportXlsxError::ReadWorksheet {
                sheet_name,
                message,
            } => ImportProductsError {
                kind: ImportProductsErrorKind::XlsxReadError,
                message: format!("failed to read worksheet '{sheet_name}': {message}"),
                details: Some(ImportProductsErrorDetails {
                    sheet_name: Some(sheet_name.clone()),
                    ..Default::default()
                }),
            },
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportDiagnostics {
    pub detected_sheets: Vec<String>,
    pub used_sheet: String,
    pub detected_columns: Vec<String>,
    pub rows_scanned: u32,
    pub rows_imported: u32,
    pub rows_skipped_unnamed: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportOutcome {
    pub products: Vec<Product>,
    pub warnings: Vec<CatalogWarning>,
    pub diagnostics: ImportDiagnostics,
}

pub fn import_products_xlsx(path: &Path) -> Result<ImportOutcome, ImportXlsxError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| ImportXlsxError::OpenWorkbook(e.to_string()))?;

    let detected_sheets = workbook.sheet_names().to_owned();
    let used_sheet = detected_sheets
        .first()
        .cloned()
        .ok_or(ImportXlsxError::NoWorksheet)?;

    let range = workbook
        .worksheet_range(&used_sheet)
        .map_err(|e| ImportXlsxError::ReadWorksheet {
            sheet_name: used_sheet.clone(),
            message: e.to_string(),
        })?;

    Ok(parse_product_range(detected_sheets, used_sheet, &range))
}

/// Same contract as [`import_products_xlsx`], for an in-memory workbook
/// (e.g. a file the UI shell handed over as bytes).
pub fn import_products_xlsx_bytes(bytes: &[u8]) -> Result<ImportOutcome, ImportXlsxError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportXlsxError::OpenWorkbook(e.to_string()))?;

    let detected_sheets = workbook.sheet_names().to_owned();
    let used_sheet = detected_sheets
        .first()
        .cloned()
        .ok_or(ImportXlsxError::NoWorksheet)?;

    let range = workbook
        .worksheet_range(&used_sheet)
        .map_err(|e| ImportXlsxError::ReadWorksheet {
            sheet_name: used_sheet.clone(),
            message: e.to_string(),
        })?;

    Ok(parse_product_range(detected_sheets, used_sheet, &range))
}

fn parse_product_range(
    detected_sheets: Vec<String>,
    used_sheet: String,
    range: &Range<Data>,
) -> ImportOutcome {
    let mut rows = range.rows();

    let detected_columns: Vec<String> = rows
        .next()
        .map(|header_row| {
            header_row
                .iter()
                .map(|c| cell_string(c).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();

    let header_keys: Vec<String> = detected_columns
        .iter()
        .map(|h| sheet_spec::normalize_header_key(h))
        .collect();

    let mut products: Vec<Product> = Vec::new();
    let mut warnings: Vec<CatalogWarning> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut rows_scanned: u32 = 0;
    let mut rows_skipped_unnamed: u32 = 0;
    let mut row_index: usize = 0;

    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        rows_scanned += 1;
        row_index += 1;

        let mut fields: HashMap<String, &Data> = HashMap::new();
        for (col, cell) in row.iter().enumerate() {
            if matches!(cell, Data::Empty) {
                continue;
            }
            let key = match header_keys.get(col) {
                Some(key) if !key.is_empty() => key.clone(),
                _ => sheet_spec::fallback_column_key(col + 1),
            };
            fields.insert(key, cell);
        }

        let product = parse_product_from_row(&fields, row_index, &mut warnings);

        if product.name.is_empty() {
            rows_skipped_unnamed += 1;
            continue;
        }

        if !seen_ids.insert(product.id.clone()) {
            warnings.push(CatalogWarning {
                code: "DUPLICATE_PRODUCT_ID".to_string(),
                message: format!("imported id '{}' appears more than once", product.id),
                product_id: Some(product.id.clone()),
                row_index: Some(row_index as u32),
            });
        }

        products.push(product);
    }

    let rows_imported = products.len() as u32;
    ImportOutcome {
        products,
        warnings,
        diagnostics: ImportDiagnostics {
            detected_sheets,
            used_sheet,
            detected_columns,
            rows_scanned,
            rows_imported,
            rows_skipped_unnamed,
        },
    }
}

fn parse_product_from_row(
    fields: &HashMap<String, &Data>,
    row_index: usize,
    warnings: &mut Vec<CatalogWarning>,
) -> Product {
    let key_id = sheet_spec::IMPORT_KEYS_V1[0];
    let key_ean = sheet_spec::IMPORT_KEYS_V1[1];
    let key_name = sheet_spec::IMPORT_KEYS_V1[2];
    let key_status = sheet_spec::IMPORT_KEYS_V1[3];
    let key_score = sheet_spec::IMPORT_KEYS_V1[4];
    let key_mirakl_image = sheet_spec::IMPORT_KEYS_V1[5];
    let key_bb_image_url = sheet_spec::IMPORT_KEYS_V1[6];

    let id = field_string(fields, key_id)
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| sheet_spec::fallback_row_id(row_index));

    Product {
        ean: field_string(fields, key_ean).unwrap_or_default(),
        name: field_string(fields, key_name).unwrap_or_default(),
        status: field_string(fields, key_status).unwrap_or_default(),
        score: parse_score(fields.get(key_score).copied(), &id, row_index, warnings),
        mirakl_image: field_string(fields, key_mirakl_image).unwrap_or_default(),
        bb_image_url: field_string(fields, key_bb_image_url).unwrap_or_default(),
        id,
    }
}

/// A score cell is absent, the `"N/A"` sentinel, or a number whose decimal
/// separator may be a comma. Anything unparsable degrades to absent.
fn parse_score(
    cell: Option<&Data>,
    product_id: &str,
    row_index: usize,
    warnings: &mut Vec<CatalogWarning>,
) -> Option<f64> {
    let raw = cell.and_then(cell_string)?;
    if raw.is_empty() || raw == NA_SENTINEL {
        return None;
    }

    let normalized = raw.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(score) if score.is_finite() => Some(score),
        _ => {
            warnings.push(CatalogWarning {
                code: "SCORE_NOT_NUMERIC".to_string(),
                message: format!("score '{raw}' is not a number; imported as absent"),
                product_id: Some(product_id.to_string()),
                row_index: Some(row_index as u32),
            });
            None
        }
    }
}

fn field_string(fields: &HashMap<String, &Data>, key: &str) -> Option<String> {
    fields.get(key).and_then(|cell| cell_string(cell))
}

fn cell_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.trim().to_string()),
        Data::Float(v) => Some(format!("{v}")),
        Data::Int(v) => Some(format!("{v}")),
        Data::Bool(v) => Some(if *v { "1".to_string() } else { "0".to_string() }),
        other => Some(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::core::model::STATUS_OK;
    use rust_xlsxwriter::Workbook;

    fn sheet_bytes(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    const HEADERS: &[&str] = &[
        "ID",
        "EAN",
        "Name",
        "Status",
        "Score",
        "Mirakl_Image",
        "BB_Image_Url",
    ];

    #[test]
    fn well_formed_rows_map_field_by_field() {
        let bytes = sheet_bytes(&[
            HEADERS,
            &[
                "J1",
                "789000111",
                "Cafeteira",
                STATUS_OK,
                "4.5",
                "https://img.example/m.jpg",
                "https://img.example/b.jpg",
            ],
        ]);

        let outcome = import_products_xlsx_bytes(&bytes).unwrap();
        assert_eq!(outcome.products.len(), 1);

        let product = &outcome.products[0];
        assert_eq!(product.id, "J1");
        assert_eq!(product.ean, "789000111");
        assert_eq!(product.name, "Cafeteira");
        assert_eq!(product.status, STATUS_OK);
        assert_eq!(product.score, Some(4.5));
        assert_eq!(product.mirakl_image, "https://img.example/m.jpg");
        assert_eq!(product.bb_image_url, "https://img.example/b.jpg");
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.diagnostics.rows_imported, 1);
    }

    #[test]
    fn header_keys_are_lower_cased_and_trimmed() {
        let bytes = sheet_bytes(&[
            &["  id ", "NAME", " Score "],
            &["J1", "Produto", "2.5"],
        ]);

        let outcome = import_products_xlsx_bytes(&bytes).unwrap();
        let product = &outcome.products[0];
        assert_eq!(product.id, "J1");
        assert_eq!(product.name, "Produto");
        assert_eq!(product.score, Some(2.5));
    }

    #[test]
    fn comma_decimal_separator_is_normalized() {
        let bytes = sheet_bytes(&[HEADERS, &["J1", "", "Produto", "", "3,5", "", ""]]);
        let outcome = import_products_xlsx_bytes(&bytes).unwrap();
        assert_eq!(outcome.products[0].score, Some(3.5));
    }

    #[test]
    fn na_sentinel_and_unparsable_scores_import_as_absent() {
        let bytes = sheet_bytes(&[
            HEADERS,
            &["J1", "", "Com NA", "", "N/A", "", ""],
            &["J2", "", "Com lixo", "", "abc", "", ""],
        ]);

        let outcome = import_products_xlsx_bytes(&bytes).unwrap();
        assert_eq!(outcome.products[0].score, None);
        assert_eq!(outcome.products[1].score, None);

        // Only the unparsable value warns; the sentinel is expected data.
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].code, "SCORE_NOT_NUMERIC");
        assert_eq!(outcome.warnings[0].product_id.as_deref(), Some("J2"));
    }

    #[test]
    fn numeric_cells_coerce_to_strings() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "ID").unwrap();
        sheet.write_string(0, 1, "Name").unwrap();
        sheet.write_string(0, 2, "Score").unwrap();
        sheet.write_number(1, 0, 123.0).unwrap();
        sheet.write_string(1, 1, "Numerico").unwrap();
        sheet.write_number(1, 2, 4.25).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let outcome = import_products_xlsx_bytes(&bytes).unwrap();
        let product = &outcome.products[0];
        assert_eq!(product.id, "123");
        assert_eq!(product.score, Some(4.25));
    }

    #[test]
    fn rows_without_a_name_are_dropped_silently() {
        let bytes = sheet_bytes(&[
            HEADERS,
            &["J1", "", "Primeiro", "", "", "", ""],
            &["J2", "789", "", STATUS_OK, "1.0", "", ""],
            &["J3", "", "Terceiro", "", "", "", ""],
        ]);

        let outcome = import_products_xlsx_bytes(&bytes).unwrap();
        let ids: Vec<&str> = outcome.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["J1", "J3"]);
        assert_eq!(outcome.diagnostics.rows_scanned, 3);
        assert_eq!(outcome.diagnostics.rows_imported, 2);
        assert_eq!(outcome.diagnostics.rows_skipped_unnamed, 1);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn missing_id_falls_back_to_a_deterministic_row_token() {
        let bytes = sheet_bytes(&[
            &["Name"],
            &["Primeiro"],
            &["Segundo"],
        ]);

        let outcome = import_products_xlsx_bytes(&bytes).unwrap();
        assert_eq!(outcome.products[0].id, "PROD-1");
        assert_eq!(outcome.products[1].id, "PROD-2");
    }

    #[test]
    fn cells_beyond_the_header_row_key_as_col_n() {
        // 3 headers, 4 cells: the extra cell keys as col4 and is ignored by
        // the product mapping without disturbing the known fields.
        let bytes = sheet_bytes(&[
            &["ID", "Name", "Status"],
            &["J1", "Produto", STATUS_OK, "extra"],
        ]);

        let outcome = import_products_xlsx_bytes(&bytes).unwrap();
        let product = &outcome.products[0];
        assert_eq!(product.id, "J1");
        assert_eq!(product.status, STATUS_OK);
    }

    #[test]
    fn duplicate_ids_are_kept_and_flagged() {
        let bytes = sheet_bytes(&[
            HEADERS,
            &["J1", "", "Primeiro", "", "", "", ""],
            &["J1", "", "Repetido", "", "", "", ""],
        ]);

        let outcome = import_products_xlsx_bytes(&bytes).unwrap();
        assert_eq!(outcome.products.len(), 2);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].code, "DUPLICATE_PRODUCT_ID");
        assert_eq!(outcome.warnings[0].row_index, Some(2));
    }

    #[test]
    fn header_only_sheet_imports_zero_products() {
        let bytes = sheet_bytes(&[HEADERS]);
        let outcome = import_products_xlsx_bytes(&bytes).unwrap();
        assert!(outcome.products.is_empty());
        assert_eq!(outcome.diagnostics.rows_scanned, 0);
        assert_eq!(outcome.diagnostics.detected_columns.len(), HEADERS.len());
    }

    #[test]
    fn garbage_bytes_fail_as_open_workbook() {
        let err = import_products_xlsx_bytes(b"not an xlsx").unwrap_err();
        assert!(matches!(err, ImportXlsxError::OpenWorkbook(_)));

        let dto = err.to_import_error();
        assert_eq!(dto.kind, ImportProductsErrorKind::XlsxReadError);
    }
}

//! Products → xlsx export (frozen schema v1).
//!
//! - One sheet, column names/order/widths exactly as `sheet_spec_v1`.
//! - Writing to a path goes through a `.tmp` sibling that is renamed into
//!   place; the temp file is removed on any failure.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, XlsxError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::core::model::{is_local_image_url, CatalogWarning, Product, NA_SENTINEL};
use crate::catalog::core::sheet_spec_v1 as sheet_spec;

#[derive(Debug, Error)]
pub enum ExportXlsxError {
    #[error("xlsx error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDiagnostics {
    pub exported_rows: u32,
    pub duration_ms: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportOutcome {
    pub headers: Vec<String>,
    pub warnings: Vec<CatalogWarning>,
    pub diagnostics: ExportDiagnostics,
}

pub fn export_headers() -> Vec<String> {
    sheet_spec::EXPORT_HEADERS_V1
        .iter()
        .map(|h| (*h).to_string())
        .collect()
}

pub fn export_products_xlsx(
    out_path: &Path,
    products: &[Product],
) -> Result<ExportOutcome, ExportXlsxError> {
    let started = Instant::now();
    let mut warnings: Vec<CatalogWarning> = Vec::new();

    let mut workbook = build_products_workbook(products, &mut warnings)?;
    persist_atomic(&mut workbook, out_path)?;

    Ok(outcome(products, warnings, started))
}

/// Same contract as [`export_products_xlsx`], returning the workbook bytes
/// instead of touching the filesystem (e.g. for a UI download trigger).
pub fn export_products_xlsx_buffer(
    products: &[Product],
) -> Result<(Vec<u8>, ExportOutcome), ExportXlsxError> {
    let started = Instant::now();
    let mut warnings: Vec<CatalogWarning> = Vec::new();

    let mut workbook = build_products_workbook(products, &mut warnings)?;
    let bytes = workbook.save_to_buffer()?;

    Ok((bytes, outcome(products, warnings, started)))
}

/// Writes the dated delivery file (`produtos_<YYYY-MM-DD>.xlsx`, local
/// date) under `out_dir` and returns its full path.
pub fn export_products_delivery(
    out_dir: &Path,
    products: &[Product],
) -> Result<(PathBuf, ExportOutcome), ExportXlsxError> {
    export_products_delivery_for_date(out_dir, products, chrono::Local::now().date_naive())
}

pub fn export_products_delivery_for_date(
    out_dir: &Path,
    products: &[Product],
    date: NaiveDate,
) -> Result<(PathBuf, ExportOutcome), ExportXlsxError> {
    let out_path = out_dir.join(sheet_spec::delivery_file_name(date));
    let outcome = export_products_xlsx(&out_path, products)?;
    Ok((out_path, outcome))
}

fn outcome(
    products: &[Product],
    warnings: Vec<CatalogWarning>,
    started: Instant,
) -> ExportOutcome {
    ExportOutcome {
        headers: export_headers(),
        warnings,
        diagnostics: ExportDiagnostics {
            exported_rows: products.len() as u32,
            duration_ms: started.elapsed().as_millis() as u32,
        },
    }
}

fn build_products_workbook(
    products: &[Product],
    warnings: &mut Vec<CatalogWarning>,
) -> Result<Workbook, ExportXlsxError> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(sheet_spec::EXPORT_HEADER_FILL_RGB_V1))
        .set_pattern(FormatPattern::Solid);

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_spec::EXPORT_SHEET_NAME_V1)?;

    for (col, header) in sheet_spec::EXPORT_HEADERS_V1.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        sheet.set_column_width(col as u16, sheet_spec::EXPORT_COLUMN_WIDTHS_V1[col])?;
    }

    for (index, product) in products.iter().enumerate() {
        let row = (index + 1) as u32;

        sheet.write_string(row, 0, product.id.as_str())?;
        sheet.write_string(row, 1, product.ean.as_str())?;
        sheet.write_string(row, 2, product.name.as_str())?;
        sheet.write_string(row, 3, product.status.as_str())?;

        match product.score {
            Some(score) if score.is_finite() => {
                sheet.write_number(row, 4, score)?;
            }
            Some(score) => {
                warnings.push(CatalogWarning {
                    code: "SCORE_NOT_FINITE".to_string(),
                    message: format!(
                        "product score is not a finite number ({score}); exported cell will use '{NA_SENTINEL}'"
                    ),
                    product_id: Some(product.id.clone()),
                    row_index: Some(row),
                });
                sheet.write_string(row, 4, NA_SENTINEL)?;
            }
            None => {
                sheet.write_string(row, 4, NA_SENTINEL)?;
            }
        }

        sheet.write_string(row, 5, image_cell_value(&product.mirakl_image).as_str())?;
        sheet.write_string(row, 6, image_cell_value(&product.bb_image_url).as_str())?;
    }

    Ok(workbook)
}

/// Empty stays empty, an inline upload becomes the placeholder, any other
/// URL passes through trimmed.
fn image_cell_value(url: &str) -> String {
    let safe_url = url.trim();
    if safe_url.is_empty() {
        return String::new();
    }
    if is_local_image_url(safe_url) {
        return sheet_spec::LOCAL_IMAGE_PLACEHOLDER.to_string();
    }
    safe_url.to_string()
}

fn persist_atomic(workbook: &mut Workbook, out_path: &Path) -> Result<(), ExportXlsxError> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = out_path.with_extension("tmp");
    let result = (|| -> Result<(), ExportXlsxError> {
        workbook.save(&tmp_path)?;
        if out_path.exists() {
            std::fs::remove_file(out_path)?;
        }
        std::fs::rename(&tmp_path, out_path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    result
}

//! Import/export orchestration: xlsx adapters + collection swap + delivery.
//!
//! No cancellation: either operation runs to completion or fails. A hard
//! import failure leaves the current collection untouched.

use std::path::{Path, PathBuf};

use crate::catalog::adapters::storage::path_resolver;
use crate::catalog::api::common::persist_catalog;
use crate::catalog::api::state::CatalogState;
use crate::catalog::api::types::{ExportProductsResponse, ImportProductsResponse};
use crate::catalog::error::{ImportProductsError, ImportProductsErrorKind};
use crate::catalog::usecase::export_xlsx::export_products_delivery;
use crate::catalog::usecase::import_xlsx::{
    import_products_xlsx, import_products_xlsx_bytes, ImportOutcome,
};

pub fn import_products(
    state: &CatalogState,
    path: &Path,
) -> Result<ImportProductsResponse, ImportProductsError> {
    let outcome = import_products_xlsx(path).map_err(|e| e.to_import_error())?;
    apply_import(state, outcome)
}

pub fn import_products_bytes(
    state: &CatalogState,
    bytes: &[u8],
) -> Result<ImportProductsResponse, ImportProductsError> {
    let outcome = import_products_xlsx_bytes(bytes).map_err(|e| e.to_import_error())?;
    apply_import(state, outcome)
}

fn apply_import(
    state: &CatalogState,
    outcome: ImportOutcome,
) -> Result<ImportProductsResponse, ImportProductsError> {
    state.store.lock().replace_all(outcome.products);

    persist_catalog(state).map_err(|message| ImportProductsError {
        kind: ImportProductsErrorKind::StorageError,
        message,
        details: None,
    })?;

    Ok(ImportProductsResponse {
        imported: outcome.diagnostics.rows_imported,
        warnings: outcome.warnings,
        diagnostics: outcome.diagnostics,
    })
}

/// Writes the dated delivery file into `out_dir` when given, else into the
/// configured output dir (default `<base>/exports`).
pub fn export_products(
    state: &CatalogState,
    out_dir: Option<&str>,
) -> Result<ExportProductsResponse, String> {
    let out_dir = match out_dir {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
        _ => path_resolver::resolve_output_dir(state.base_dir()),
    };

    let products = state.store.lock().products().to_vec();
    let (out_path, outcome) =
        export_products_delivery(&out_dir, &products).map_err(|e| e.to_string())?;

    let file_name = out_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(ExportProductsResponse {
        out_path: out_path.to_string_lossy().to_string(),
        file_name,
        headers: outcome.headers,
        warnings: outcome.warnings,
        diagnostics: outcome.diagnostics,
    })
}

//! Response DTOs for the service layer. Once exposed these are a stable
//! contract: only new optional fields may be added.

use serde::{Deserialize, Serialize};

use crate::catalog::core::model::CatalogWarning;
use crate::catalog::usecase::export_xlsx::ExportDiagnostics;
use crate::catalog::usecase::import_xlsx::ImportDiagnostics;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportProductsResponse {
    pub imported: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CatalogWarning>,
    pub diagnostics: ImportDiagnostics,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportProductsResponse {
    pub out_path: String,
    pub file_name: String,
    pub headers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CatalogWarning>,
    pub diagnostics: ExportDiagnostics,
}

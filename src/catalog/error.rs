//! Structured errors for the UI surface: stable `{kind, message, details}`
//! payloads, serialized as-is to the frontend.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ImportProductsErrorKind {
    #[serde(rename = "XlsxReadError")]
    XlsxReadError,
    #[serde(rename = "NoWorksheet")]
    NoWorksheet,
    #[serde(rename = "StorageError")]
    StorageError,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportProductsErrorDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportProductsError {
    pub kind: ImportProductsErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ImportProductsErrorDetails>,
}

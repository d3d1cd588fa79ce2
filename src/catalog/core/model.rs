//! Catalog data model: stable records and persisted DTOs.
//!
//! Constraints:
//! - Persisted JSON top level must carry `schemaVersion: 1`.
//! - `Product.id` is unique within a collection and immutable once stored.
//! - `Product.score` is either absent (`null` on the wire) or a finite
//!   number; the literal string `"N/A"` marks an intentionally absent score
//!   in spreadsheet cells, never in JSON.

use serde::{Deserialize, Deserializer, Serialize};

pub const SCHEMA_VERSION_V1: u32 = 1;

pub const STATUS_OK: &str = "OK";
pub const STATUS_UNAVAILABLE: &str = "INDISPONIVEL";

/// Cell sentinel for "value intentionally absent" (scores, Mirakl images).
pub const NA_SENTINEL: &str = "N/A";

/// Prefix of an inline (locally uploaded) image, as opposed to a remote URL.
pub const LOCAL_IMAGE_URI_PREFIX: &str = "data:image";

pub fn is_local_image_url(url: &str) -> bool {
    url.trim().starts_with(LOCAL_IMAGE_URI_PREFIX)
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub ean: String,
    pub name: String,
    pub status: String,
    pub score: Option<f64>,
    pub mirakl_image: String,
    pub bb_image_url: String,
}

/// Form payload for creating a product; `id` is synthesized when absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub ean: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub mirakl_image: String,
    #[serde(default)]
    pub bb_image_url: String,
}

/// Partial-field update; `id` is deliberately not patchable.
///
/// `score` distinguishes "field absent = keep" from "field null = clear".
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ean: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub score: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirakl_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bb_image_url: Option<String>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogV1 {
    pub schema_version: u32,
    pub products: Vec<Product>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeV1 {
    pub schema_version: u32,
    pub dark: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfigV1 {
    pub schema_version: u32,
    /// Default output root for exported xlsx deliveries.
    pub output_dir: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogWarning {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,
}

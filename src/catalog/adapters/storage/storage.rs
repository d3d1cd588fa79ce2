//! Durable catalog state: versioned JSON files under the app data dir.
//!
//! - Every persisted payload carries `schemaVersion: 1`; any other version
//!   is rejected on both save and load.
//! - Writes go through a temp file + rename; reads of a missing file are
//!   `Ok(None)`, not an error.

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::catalog::core::model::{CatalogConfigV1, CatalogV1, ThemeV1, SCHEMA_VERSION_V1};

pub const STORAGE_DIR_NAME: &str = "catalog";
pub const CATALOG_FILE_NAME: &str = "catalog.v1.json";
pub const THEME_FILE_NAME: &str = "theme.v1.json";
pub const CONFIG_FILE_NAME: &str = "config.v1.json";
pub const EXPORTS_DIR_NAME: &str = "exports";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schemaVersion: {0}")]
    UnsupportedSchemaVersion(u32),
}

pub fn catalog_dir(app_data_dir: PathBuf) -> PathBuf {
    app_data_dir.join(STORAGE_DIR_NAME)
}

pub fn default_output_dir(base_dir: &Path) -> PathBuf {
    base_dir.join(EXPORTS_DIR_NAME)
}

pub fn save_catalog(base_dir: &Path, payload: &CatalogV1) -> Result<(), StorageError> {
    if payload.schema_version != SCHEMA_VERSION_V1 {
        return Err(StorageError::UnsupportedSchemaVersion(
            payload.schema_version,
        ));
    }
    write_json_atomic(base_dir.join(CATALOG_FILE_NAME), payload)
}

pub fn load_catalog(base_dir: &Path) -> Result<Option<CatalogV1>, StorageError> {
    read_json_optional::<CatalogV1>(base_dir.join(CATALOG_FILE_NAME)).and_then(|opt| {
        if let Some(v) = &opt {
            if v.schema_version != SCHEMA_VERSION_V1 {
                return Err(StorageError::UnsupportedSchemaVersion(v.schema_version));
            }
        }
        Ok(opt)
    })
}

pub fn save_theme(base_dir: &Path, payload: &ThemeV1) -> Result<(), StorageError> {
    if payload.schema_version != SCHEMA_VERSION_V1 {
        return Err(StorageError::UnsupportedSchemaVersion(
            payload.schema_version,
        ));
    }
    write_json_atomic(base_dir.join(THEME_FILE_NAME), payload)
}

pub fn load_theme(base_dir: &Path) -> Result<Option<ThemeV1>, StorageError> {
    read_json_optional::<ThemeV1>(base_dir.join(THEME_FILE_NAME)).and_then(|opt| {
        if let Some(v) = &opt {
            if v.schema_version != SCHEMA_VERSION_V1 {
                return Err(StorageError::UnsupportedSchemaVersion(v.schema_version));
            }
        }
        Ok(opt)
    })
}

pub fn save_config(base_dir: &Path, payload: &CatalogConfigV1) -> Result<(), StorageError> {
    if payload.schema_version != SCHEMA_VERSION_V1 {
        return Err(StorageError::UnsupportedSchemaVersion(
            payload.schema_version,
        ));
    }
    write_json_atomic(base_dir.join(CONFIG_FILE_NAME), payload)
}

pub fn load_config(base_dir: &Path) -> Result<Option<CatalogConfigV1>, StorageError> {
    read_json_optional::<CatalogConfigV1>(base_dir.join(CONFIG_FILE_NAME)).and_then(|opt| {
        if let Some(v) = &opt {
            if v.schema_version != SCHEMA_VERSION_V1 {
                return Err(StorageError::UnsupportedSchemaVersion(v.schema_version));
            }
        }
        Ok(opt)
    })
}

fn write_json_atomic<T: Serialize>(path: PathBuf, value: &T) -> Result<(), StorageError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    std::fs::create_dir_all(parent)?;

    let json = serde_json::to_string_pretty(value)?;
    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, json)?;
    if path.exists() {
        std::fs::remove_file(&path)?;
    }
    std::fs::rename(tmp_path, path)?;
    Ok(())
}

fn read_json_optional<T: DeserializeOwned>(path: PathBuf) -> Result<Option<T>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }

    let text = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&text)?))
}

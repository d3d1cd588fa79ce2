//! Config and theme preference, each under its own durable key.

use crate::catalog::adapters::storage::storage;
use crate::catalog::api::state::CatalogState;
use crate::catalog::core::model::{CatalogConfigV1, ThemeV1, SCHEMA_VERSION_V1};

pub fn load_config(state: &CatalogState) -> Result<CatalogConfigV1, String> {
    let base_dir = state.base_dir();
    let default_dir = storage::default_output_dir(base_dir)
        .to_string_lossy()
        .to_string();

    match storage::load_config(base_dir).map_err(|e| e.to_string())? {
        Some(mut cfg) => {
            if cfg.output_dir.trim().is_empty() {
                cfg.output_dir = default_dir;
            }
            Ok(cfg)
        }
        None => Ok(CatalogConfigV1 {
            schema_version: SCHEMA_VERSION_V1,
            output_dir: default_dir,
        }),
    }
}

pub fn save_config(state: &CatalogState, payload: CatalogConfigV1) -> Result<(), String> {
    if payload.schema_version != SCHEMA_VERSION_V1 {
        return Err(format!(
            "unsupported schemaVersion: {}",
            payload.schema_version
        ));
    }

    let base_dir = state.base_dir();
    let default_dir = storage::default_output_dir(base_dir)
        .to_string_lossy()
        .to_string();

    let mut cfg = payload;
    if cfg.output_dir.trim().is_empty() {
        cfg.output_dir = default_dir;
    }

    storage::save_config(base_dir, &cfg).map_err(|e| e.to_string())?;
    Ok(())
}

/// Dark is the default until the user saves a preference.
pub fn load_theme(state: &CatalogState) -> Result<ThemeV1, String> {
    match storage::load_theme(state.base_dir()).map_err(|e| e.to_string())? {
        Some(theme) => Ok(theme),
        None => Ok(ThemeV1 {
            schema_version: SCHEMA_VERSION_V1,
            dark: true,
        }),
    }
}

pub fn save_theme(state: &CatalogState, payload: ThemeV1) -> Result<(), String> {
    if payload.schema_version != SCHEMA_VERSION_V1 {
        return Err(format!(
            "unsupported schemaVersion: {}",
            payload.schema_version
        ));
    }

    storage::save_theme(state.base_dir(), &payload).map_err(|e| e.to_string())?;
    Ok(())
}

//! Resolution of the durable base dir and the export output dir.
//!
//! - Catalog state lives under `<platform data dir>/<app>/catalog/`.
//! - Exports go to the configured `outputDir`; unset or blank falls back to
//!   `<base>/exports/`, relative values are joined onto the base dir.

use std::path::{Path, PathBuf};

use super::storage;

pub const APP_DIR_NAME: &str = "catalogo-produtos";

/// `None` only when the platform has no data dir at all.
pub fn default_base_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|data_dir| storage::catalog_dir(data_dir.join(APP_DIR_NAME)))
}

pub fn resolve_output_dir(base_dir: &Path) -> PathBuf {
    let default_dir = storage::default_output_dir(base_dir);

    let cfg = match storage::load_config(base_dir) {
        Ok(v) => v,
        Err(_) => return default_dir,
    };

    let Some(cfg) = cfg else {
        return default_dir;
    };

    let raw = cfg.output_dir.trim();
    if raw.is_empty() {
        return default_dir;
    }

    let candidate = PathBuf::from(raw);
    if candidate.is_absolute() {
        candidate
    } else {
        base_dir.join(candidate)
    }
}

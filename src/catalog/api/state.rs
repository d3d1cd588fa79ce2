use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::catalog::adapters::storage::storage::{self, StorageError};
use crate::catalog::adapters::storage::path_resolver;
use crate::catalog::core::store::ProductStore;

pub struct CatalogState {
    pub(crate) store: Mutex<ProductStore>,
    pub(crate) base_dir: PathBuf,
}

impl CatalogState {
    /// Fresh empty state; nothing is read from disk.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: Mutex::new(ProductStore::new()),
            base_dir: base_dir.into(),
        }
    }

    /// Hydrates the collection from `catalog.v1.json` when present.
    pub fn load(base_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_dir = base_dir.into();
        let products = storage::load_catalog(&base_dir)?
            .map(|catalog| catalog.products)
            .unwrap_or_default();

        Ok(Self {
            store: Mutex::new(ProductStore::from_products(products)),
            base_dir,
        })
    }

    /// [`CatalogState::load`] against the platform default base dir.
    pub fn load_default() -> Result<Self, String> {
        let base_dir = path_resolver::default_base_dir()
            .ok_or_else(|| "platform data dir unavailable".to_string())?;
        Self::load(base_dir).map_err(|e| e.to_string())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::core::model::{CatalogV1, Product, SCHEMA_VERSION_V1};
    use uuid::Uuid;

    #[test]
    fn load_hydrates_the_persisted_collection() {
        let base_dir = std::env::temp_dir().join(format!("catalog-state-{}", Uuid::new_v4()));

        storage::save_catalog(
            &base_dir,
            &CatalogV1 {
                schema_version: SCHEMA_VERSION_V1,
                products: vec![Product {
                    id: "J1".to_string(),
                    ean: String::new(),
                    name: "Persistido".to_string(),
                    status: String::new(),
                    score: None,
                    mirakl_image: String::new(),
                    bb_image_url: String::new(),
                }],
            },
        )
        .unwrap();

        let state = CatalogState::load(&base_dir).unwrap();
        assert_eq!(state.store.lock().len(), 1);
        assert_eq!(state.store.lock().products()[0].name, "Persistido");
    }

    #[test]
    fn load_of_a_missing_file_starts_empty() {
        let base_dir = std::env::temp_dir().join(format!("catalog-state-{}", Uuid::new_v4()));
        let state = CatalogState::load(&base_dir).unwrap();
        assert!(state.store.lock().is_empty());
    }
}

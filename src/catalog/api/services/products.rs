//! Collection CRUD and derived-view queries.
//!
//! Views are recomputed from the current collection on every call, so a
//! caller polling after any mutation always observes fresh values.
//! Mutators persist the whole collection after applying the change.

use crate::catalog::api::common::persist_catalog;
use crate::catalog::api::state::CatalogState;
use crate::catalog::core::model::{Product, ProductDraft, ProductPatch};
use crate::catalog::core::views::{self, CatalogMetrics, ProductFilter};

pub fn list(state: &CatalogState) -> Vec<Product> {
    state.store.lock().products().to_vec()
}

pub fn list_filtered(state: &CatalogState, query: &str, status: &str) -> Vec<Product> {
    let filter = ProductFilter::new(query, status);
    views::filter_products(state.store.lock().products(), &filter)
}

pub fn statuses(state: &CatalogState) -> Vec<String> {
    views::distinct_statuses(state.store.lock().products())
}

pub fn metrics(state: &CatalogState) -> CatalogMetrics {
    CatalogMetrics::compute(state.store.lock().products())
}

pub fn get(state: &CatalogState, id: &str) -> Option<Product> {
    state.store.lock().get_by_id(id).cloned()
}

pub fn add(state: &CatalogState, draft: ProductDraft) -> Result<Product, String> {
    let product = state.store.lock().add(draft);
    persist_catalog(state)?;
    Ok(product)
}

/// Returns whether a record changed; unknown ids are a no-op, not an error.
pub fn update(state: &CatalogState, id: &str, patch: &ProductPatch) -> Result<bool, String> {
    let changed = state.store.lock().update(id, patch);
    if changed {
        persist_catalog(state)?;
    }
    Ok(changed)
}

pub fn delete(state: &CatalogState, id: &str) -> Result<bool, String> {
    let deleted = state.store.lock().delete(id);
    if deleted {
        persist_catalog(state)?;
    }
    Ok(deleted)
}

pub fn replace_all(state: &CatalogState, products: Vec<Product>) -> Result<(), String> {
    state.store.lock().replace_all(products);
    persist_catalog(state)
}

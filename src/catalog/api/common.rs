use crate::catalog::adapters::storage::storage;
use crate::catalog::api::state::CatalogState;
use crate::catalog::core::model::{CatalogV1, SCHEMA_VERSION_V1};

/// Serialize-on-mutate: snapshots the collection and writes it through the
/// atomic JSON writer. The in-memory mutation has already happened; a
/// failed write surfaces but is not rolled back (last-write-wins).
pub(crate) fn persist_catalog(state: &CatalogState) -> Result<(), String> {
    let payload = CatalogV1 {
        schema_version: SCHEMA_VERSION_V1,
        products: state.store.lock().products().to_vec(),
    };
    storage::save_catalog(state.base_dir(), &payload).map_err(|e| e.to_string())
}

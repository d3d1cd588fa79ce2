pub mod error;

pub mod adapters;
pub mod api;
pub mod core;
pub mod usecase;

// Short aliases so call sites and tests can use `crate::catalog::model`,
// `crate::catalog::storage`, etc.
pub use adapters::storage::path_resolver;
pub use adapters::storage::storage;
pub use core::model;
pub use core::sheet_spec_v1;
pub use core::store;
pub use core::views;
pub use usecase::export_xlsx;
pub use usecase::import_xlsx;

pub mod catalog;

pub use catalog::api::state::CatalogState;

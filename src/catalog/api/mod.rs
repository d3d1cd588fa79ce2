//! Service layer: the operations a desktop shell invokes on UI events.
//!
//! Single-threaded, event-driven callers are assumed; the state mutex only
//! guards against accidental overlap. One import/export at a time comes
//! from natural UI serialization (accepted limitation, not enforced here).

pub(crate) mod common;
pub mod services;
pub mod state;
pub mod types;

pub use state::CatalogState;
pub use types::*;

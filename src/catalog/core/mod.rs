pub mod model;
pub mod sheet_spec_v1;
pub mod store;
pub mod views;

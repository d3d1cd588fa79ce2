//! Use-case layer: orchestrates core + adapters into callable operations.

pub mod export_xlsx;
pub mod import_xlsx;

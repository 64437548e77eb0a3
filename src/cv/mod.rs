//! CV document module
//! Data model and file store for CV documents

pub mod model;
pub mod store;

//! Application services

pub mod catalog;

pub use catalog::{CatalogOptions, CatalogService};

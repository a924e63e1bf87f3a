//! Storefront client: HTTP access to the catalog API, a race-safe product
//! browser and a file-backed cart slot.

pub mod api;
pub mod browser;
pub mod file_storage;

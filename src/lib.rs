//! scent-scraper - Fragrance catalogue scraper
//!
//! Walks a storefront's paginated collection, fetches the scent notes of
//! every matching product, and writes the inventory consumed by the
//! recommendation quiz.

pub mod commands;
pub mod config;
pub mod filters;
pub mod format;
pub mod output;
pub mod quiz;
pub mod rate_limit;
pub mod site;

pub use config::Config;
pub use site::models::{FragranceNotes, Product, ProductStub};
pub use site::notes::sanitize;

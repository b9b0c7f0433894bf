//! Storefront modules for HTTP access, page parsing, and data models.

pub mod client;
pub mod details;
pub mod listing;
pub mod models;
pub mod notes;
pub mod paginator;
pub mod selectors;

pub use client::{SiteClient, SiteSource};
pub use details::{fetch_details, DetailOutcome};
pub use listing::{ListingPage, ListingParser};
pub use models::{FragranceNotes, NoteTier, Product, ProductCollection, ProductStub};
pub use notes::{sanitize, NoteExtractor, NoteStrategy};
pub use paginator::{PageBatch, PaginationEnd, Paginator};

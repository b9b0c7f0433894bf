//! CLI command implementations.

pub mod notes;
pub mod payload;
pub mod scrape;

pub use notes::NotesCommand;
pub use payload::{PayloadCommand, ReplyCommand};
pub use scrape::{ScrapeCommand, ScrapeReport, ScrapeRun};

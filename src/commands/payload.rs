//! Recommendation request building and reply rendering for the quiz.

use crate::config::OutputFormat;
use crate::format::Formatter;
use crate::output::read_products;
use crate::quiz::{Answers, RecommendationRequest, Recommendations};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Pairs the scraped inventory with snapped quiz answers.
pub struct PayloadCommand {
    products_path: PathBuf,
}

impl PayloadCommand {
    pub fn new(products_path: impl Into<PathBuf>) -> Self {
        Self { products_path: products_path.into() }
    }

    /// Returns the request JSON for the given raw slider values.
    pub fn execute(&self, raw_answers: &[i64]) -> Result<String> {
        if raw_answers.is_empty() {
            anyhow::bail!("At least one answer is required");
        }

        let inventory = read_products(&self.products_path)
            .context("Product file is missing or invalid; run `scrape` first")?;
        let answers = Answers::from_raw(raw_answers);

        info!("Building request from {} products and {} answers", inventory.len(), answers.len());

        RecommendationRequest::new(&inventory, &answers).to_json()
    }
}

/// Renders a reply saved from the chat model.
pub struct ReplyCommand {
    format: OutputFormat,
}

impl ReplyCommand {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Parses the reply stored at `path` and formats the recommendations.
    pub fn execute(&self, path: &Path) -> Result<String> {
        let reply = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reply file: {}", path.display()))?;

        self.render(&reply)
    }

    /// Parses reply text and formats the recommendations.
    pub fn render(&self, reply: &str) -> Result<String> {
        let recs = Recommendations::from_reply(reply)?;
        info!("Parsed {} matches and {} wildcards", recs.matches.len(), recs.wildcards.len());

        Ok(Formatter::new(self.format).format_recommendations(&recs))
    }
}

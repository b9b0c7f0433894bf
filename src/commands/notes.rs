//! One-off note lookup for individual product pages.

use crate::config::Config;
use crate::format::Formatter;
use crate::site::{
    fetch_details, DetailOutcome, NoteExtractor, Product, ProductStub, SiteClient, SiteSource,
};
use anyhow::{Context, Result};

/// Fetches and prints the notes of one or more product pages.
pub struct NotesCommand {
    config: Config,
    extractor: NoteExtractor,
}

impl NotesCommand {
    /// Creates a new notes command.
    pub fn new(config: Config) -> Self {
        Self { config, extractor: NoteExtractor::default() }
    }

    /// Looks up every URL and returns formatted output.
    pub async fn execute(&self, urls: &[String]) -> Result<String> {
        let client = SiteClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_source(&client, urls).await
    }

    /// Looks up every URL with a provided source (for testing).
    ///
    /// Pages that fail to load are reported on stderr and left out. Relative
    /// paths such as `/products/598` resolve against the site root.
    pub async fn execute_with_source(
        &self,
        source: &(impl SiteSource + ?Sized),
        urls: &[String],
    ) -> Result<String> {
        let mut products = Vec::new();

        for url in urls {
            let url = self.resolve(url);

            match fetch_details(source, &self.extractor, &url).await {
                DetailOutcome::Found(notes) => {
                    products.push(Product::new(ProductStub::new(slug(&url), url.as_str()), notes))
                }
                DetailOutcome::Failed { reason, .. } => {
                    eprintln!("Failed to fetch {}: {}", url, reason)
                }
            }
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&products))
    }

    fn resolve(&self, url: &str) -> String {
        let url = url.trim();
        if url.starts_with('/') {
            format!("{}{}", self.config.site_root.trim_end_matches('/'), url)
        } else {
            url.to_string()
        }
    }
}

/// Last path segment of a product URL, used as a display name.
fn slug(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path).to_string()
}

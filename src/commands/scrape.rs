//! Full catalogue scrape: paginate, enrich each stub, persist.

use crate::config::Config;
use crate::output::write_products;
use crate::rate_limit::{FixedDelay, RateLimiter};
use crate::site::{
    fetch_details, DetailOutcome, ListingParser, NoteExtractor, PaginationEnd, Paginator, Product,
    ProductCollection, SiteClient, SiteSource,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Products gathered by one pass over the listing, before persistence.
#[derive(Debug, Clone)]
pub struct ScrapeRun {
    pub products: ProductCollection,
    pub pages_visited: u32,
    pub detail_failures: usize,
    pub end: PaginationEnd,
}

/// Summary of a completed, persisted run.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    pub products: usize,
    pub pages_visited: u32,
    pub detail_failures: usize,
    pub end: PaginationEnd,
    pub output_path: PathBuf,
}

/// Drives the paginator and detail fetcher, then writes the collection.
pub struct ScrapeCommand {
    config: Config,
    parser: ListingParser,
    extractor: NoteExtractor,
    start_page: u32,
}

impl ScrapeCommand {
    /// Creates a scrape command; fails if a name pattern does not compile.
    pub fn new(config: Config) -> Result<Self> {
        let parser = ListingParser::from_config(&config)?;
        Ok(Self { config, parser, extractor: NoteExtractor::default(), start_page: 1 })
    }

    /// Replaces the note extraction strategies.
    pub fn with_extractor(mut self, extractor: NoteExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Begins pagination at `page` instead of 1.
    pub fn starting_at(mut self, page: u32) -> Self {
        self.start_page = page.max(1);
        self
    }

    /// Scrapes the live site with the configured delay and writes the output.
    pub async fn execute(&self) -> Result<ScrapeReport> {
        let client = SiteClient::new(&self.config).await.context("Failed to create HTTP client")?;
        let limiter = FixedDelay::from_config(&self.config);

        self.run_with(&client, &limiter).await
    }

    /// Scrapes with the provided source and limiter, then writes the output.
    ///
    /// The collection is written however pagination ended, so a listing
    /// failure part-way through still persists everything gathered so far.
    pub async fn run_with(
        &self,
        source: &(impl SiteSource + ?Sized),
        limiter: &(impl RateLimiter + ?Sized),
    ) -> Result<ScrapeReport> {
        let run = self.collect(source, limiter).await;

        if let PaginationEnd::Failed { page, .. } = &run.end {
            warn!("Pagination stopped early at page {}; saving {} products", page, run.products.len());
        }

        let output_path = &self.config.output_path;
        write_products(output_path, &run.products)
            .with_context(|| format!("Failed to save products to {}", output_path.display()))?;

        info!("Total products saved: {}", run.products.len());
        info!("Output saved to: {}", output_path.display());

        Ok(ScrapeReport {
            products: run.products.len(),
            pages_visited: run.pages_visited,
            detail_failures: run.detail_failures,
            end: run.end,
            output_path: output_path.clone(),
        })
    }

    /// Walks every listing page and enriches each stub in listing order,
    /// waiting on `limiter` after every product.
    pub async fn collect(
        &self,
        source: &(impl SiteSource + ?Sized),
        limiter: &(impl RateLimiter + ?Sized),
    ) -> ScrapeRun {
        let mut products = ProductCollection::new();
        let mut detail_failures = 0;

        let mut paginator = Paginator::new(source, &self.parser)
            .starting_at(self.start_page)
            .with_max_pages(self.config.max_pages);

        while let Some(batch) = paginator.next_batch().await {
            for stub in batch.stubs {
                match fetch_details(source, &self.extractor, &stub.url).await {
                    DetailOutcome::Found(notes) => products.push(Product::new(stub, notes)),
                    DetailOutcome::Failed { .. } => detail_failures += 1,
                }

                limiter.wait().await;
            }
        }

        let end = paginator
            .end()
            .cloned()
            .unwrap_or(PaginationEnd::Exhausted { page: paginator.next_page() });

        ScrapeRun { products, pages_visited: paginator.pages_visited(), detail_failures, end }
    }
}

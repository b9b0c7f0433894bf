//! Collection listing page parser.

use crate::config::Config;
use crate::filters::{CompleteStubFilter, FilterChain, NamePatternFilter};
use crate::site::models::ProductStub;
use crate::site::selectors::listing;
use anyhow::Result;
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// What one listing page contained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingPage {
    /// The page carried the end-of-pagination marker.
    End,
    /// Grid items that passed the filters, in page order.
    Items {
        stubs: Vec<ProductStub>,
        /// Grid items dropped by the filters
        rejected: usize,
    },
}

impl ListingPage {
    pub fn is_end(&self) -> bool {
        matches!(self, ListingPage::End)
    }

    /// Accepted stubs; empty for the end marker.
    pub fn stubs(&self) -> &[ProductStub] {
        match self {
            ListingPage::End => &[],
            ListingPage::Items { stubs, .. } => stubs,
        }
    }
}

/// Parses listing pages into product stubs.
pub struct ListingParser {
    site_root: String,
    filters: FilterChain,
}

impl ListingParser {
    /// Creates a parser joining hrefs onto `site_root` and applying `filters`.
    pub fn new(site_root: impl Into<String>, filters: FilterChain) -> Self {
        Self { site_root: site_root.into(), filters }
    }

    /// Builds the parser from configuration, compiling its name patterns.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut filters = FilterChain::new();
        filters.add(CompleteStubFilter);
        filters.add(NamePatternFilter::new(&config.name_patterns)?);

        debug!("Listing filters: {}", filters.descriptions().join(", "));
        Ok(Self::new(config.site_root.clone(), filters))
    }

    /// Parses one listing page.
    pub fn parse(&self, html: &str) -> ListingPage {
        let document = Html::parse_document(html);

        let title = document
            .select(&listing::TITLE)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        if title.contains(listing::END_MARKER) {
            debug!("End-of-pagination marker found");
            return ListingPage::End;
        }

        let candidates: Vec<ProductStub> =
            document.select(&listing::GRID_ITEM).filter_map(|item| self.parse_item(item)).collect();
        let total = document.select(&listing::GRID_ITEM).count();

        let (stubs, _) = self.filters.partition(candidates);
        let rejected = total - stubs.len();

        debug!("Parsed {} stubs ({} grid items rejected)", stubs.len(), rejected);
        ListingPage::Items { stubs, rejected }
    }

    /// Reads the first product link of a grid item.
    fn parse_item(&self, item: ElementRef) -> Option<ProductStub> {
        let Some(anchor) = item.select(&listing::PRODUCT_LINK).next() else {
            trace!("Grid item without product link");
            return None;
        };

        let name = anchor.text().collect::<String>().trim().to_string();
        let href = anchor.value().attr("href").unwrap_or_default();

        if name.is_empty() || href.is_empty() {
            return None;
        }

        Some(ProductStub::new(name, format!("{}{}", self.site_root.trim_end_matches('/'), href)))
    }
}

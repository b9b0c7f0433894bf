//! Sequential walk over collection listing pages.

use crate::site::client::SiteSource;
use crate::site::listing::{ListingPage, ListingParser};
use crate::site::models::ProductStub;
use serde::Serialize;
use tracing::{debug, error, info};

/// Why pagination stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaginationEnd {
    /// `page` carried the end-of-pagination marker.
    Exhausted { page: u32 },
    /// Fetching `page` failed.
    Failed { page: u32, reason: String },
    /// The configured page limit was reached after `page`.
    PageLimit { page: u32 },
}

impl PaginationEnd {
    /// True when pagination ran to the site's end marker.
    pub fn is_complete(&self) -> bool {
        matches!(self, PaginationEnd::Exhausted { .. })
    }
}

/// Stubs accepted from one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBatch {
    pub page: u32,
    pub stubs: Vec<ProductStub>,
}

/// Yields one batch per listing page until the end marker, a fetch failure,
/// or the page limit. Can start from any page number.
pub struct Paginator<'a, S: ?Sized> {
    source: &'a S,
    parser: &'a ListingParser,
    next_page: u32,
    max_pages: Option<u32>,
    visited: u32,
    end: Option<PaginationEnd>,
}

impl<'a, S: SiteSource + ?Sized> Paginator<'a, S> {
    /// Creates a paginator starting at page 1.
    pub fn new(source: &'a S, parser: &'a ListingParser) -> Self {
        Self { source, parser, next_page: 1, max_pages: None, visited: 0, end: None }
    }

    /// Starts (or restarts) the walk at `page`.
    pub fn starting_at(mut self, page: u32) -> Self {
        self.next_page = page.max(1);
        self.visited = 0;
        self.end = None;
        self
    }

    /// Stops after `max_pages` pages have been fetched.
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetches the next page. Returns `None` once pagination has ended; see
    /// [`Paginator::end`] for the reason.
    pub async fn next_batch(&mut self) -> Option<PageBatch> {
        if self.end.is_some() {
            return None;
        }

        if let Some(max) = self.max_pages {
            if self.visited >= max {
                let last = self.next_page.saturating_sub(1);
                info!("Page limit of {} reached after page {}", max, last);
                self.end = Some(PaginationEnd::PageLimit { page: last });
                return None;
            }
        }

        let page = self.next_page;
        let html = match self.source.listing(page).await {
            Ok(html) => html,
            Err(e) => {
                error!("Error on page {}: {:#}", page, e);
                self.end = Some(PaginationEnd::Failed { page, reason: format!("{:#}", e) });
                return None;
            }
        };
        self.visited += 1;

        match self.parser.parse(&html) {
            ListingPage::End => {
                info!("No products found on page {}, pagination complete", page);
                self.end = Some(PaginationEnd::Exhausted { page });
                None
            }
            ListingPage::Items { stubs, rejected } => {
                debug!("Page {}: {} stubs accepted, {} rejected", page, stubs.len(), rejected);
                self.next_page = page + 1;
                Some(PageBatch { page, stubs })
            }
        }
    }

    /// Why pagination stopped, once it has.
    pub fn end(&self) -> Option<&PaginationEnd> {
        self.end.as_ref()
    }

    /// Page the next call will fetch.
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Listing pages fetched so far, including the terminating one.
    pub fn pages_visited(&self) -> u32 {
        self.visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Serves listing pages from a list; `None` entries fail.
    struct MockSource {
        pages: Vec<Option<String>>,
        calls: AtomicU32,
    }

    impl MockSource {
        fn new(pages: Vec<Option<String>>) -> Self {
            Self { pages, calls: AtomicU32::new(0) }
        }

        fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SiteSource for MockSource {
        async fn listing(&self, page: u32) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.pages.get((page - 1) as usize) {
                Some(Some(html)) => Ok(html.clone()),
                Some(None) => anyhow::bail!("Request failed with status: 502 Bad Gateway"),
                None => Ok(end_page()),
            }
        }

        async fn product(&self, _url: &str) -> Result<String> {
            Ok(String::new())
        }
    }

    fn listing_page(names: &[&str]) -> String {
        let mut html = String::from(r#"<h1 class="title">Shop all</h1><ul id="product-grid">"#);
        for (i, name) in names.iter().enumerate() {
            html.push_str(&format!(
                r#"<li class="grid__item"><a href="/products/p{i}">{name}</a></li>"#
            ));
        }
        html.push_str("</ul>");
        html
    }

    fn end_page() -> String {
        r#"<h1 class="title">No products found</h1>"#.to_string()
    }

    fn parser() -> ListingParser {
        ListingParser::from_config(&Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_walks_until_end_marker() {
        let source = MockSource::new(vec![
            Some(listing_page(&["1 - Inspired by A", "Mystery Blend"])),
            Some(listing_page(&["2 - Inspired by B"])),
            Some(end_page()),
        ]);
        let parser = parser();
        let mut paginator = Paginator::new(&source, &parser);

        let first = paginator.next_batch().await.unwrap();
        assert_eq!(first.page, 1);
        assert_eq!(first.stubs.len(), 1);
        assert_eq!(first.stubs[0].name, "1 - Inspired by A");

        let second = paginator.next_batch().await.unwrap();
        assert_eq!(second.page, 2);

        assert!(paginator.next_batch().await.is_none());
        assert_eq!(paginator.end(), Some(&PaginationEnd::Exhausted { page: 3 }));
        assert!(paginator.end().unwrap().is_complete());
        assert_eq!(paginator.pages_visited(), 3);

        // Finished paginators make no further requests
        assert!(paginator.next_batch().await.is_none());
        assert_eq!(source.call_count(), 3);
    }

    #[tokio::test]
    async fn test_empty_page_does_not_end_pagination() {
        let source = MockSource::new(vec![
            Some(listing_page(&["Gift Card"])),
            Some(listing_page(&["3 - Inspired by C"])),
            Some(end_page()),
        ]);
        let parser = parser();
        let mut paginator = Paginator::new(&source, &parser);

        let first = paginator.next_batch().await.unwrap();
        assert!(first.stubs.is_empty());

        let second = paginator.next_batch().await.unwrap();
        assert_eq!(second.stubs[0].name, "3 - Inspired by C");

        assert!(paginator.next_batch().await.is_none());
        assert!(paginator.end().unwrap().is_complete());
    }

    #[tokio::test]
    async fn test_fetch_failure_ends_pagination() {
        let source = MockSource::new(vec![Some(listing_page(&["1 - Inspired by A"])), None]);
        let parser = parser();
        let mut paginator = Paginator::new(&source, &parser);

        assert!(paginator.next_batch().await.is_some());
        assert!(paginator.next_batch().await.is_none());

        match paginator.end() {
            Some(PaginationEnd::Failed { page, reason }) => {
                assert_eq!(*page, 2);
                assert!(reason.contains("502"));
            }
            other => panic!("unexpected end: {:?}", other),
        }
        assert_eq!(paginator.pages_visited(), 1);
    }

    #[tokio::test]
    async fn test_restart_at_page() {
        let source = MockSource::new(vec![
            Some(listing_page(&["1 - Inspired by A"])),
            Some(listing_page(&["2 - Inspired by B"])),
            Some(end_page()),
        ]);
        let parser = parser();
        let mut paginator = Paginator::new(&source, &parser).starting_at(2);
        assert_eq!(paginator.next_page(), 2);

        let batch = paginator.next_batch().await.unwrap();
        assert_eq!(batch.page, 2);
        assert_eq!(batch.stubs[0].name, "2 - Inspired by B");
        assert!(paginator.next_batch().await.is_none());
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_page_limit() {
        let source = MockSource::new(vec![
            Some(listing_page(&["1 - Inspired by A"])),
            Some(listing_page(&["2 - Inspired by B"])),
            Some(listing_page(&["3 - Inspired by C"])),
        ]);
        let parser = parser();
        let mut paginator = Paginator::new(&source, &parser).with_max_pages(Some(2));

        assert!(paginator.next_batch().await.is_some());
        assert!(paginator.next_batch().await.is_some());
        assert!(paginator.next_batch().await.is_none());
        assert_eq!(paginator.end(), Some(&PaginationEnd::PageLimit { page: 2 }));
        assert_eq!(source.call_count(), 2);
    }

    #[test]
    fn test_starting_at_zero_clamps() {
        let source = MockSource::new(Vec::new());
        let parser = parser();
        let paginator = Paginator::new(&source, &parser).starting_at(0);
        assert_eq!(paginator.next_page(), 1);
    }
}

//! Product detail fetching.

use crate::site::client::SiteSource;
use crate::site::models::FragranceNotes;
use crate::site::notes::NoteExtractor;
use tracing::{error, info};

/// Result of fetching one product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
    /// Page fetched; tiers that could not be found are empty strings.
    Found(FragranceNotes),
    /// The page could not be fetched. The product should be skipped.
    Failed { url: String, reason: String },
}

impl DetailOutcome {
    pub fn notes(self) -> Option<FragranceNotes> {
        match self {
            DetailOutcome::Found(notes) => Some(notes),
            DetailOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DetailOutcome::Failed { .. })
    }
}

/// Fetches a product page and extracts its notes. Never retries.
pub async fn fetch_details(
    source: &(impl SiteSource + ?Sized),
    extractor: &NoteExtractor,
    url: &str,
) -> DetailOutcome {
    info!("Scraping details for: {}", url);

    match source.product(url).await {
        Ok(html) => DetailOutcome::Found(extractor.extract_html(&html)),
        Err(e) => {
            error!("Error scraping product details from {}: {:#}", url, e);
            DetailOutcome::Failed { url: url.to_string(), reason: format!("{:#}", e) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;

    struct MockSource {
        product_html: Option<String>,
    }

    #[async_trait]
    impl SiteSource for MockSource {
        async fn listing(&self, _page: u32) -> Result<String> {
            Ok("<html></html>".to_string())
        }

        async fn product(&self, _url: &str) -> Result<String> {
            match &self.product_html {
                Some(html) => Ok(html.clone()),
                None => anyhow::bail!("Simulated network error"),
            }
        }
    }

    fn accordion_page(body: &str) -> String {
        let filler = "<div></div>".repeat(16);
        format!(
            r#"<html><body><section>{filler}<div class="product__accordion"><div>Notes</div><div>{body}</div></div></section></body></html>"#
        )
    }

    #[tokio::test]
    async fn test_found_notes() {
        let source = MockSource {
            product_html: Some(accordion_page(
                "Top Notes: Bergamot Middle Notes: Iris Bottom Notes: Amber",
            )),
        };

        let outcome = fetch_details(&source, &NoteExtractor::default(), "https://x/products/1").await;
        assert_eq!(outcome, DetailOutcome::Found(FragranceNotes::new("Bergamot", "Iris", "Amber")));
    }

    #[tokio::test]
    async fn test_found_with_empty_notes_is_not_failure() {
        let source = MockSource { product_html: Some("<html><body>No notes</body></html>".to_string()) };

        let outcome = fetch_details(&source, &NoteExtractor::default(), "https://x/products/1").await;
        assert!(!outcome.is_failed());
        assert_eq!(outcome.notes(), Some(FragranceNotes::default()));
    }

    #[tokio::test]
    async fn test_fetch_failure_marker() {
        let source = MockSource { product_html: None };

        let outcome = fetch_details(&source, &NoteExtractor::default(), "https://x/products/1").await;
        assert!(outcome.is_failed());
        match &outcome {
            DetailOutcome::Failed { url, reason } => {
                assert_eq!(url, "https://x/products/1");
                assert!(reason.contains("Simulated network error"));
            }
            DetailOutcome::Found(_) => panic!("expected failure"),
        }
        assert!(outcome.notes().is_none());
    }
}

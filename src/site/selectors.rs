//! CSS selectors for the storefront's listing and product templates.
//!
//! The product-page locators are tied to one theme build and break whenever
//! the store re-exports its template. Update them here and add a fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for collection listing pages.
pub mod listing {
    use super::*;

    /// Page title; carries the end-of-pagination marker.
    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".title").unwrap());

    /// Product card in the collection grid.
    pub static GRID_ITEM: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#product-grid li.grid__item").unwrap());

    /// Link to the product page inside a card.
    pub static PRODUCT_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a[href^='/products/']").unwrap());

    /// Title text shown when a page is past the last product.
    pub const END_MARKER: &str = "No products found";
}

/// Selectors for individual product pages.
pub mod product {
    use super::*;

    const NOTES_TAB: &str = "#ProductAccordion-collapsible_tab_EjJ84U-template--17212741648578__main";

    fn tier_locator(position: usize) -> Selector {
        Selector::parse(&format!(
            "{NOTES_TAB} > div:nth-child(1) > div:nth-child({position}) > div:nth-child(2) > div:nth-child(1) > p:nth-child(1)"
        ))
        .unwrap()
    }

    /// Top notes paragraph in the notes tab.
    pub static TOP_NOTES: LazyLock<Selector> = LazyLock::new(|| tier_locator(1));

    /// Middle notes paragraph in the notes tab.
    pub static MIDDLE_NOTES: LazyLock<Selector> = LazyLock::new(|| tier_locator(2));

    /// Bottom notes paragraph in the notes tab.
    pub static BOTTOM_NOTES: LazyLock<Selector> = LazyLock::new(|| tier_locator(3));

    /// Accordion body holding all three tiers as one block of text.
    pub static NOTES_ACCORDION: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("div.product__accordion:nth-child(17) > div:nth-child(2)").unwrap()
    });
}

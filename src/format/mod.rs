//! Console output for scrape reports and note lookups (table, JSON).

use crate::commands::scrape::ScrapeReport;
use crate::config::OutputFormat;
use crate::quiz::{Recommendation, Recommendations};
use crate::site::models::Product;
use crate::site::paginator::PaginationEnd;

/// Formats results for the terminal.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the summary of a scrape run.
    pub fn format_report(&self, report: &ScrapeReport) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => self.table_report(report),
        }
    }

    /// Formats products, e.g. from a notes lookup.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Table => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => {
                products.iter().map(|p| self.table_product(p)).collect::<Vec<_>>().join("\n\n")
            }
        }
    }

    /// Formats a parsed recommendation reply.
    pub fn format_recommendations(&self, recs: &Recommendations) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(recs).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => {
                let mut lines = vec![format!("Your scent profile: {}", recs.display_profile_name())];
                push_section(&mut lines, "Matches from the collection", &recs.matches);
                push_section(&mut lines, "Wildcards", &recs.wildcards);
                lines.join("\n")
            }
        }
    }

    fn table_report(&self, report: &ScrapeReport) -> String {
        let mut lines = vec![
            "Scraping complete!".to_string(),
            format!("Total products saved: {}", report.products),
            format!("Output saved to: {}", report.output_path.display()),
            format!("Pages visited: {}", report.pages_visited),
        ];

        if report.detail_failures > 0 {
            lines.push(format!("Products skipped after fetch errors: {}", report.detail_failures));
        }

        lines.push(format!("Stopped: {}", describe_end(&report.end)));
        lines.join("\n")
    }

    fn table_product(&self, product: &Product) -> String {
        let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

        [
            format!("Name:    {}", product.name()),
            format!("URL:     {}", product.url()),
            format!("Top:     {}", or_dash(&product.notes.top_notes)),
            format!("Middle:  {}", or_dash(&product.notes.middle_notes)),
            format!("Bottom:  {}", or_dash(&product.notes.bottom_notes)),
        ]
        .join("\n")
    }
}

fn push_section(lines: &mut Vec<String>, title: &str, entries: &[Recommendation]) {
    lines.push(String::new());
    lines.push(format!("{}:", title));

    if entries.is_empty() {
        lines.push("  (none)".to_string());
    }
    for entry in entries {
        let maker =
            if entry.manufacturer.is_empty() { String::new() } else { format!(" ({})", entry.manufacturer) };
        lines.push(format!("  - {}{}", entry.name, maker));
        if !entry.description.is_empty() {
            lines.push(format!("    {}", entry.description));
        }
    }
}

fn describe_end(end: &PaginationEnd) -> String {
    match end {
        PaginationEnd::Exhausted { page } => format!("no products on page {}", page),
        PaginationEnd::Failed { page, reason } => format!("page {} failed ({})", page, reason),
        PaginationEnd::PageLimit { page } => format!("page limit reached at page {}", page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::models::{FragranceNotes, ProductStub};
    use std::path::PathBuf;

    fn make_report(end: PaginationEnd, failures: usize) -> ScrapeReport {
        ScrapeReport {
            products: 12,
            pages_visited: 3,
            detail_failures: failures,
            end,
            output_path: PathBuf::from("data/products.json"),
        }
    }

    fn make_product() -> Product {
        Product::new(
            ProductStub::new("598 - Inspired by Mont Blanc", "https://example.com/products/598"),
            FragranceNotes::new("Bergamot", "", "Leather"),
        )
    }

    #[test]
    fn test_table_report() {
        let out = Formatter::new(OutputFormat::Table)
            .format_report(&make_report(PaginationEnd::Exhausted { page: 3 }, 0));
        assert!(out.contains("Total products saved: 12"));
        assert!(out.contains("Output saved to: data/products.json"));
        assert!(out.contains("no products on page 3"));
        assert!(!out.contains("skipped"));
    }

    #[test]
    fn test_table_report_with_failures() {
        let end = PaginationEnd::Failed { page: 2, reason: "timeout".to_string() };
        let out = Formatter::new(OutputFormat::Table).format_report(&make_report(end, 2));
        assert!(out.contains("Products skipped after fetch errors: 2"));
        assert!(out.contains("page 2 failed (timeout)"));
    }

    #[test]
    fn test_json_report() {
        let out = Formatter::new(OutputFormat::Json)
            .format_report(&make_report(PaginationEnd::PageLimit { page: 5 }, 0));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["products"], 12);
        assert_eq!(json["end"]["status"], "page_limit");
        assert_eq!(json["end"]["page"], 5);
    }

    #[test]
    fn test_table_products_marks_missing_tiers() {
        let out = Formatter::new(OutputFormat::Table).format_products(&[make_product()]);
        assert!(out.contains("Name:    598 - Inspired by Mont Blanc"));
        assert!(out.contains("Middle:  -"));
        assert!(out.contains("Bottom:  Leather"));
    }

    #[test]
    fn test_empty_products() {
        assert_eq!(Formatter::new(OutputFormat::Json).format_products(&[]), "[]");
        assert_eq!(Formatter::new(OutputFormat::Table).format_products(&[]), "No products found.");
    }

    #[test]
    fn test_table_recommendations() {
        let recs = Recommendations {
            profile_name: String::new(),
            matches: vec![Recommendation {
                name: "598 - Inspired by Mont Blanc".to_string(),
                manufacturer: "The Scent Reserve".to_string(),
                description: "Woody.".to_string(),
            }],
            wildcards: Vec::new(),
        };

        let out = Formatter::new(OutputFormat::Table).format_recommendations(&recs);
        assert!(out.starts_with("Your scent profile: Unique Blend"));
        assert!(out.contains("  - 598 - Inspired by Mont Blanc (The Scent Reserve)"));
        assert!(out.contains("    Woody."));
        assert!(out.contains("Wildcards:\n  (none)"));
    }

    #[test]
    fn test_json_products() {
        let out = Formatter::new(OutputFormat::Json).format_products(&[make_product()]);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["topNotes"], "Bergamot");
    }
}

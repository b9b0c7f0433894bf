//! Fragrance note extraction from product pages.
//!
//! Extraction runs an ordered list of strategies over the parsed page. The
//! first strategy that finds all three tiers wins; otherwise the last partial
//! result is kept. Whatever survives is passed through [`sanitize`].

use crate::site::models::{FragranceNotes, NoteTier};
use crate::site::selectors::product;
use regex_lite::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, trace};

// Whitespace as browsers see it; `\s` alone is ASCII-only and misses `&nbsp;`.
const WS: &str = r"[\s\x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

/// Strips a leading `note_type` label (case-insensitive, optional colon) and trims.
///
/// ```
/// use scent_scraper::site::notes::sanitize;
///
/// assert_eq!(sanitize("Top Notes: Bergamot, Lemon", "Top Notes"), "Bergamot, Lemon");
/// assert_eq!(sanitize("bergamot", "Top Notes"), "bergamot");
/// ```
pub fn sanitize(raw_note: &str, note_type: &str) -> String {
    if raw_note.is_empty() {
        return String::new();
    }

    let pattern = format!(r"(?i)^{WS}*{}{WS}*:?{WS}*", regex_lite::escape(note_type));
    match Regex::new(&pattern) {
        Ok(re) => re.replace(raw_note, "").trim().to_string(),
        Err(_) => raw_note.trim().to_string(),
    }
}

/// One way of pulling notes out of a product page.
pub trait NoteStrategy: Send + Sync {
    /// Returns the raw notes found, or `None` when nothing was found.
    fn extract(&self, document: &Html) -> Option<FragranceNotes>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Reads each tier from its own fixed location in the notes tab.
pub struct TabLocators;

impl TabLocators {
    fn selector(tier: NoteTier) -> &'static Selector {
        match tier {
            NoteTier::Top => &product::TOP_NOTES,
            NoteTier::Middle => &product::MIDDLE_NOTES,
            NoteTier::Bottom => &product::BOTTOM_NOTES,
        }
    }
}

impl NoteStrategy for TabLocators {
    fn extract(&self, document: &Html) -> Option<FragranceNotes> {
        let mut notes = FragranceNotes::default();

        for tier in NoteTier::ALL {
            let text = document
                .select(Self::selector(tier))
                .next()
                .map(|e| e.text().collect::<String>().trim().to_string())
                .unwrap_or_default();
            *notes.get_mut(tier) = text;
        }

        if notes.is_empty() {
            None
        } else {
            Some(notes)
        }
    }

    fn name(&self) -> &'static str {
        "tab-locators"
    }
}

static ACCORDION_NOTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Top Notes:(.*?)Middle Notes:(.*?)Bottom Notes:(.*)").unwrap()
});

/// Matches all three labelled tiers inside the accordion's combined text.
pub struct AccordionText;

impl AccordionText {
    /// Splits labelled text into its three tiers.
    pub fn split(text: &str) -> Option<FragranceNotes> {
        let caps = ACCORDION_NOTES.captures(text)?;
        let group = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or_default();
        Some(FragranceNotes::new(group(1), group(2), group(3)))
    }
}

impl NoteStrategy for AccordionText {
    fn extract(&self, document: &Html) -> Option<FragranceNotes> {
        let text: String =
            document.select(&product::NOTES_ACCORDION).flat_map(|e| e.text()).collect();

        Self::split(&text)
    }

    fn name(&self) -> &'static str {
        "accordion-text"
    }
}

/// Ordered list of strategies plus the final sanitising step.
pub struct NoteExtractor {
    strategies: Vec<Box<dyn NoteStrategy>>,
}

impl NoteExtractor {
    /// Creates an extractor with no strategies.
    pub fn empty() -> Self {
        Self { strategies: Vec::new() }
    }

    /// Appends a strategy; earlier strategies take precedence.
    pub fn with(mut self, strategy: impl NoteStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Number of configured strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Extracts sanitized notes from a product page. Never fails: tiers that
    /// no strategy could find are left empty.
    pub fn extract_html(&self, html: &str) -> FragranceNotes {
        let document = Html::parse_document(html);
        self.extract(&document)
    }

    pub fn extract(&self, document: &Html) -> FragranceNotes {
        let mut best: Option<FragranceNotes> = None;

        for strategy in &self.strategies {
            match strategy.extract(document) {
                Some(notes) if notes.is_complete() => {
                    trace!("Strategy {} found all tiers", strategy.name());
                    return Self::clean(notes);
                }
                Some(notes) => {
                    debug!("Strategy {} found partial notes", strategy.name());
                    best = Some(notes);
                }
                None => trace!("Strategy {} found nothing", strategy.name()),
            }
        }

        best.map(Self::clean).unwrap_or_default()
    }

    fn clean(raw: FragranceNotes) -> FragranceNotes {
        let mut notes = FragranceNotes::default();
        for tier in NoteTier::ALL {
            *notes.get_mut(tier) = sanitize(raw.get(tier), tier.label());
        }
        notes
    }
}

impl Default for NoteExtractor {
    fn default() -> Self {
        Self::empty().with(TabLocators).with(AccordionText)
    }
}

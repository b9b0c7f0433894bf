//! Data models for listing stubs, fragrance notes, and scraped products.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Minimal product identity discovered on a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStub {
    /// Product name as shown in the grid
    pub name: String,
    /// Absolute product page URL
    pub url: String,
}

impl ProductStub {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into() }
    }
}

/// One of the three fragrance note categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteTier {
    Top,
    Middle,
    Bottom,
}

impl NoteTier {
    pub const ALL: [NoteTier; 3] = [NoteTier::Top, NoteTier::Middle, NoteTier::Bottom];

    /// Label the site prints in front of the notes.
    pub fn label(&self) -> &'static str {
        match self {
            NoteTier::Top => "Top Notes",
            NoteTier::Middle => "Middle Notes",
            NoteTier::Bottom => "Bottom Notes",
        }
    }
}

/// Top, middle and bottom notes. An empty string means "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragranceNotes {
    pub top_notes: String,
    pub middle_notes: String,
    pub bottom_notes: String,
}

impl FragranceNotes {
    pub fn new(
        top: impl Into<String>,
        middle: impl Into<String>,
        bottom: impl Into<String>,
    ) -> Self {
        Self { top_notes: top.into(), middle_notes: middle.into(), bottom_notes: bottom.into() }
    }

    pub fn get(&self, tier: NoteTier) -> &str {
        match tier {
            NoteTier::Top => &self.top_notes,
            NoteTier::Middle => &self.middle_notes,
            NoteTier::Bottom => &self.bottom_notes,
        }
    }

    pub fn get_mut(&mut self, tier: NoteTier) -> &mut String {
        match tier {
            NoteTier::Top => &mut self.top_notes,
            NoteTier::Middle => &mut self.middle_notes,
            NoteTier::Bottom => &mut self.bottom_notes,
        }
    }

    /// True when every tier has text.
    pub fn is_complete(&self) -> bool {
        NoteTier::ALL.iter().all(|tier| !self.get(*tier).trim().is_empty())
    }

    /// True when no tier has text.
    pub fn is_empty(&self) -> bool {
        NoteTier::ALL.iter().all(|tier| self.get(*tier).trim().is_empty())
    }
}

/// A stub enriched with its notes; the unit written to the output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten)]
    pub stub: ProductStub,
    #[serde(flatten)]
    pub notes: FragranceNotes,
    #[serde(serialize_with = "serialize_timestamp", deserialize_with = "deserialize_timestamp")]
    pub last_updated: DateTime<Utc>,
}

impl Product {
    /// Merges a stub with its notes, stamped with the current time.
    pub fn new(stub: ProductStub, notes: FragranceNotes) -> Self {
        Self::at(stub, notes, Utc::now())
    }

    pub fn at(stub: ProductStub, notes: FragranceNotes, last_updated: DateTime<Utc>) -> Self {
        Self { stub, notes, last_updated }
    }

    pub fn name(&self) -> &str {
        &self.stub.name
    }

    pub fn url(&self) -> &str {
        &self.stub.url
    }
}

// Millisecond precision with a trailing `Z`, e.g. 2025-04-21T09:30:00.000Z
fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

/// Ordered products from one run.
pub type ProductCollection = Vec<Product>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_test_product() -> Product {
        Product::at(
            ProductStub::new(
                "598 - Inspired by Mont Blanc",
                "https://thescentreserve.com/products/598",
            ),
            FragranceNotes::new("Bergamot", "Vetiver", "Leather"),
            Utc.with_ymd_and_hms(2025, 4, 21, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_note_tier_labels() {
        assert_eq!(NoteTier::Top.label(), "Top Notes");
        assert_eq!(NoteTier::Middle.label(), "Middle Notes");
        assert_eq!(NoteTier::Bottom.label(), "Bottom Notes");
    }

    #[test]
    fn test_notes_completeness() {
        assert!(FragranceNotes::new("a", "b", "c").is_complete());
        assert!(!FragranceNotes::new("a", "", "c").is_complete());
        assert!(!FragranceNotes::new("a", "  ", "c").is_complete());
        assert!(FragranceNotes::default().is_empty());
        assert!(!FragranceNotes::new("", "", "c").is_empty());
    }

    #[test]
    fn test_notes_get_mut() {
        let mut notes = FragranceNotes::default();
        notes.get_mut(NoteTier::Middle).push_str("Rose");
        assert_eq!(notes.get(NoteTier::Middle), "Rose");
        assert_eq!(notes.middle_notes, "Rose");
    }

    #[test]
    fn test_product_serializes_flat_camel_case() {
        let json = serde_json::to_value(make_test_product()).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 6);
        assert_eq!(obj["name"], "598 - Inspired by Mont Blanc");
        assert_eq!(obj["url"], "https://thescentreserve.com/products/598");
        assert_eq!(obj["topNotes"], "Bergamot");
        assert_eq!(obj["middleNotes"], "Vetiver");
        assert_eq!(obj["bottomNotes"], "Leather");
        assert_eq!(obj["lastUpdated"], "2025-04-21T09:30:00.000Z");
    }

    #[test]
    fn test_empty_notes_serialize_as_strings() {
        let product = Product::at(
            ProductStub::new("1 - Inspired by X", "https://example.com/products/1"),
            FragranceNotes::default(),
            Utc::now(),
        );
        let json = serde_json::to_value(product).unwrap();
        assert_eq!(json["topNotes"], "");
        assert_eq!(json["middleNotes"], "");
        assert_eq!(json["bottomNotes"], "");
    }

    #[test]
    fn test_product_deserializes_from_file_shape() {
        let raw = r#"{
            "name": "12 x 40 - Blended Inspired by Something",
            "url": "https://thescentreserve.com/products/12x40",
            "topNotes": "Pear",
            "middleNotes": "",
            "bottomNotes": "Musk",
            "lastUpdated": "2025-04-21T10:00:00.123Z"
        }"#;

        let product: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(product.name(), "12 x 40 - Blended Inspired by Something");
        assert_eq!(product.notes.middle_notes, "");
        assert_eq!(product.last_updated.timestamp_subsec_millis(), 123);
    }
}

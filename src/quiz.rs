//! Data contract shared with the recommendation quiz.
//!
//! The quiz reads the product file, snaps each slider (1-100) to a 1-10
//! bucket, and posts both to a hosted chat model. This module owns the shapes
//! on either side of that call so the scraper output stays compatible.

use crate::site::models::Product;
use anyhow::{Context, Result};
use serde::de;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Profile name shown when the reply leaves it blank.
pub const DEFAULT_PROFILE_NAME: &str = "Unique Blend";

/// Snaps a raw slider value to the nearest tenth, clamped to 1..=10.
pub fn soft_snap(raw: i64) -> u8 {
    ((raw.clamp(0, 100) + 5) / 10).clamp(1, 10) as u8
}

/// Question number to snapped answer, serialized as `{"q1": 6, "q2": 3, ...}`
/// in question order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(BTreeMap<usize, u8>);

impl Answers {
    /// Builds answers from raw slider values in question order.
    pub fn from_raw(values: &[i64]) -> Self {
        Self(values.iter().enumerate().map(|(i, v)| (i + 1, soft_snap(*v))).collect())
    }

    /// Records the raw value for question `index` (1-based).
    pub fn set(&mut self, index: usize, raw: i64) {
        self.0.insert(index, soft_snap(raw));
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Answers {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (index, value) in &self.0 {
            map.serialize_entry(&format!("q{}", index), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Answers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, u8>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, value)| {
                key.strip_prefix('q')
                    .and_then(|n| n.parse::<usize>().ok())
                    .map(|index| (index, value))
                    .ok_or_else(|| {
                        <D::Error as de::Error>::custom(format!("invalid question id: {}", key))
                    })
            })
            .collect::<std::result::Result<BTreeMap<_, _>, _>>()
            .map(Self)
    }
}

/// Payload embedded in the prompt: the full inventory plus the answers.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationRequest<'a> {
    pub inventory: &'a [Product],
    pub answers: &'a Answers,
}

impl<'a> RecommendationRequest<'a> {
    pub fn new(inventory: &'a [Product], answers: &'a Answers) -> Self {
        Self { inventory, answers }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to encode recommendation request")
    }
}

/// One suggested fragrance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    pub name: String,
    pub manufacturer: String,
    pub description: String,
}

/// The model's reply: a profile name, in-inventory matches, and outside picks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recommendations {
    pub profile_name: String,
    pub matches: Vec<Recommendation>,
    pub wildcards: Vec<Recommendation>,
}

impl Recommendations {
    /// Parses a chat reply. Prose or code fences around the JSON object are
    /// ignored.
    pub fn from_reply(reply: &str) -> Result<Self> {
        let start = reply.find('{').context("Reply contains no JSON object")?;
        let end = reply.rfind('}').context("Reply contains no JSON object")?;
        if end < start {
            anyhow::bail!("Reply contains no JSON object");
        }

        serde_json::from_str(&reply[start..=end]).context("Failed to parse recommendation reply")
    }

    pub fn display_profile_name(&self) -> &str {
        if self.profile_name.trim().is_empty() {
            DEFAULT_PROFILE_NAME
        } else {
            &self.profile_name
        }
    }
}

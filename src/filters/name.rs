//! Product-name pattern filtering.

use super::Filter;
use crate::site::models::ProductStub;
use anyhow::{Context, Result};
use regex_lite::Regex;

/// The two numbered "Inspired by" naming schemes used by the store.
pub const DEFAULT_PATTERNS: [&str; 2] =
    [r"(?i)^\d+\s*-\s*Inspired by.+", r"(?i)^\d+\s*x\s*\d+\s*-\s*Blended Inspired by.+"];

/// Accepts stubs whose name matches at least one pattern.
pub struct NamePatternFilter {
    patterns: Vec<Regex>,
}

impl NamePatternFilter {
    /// Compiles the given patterns.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).with_context(|| format!("Invalid name pattern: {}", p))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Filter built from [`DEFAULT_PATTERNS`].
    pub fn defaults() -> Self {
        Self { patterns: DEFAULT_PATTERNS.iter().map(|p| Regex::new(p).unwrap()).collect() }
    }

    /// Returns true if the name matches any pattern.
    pub fn accepts(&self, name: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(name))
    }
}

impl Filter for NamePatternFilter {
    fn matches(&self, stub: &ProductStub) -> bool {
        self.accepts(&stub.name)
    }

    fn description(&self) -> String {
        let patterns: Vec<_> = self.patterns.iter().map(|re| re.as_str()).collect();
        format!("Name matches one of: {}", patterns.join(" | "))
    }
}

//! Listing filters deciding which grid items become product stubs.

pub mod name;

use crate::site::models::ProductStub;

pub use name::NamePatternFilter;

/// Trait for filtering listing stubs.
pub trait Filter: Send + Sync {
    /// Returns true if the stub passes the filter.
    fn matches(&self, stub: &ProductStub) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a stub passes all filters.
    pub fn matches(&self, stub: &ProductStub) -> bool {
        self.filters.iter().all(|f| f.matches(stub))
    }

    /// Splits stubs into accepted and rejected, keeping order.
    pub fn partition(&self, stubs: Vec<ProductStub>) -> (Vec<ProductStub>, Vec<ProductStub>) {
        stubs.into_iter().partition(|s| self.matches(s))
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter that drops stubs with a blank name or URL.
pub struct CompleteStubFilter;

impl Filter for CompleteStubFilter {
    fn matches(&self, stub: &ProductStub) -> bool {
        !stub.name.trim().is_empty() && !stub.url.trim().is_empty()
    }

    fn description(&self) -> String {
        "Name and URL present".to_string()
    }
}

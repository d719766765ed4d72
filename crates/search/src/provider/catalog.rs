//! In-memory catalog provider
//!
//! Matches a query against item titles: every whitespace-separated term must
//! occur in the title, case-insensitively. Results keep catalog order.

use super::{RawResult, SearchProvider};
use crate::ranking::Candidate;
use friendly_common::errors::{AppError, Result};
use tracing::debug;

/// Provider answering from a fixed list of items
pub struct CatalogProvider {
    /// Normalized items with their lowercased titles
    items: Vec<(String, Candidate)>,
}

impl CatalogProvider {
    /// Build from raw records; incomplete records are dropped up front
    pub fn new(records: impl IntoIterator<Item = RawResult>, default_popularity: f64) -> Self {
        let items = records
            .into_iter()
            .filter_map(|raw| raw.normalize(default_popularity))
            .map(|candidate| (candidate.title.to_lowercase(), candidate))
            .collect();
        Self { items }
    }

    /// Number of searchable items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn matches(&self, query: &str) -> Result<Vec<Candidate>> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Err(AppError::Validation {
                message: "query must contain at least one term".to_string(),
                field: Some("query".to_string()),
            });
        }

        Ok(self
            .items
            .iter()
            .filter(|(title, _)| terms.iter().all(|term| title.contains(term.as_str())))
            .map(|(_, candidate)| candidate.clone())
            .collect())
    }
}

#[async_trait::async_trait]
impl SearchProvider for CatalogProvider {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>> {
        let results = self.matches(query)?;
        debug!(query = %query, matches = results.len(), "Catalog search");
        Ok(results)
    }

    fn name(&self) -> &str {
        "catalog"
    }
}

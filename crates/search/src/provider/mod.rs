//! Search provider seam
//!
//! A provider turns a query into candidate items. Provider records are
//! normalized before reaching the ranker:
//! - records without a title or id are dropped
//! - a missing or non-finite popularity becomes the neutral default

mod catalog;

pub use catalog::CatalogProvider;

use crate::ranking::Candidate;
use friendly_common::errors::Result;
use serde::{Deserialize, Serialize};

/// Item as reported by a provider, before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub id: Option<String>,

    /// Provider rating, absent when the item is unrated
    #[serde(default)]
    pub popularity: Option<f64>,
}

impl RawResult {
    /// Convert into a rankable candidate, `None` if title or id is missing
    pub fn normalize(self, default_popularity: f64) -> Option<Candidate> {
        let title = self.title?;
        let id = self.id?;
        let popularity = self
            .popularity
            .filter(|p| p.is_finite())
            .unwrap_or(default_popularity);
        Some(Candidate::new(title, id, popularity))
    }
}

/// Common trait for all search providers
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Candidates matching the query, in provider order
    async fn search(&self, query: &str) -> Result<Vec<Candidate>>;

    /// Short name used in logs and metrics
    fn name(&self) -> &str;
}

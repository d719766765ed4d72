//! Social relevance ranking
//!
//! Scores each candidate by who likes it, weighted by degree of friendship:
//! - the current user's own like carries the largest weight
//! - each further degree contributes half as much as the previous one
//! - items nobody in range likes fall back to provider popularity

mod affinity;
mod ranker;

pub use affinity::AffinityWeights;
pub use ranker::{rank, RelevanceRanker};

use crate::social::{ItemId, PersonId};
use serde::{Deserialize, Serialize};

/// Search result as handed over by the search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Display title
    pub title: String,

    /// Unique item key, shared with the like relation
    pub id: ItemId,

    /// Provider rating (e.g. 0.0 - 5.0)
    pub popularity: f64,
}

impl Candidate {
    pub fn new(title: impl Into<String>, id: impl Into<ItemId>, popularity: f64) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            popularity,
        }
    }
}

/// Candidate with its social affinity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub title: String,
    pub id: ItemId,
    pub popularity: f64,

    /// Weighted like count across degrees (0 when nobody in range likes it)
    pub affinity: f64,

    /// First-degree friends who like the item, in band order
    pub liked_by: Vec<PersonId>,
}

impl ScoredResult {
    /// Whether anyone in range (or the user) likes the item
    pub fn is_liked(&self) -> bool {
        self.affinity != 0.0
    }
}

//! Friendly Search
//!
//! Personalized re-ranking of search results:
//! - Distance bands over a directed friendship graph
//! - Affinity scoring from who liked each result
//! - Liked results first, unliked results by popularity
//! - Pluggable search providers and an HTTP surface

pub mod handlers;
pub mod provider;
pub mod ranking;
pub mod service;
pub mod social;

pub use provider::{CatalogProvider, RawResult, SearchProvider};
pub use ranking::{rank, AffinityWeights, Candidate, RelevanceRanker, ScoredResult};
pub use service::FriendlySearch;
pub use social::{expand, DistanceBands, FriendshipGraph, LikeRelation, SocialSnapshot};

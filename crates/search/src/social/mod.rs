//! Social graph snapshot and friendship distance expansion

mod expander;
mod graph;

pub use expander::{expand, DistanceBands};
pub use graph::{FriendshipGraph, ItemId, LikeRelation, PersonId};

use crate::provider::RawResult;
use friendly_common::errors::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Static snapshot of who is friends with whom and who likes what
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialSnapshot {
    /// Directed friendship edges
    pub friendships: FriendshipGraph,

    /// Liked item keys per person
    pub likes: LikeRelation,

    /// Items served by the in-memory search provider
    #[serde(default)]
    pub catalog: Vec<RawResult>,
}

impl SocialSnapshot {
    /// Parse a snapshot from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a snapshot file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Number of distinct people known to either relation
    pub fn person_count(&self) -> usize {
        let mut people: HashSet<&str> = self.friendships.people().map(|p| p.as_str()).collect();
        people.extend(self.likes.people().map(|p| p.as_str()));
        people.len()
    }
}

/// Snapshot of the sample network shipped under `fixtures/`
#[cfg(test)]
pub(crate) fn sample_snapshot() -> SocialSnapshot {
    SocialSnapshot::from_json_str(include_str!("../../fixtures/sample_network.json"))
        .expect("sample fixture parses")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_snapshot_loads() {
        let snapshot = sample_snapshot();

        assert_eq!(snapshot.friendships.person_count(), 12);
        assert_eq!(snapshot.likes.person_count(), 12);
        assert_eq!(snapshot.catalog.len(), 9);
        assert_eq!(snapshot.person_count(), 12);
        assert_eq!(snapshot.friendships.friends_of("Chuck").unwrap(), ["Cathy", "Ryan"]);
    }

    #[test]
    fn test_catalog_defaults_to_empty() {
        let snapshot =
            SocialSnapshot::from_json_str(r#"{"friendships": {"A": []}, "likes": {"A": []}}"#)
                .unwrap();
        assert!(snapshot.catalog.is_empty());
        assert_eq!(snapshot.person_count(), 1);
    }

    #[test]
    fn test_malformed_snapshot_is_serialization_error() {
        let err = SocialSnapshot::from_json_str(r#"{"friendships": []}"#).unwrap_err();
        assert_eq!(err.code(), friendly_common::errors::ErrorCode::SerializationError);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(SocialSnapshot::from_json_file("/nonexistent/snapshot.json").is_err());
    }
}

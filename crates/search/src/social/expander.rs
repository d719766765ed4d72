//! Bounded-depth breadth-first expansion of the friendship graph
//!
//! Partitions everyone within `max_depth` hops of a starting person into
//! bands by exact shortest distance. Each person lands in the first band
//! they are reached in; the starting person is never placed in a band.

use super::graph::{FriendshipGraph, PersonId};
use friendly_common::errors::{AppError, Result};
use friendly_common::{MissingPersonPolicy, DEFAULT_MAX_DEPTH};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Disjoint sets of people indexed by degree of friendship (1-based)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistanceBands {
    bands: Vec<Vec<PersonId>>,
}

/// Expand `start` to the default depth, failing on undefined people
pub fn expand(graph: &FriendshipGraph, start: &str) -> Result<DistanceBands> {
    DistanceBands::expand_with(graph, start, DEFAULT_MAX_DEPTH, MissingPersonPolicy::FailFast)
}

impl DistanceBands {
    /// Expand `start` level by level up to `max_depth`
    ///
    /// Always yields exactly `max_depth` bands, trailing ones possibly empty.
    /// Members of the deepest band are never looked up, so they need not be
    /// keys of the graph.
    pub fn expand_with(
        graph: &FriendshipGraph,
        start: &str,
        max_depth: usize,
        policy: MissingPersonPolicy,
    ) -> Result<Self> {
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(start);

        let mut bands = Vec::with_capacity(max_depth);
        let mut frontier: Vec<&str> = vec![start];

        for _ in 0..max_depth {
            let mut level: Vec<&str> = Vec::new();

            for &person in &frontier {
                for friend in friends_of(graph, person, policy)? {
                    if visited.insert(friend.as_str()) {
                        level.push(friend.as_str());
                    }
                }
            }

            bands.push(level.iter().map(|p| p.to_string()).collect());
            frontier = level;
        }

        let bands = Self { bands };
        debug!(
            start = %start,
            depth = max_depth,
            reach = bands.len(),
            "Expanded friendship bands"
        );
        Ok(bands)
    }

    /// People at exactly `degree` hops; empty for degree 0 or beyond the depth
    pub fn band(&self, degree: usize) -> &[PersonId] {
        degree
            .checked_sub(1)
            .and_then(|i| self.bands.get(i))
            .map(|b| b.as_slice())
            .unwrap_or(&[])
    }

    /// Degree at which `person` was reached
    pub fn degree_of(&self, person: &str) -> Option<usize> {
        self.bands
            .iter()
            .position(|band| band.iter().any(|p| p == person))
            .map(|i| i + 1)
    }

    /// Whether `person` is in any band
    pub fn contains(&self, person: &str) -> bool {
        self.degree_of(person).is_some()
    }

    /// Number of bands (the expansion depth)
    pub fn depth(&self) -> usize {
        self.bands.len()
    }

    /// Total people across all bands
    pub fn len(&self) -> usize {
        self.bands.iter().map(|b| b.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(degree, members)` pairs in increasing degree
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[PersonId])> {
        self.bands
            .iter()
            .enumerate()
            .map(|(i, band)| (i + 1, band.as_slice()))
    }
}

fn friends_of<'g>(
    graph: &'g FriendshipGraph,
    person: &str,
    policy: MissingPersonPolicy,
) -> Result<&'g [PersonId]> {
    match (graph.friends_of(person), policy) {
        (Some(friends), _) => Ok(friends),
        (None, MissingPersonPolicy::TreatAsEmpty) => {
            debug!(person = %person, "Person missing from friendship graph, treating as friendless");
            Ok(&[])
        }
        (None, MissingPersonPolicy::FailFast) => Err(AppError::unknown_friend(person)),
    }
}

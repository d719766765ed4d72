//! Affinity scoring and final ordering
//!
//! Liked items (affinity > 0) always precede unliked ones. Liked items are
//! ordered by descending affinity, unliked items by descending popularity.
//! Both sorts are stable: ties keep their input order.

use super::{AffinityWeights, Candidate, ScoredResult};
use crate::social::{DistanceBands, ItemId, LikeRelation, PersonId};
use friendly_common::errors::{AppError, Result};
use friendly_common::MissingPersonPolicy;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Rank with the default weights, failing on undefined people
pub fn rank(
    candidates: &[Candidate],
    bands: &DistanceBands,
    likes: &LikeRelation,
    current_user: &str,
) -> Result<Vec<ScoredResult>> {
    RelevanceRanker::default().rank(candidates, bands, likes, current_user)
}

/// Scores candidates against a user's friendship bands
#[derive(Debug, Clone, Default)]
pub struct RelevanceRanker {
    weights: AffinityWeights,
    policy: MissingPersonPolicy,
}

/// Like-set of one band member; `None` stands for a missing person treated as empty
type ResolvedBand<'a> = Vec<(&'a PersonId, Option<&'a HashSet<ItemId>>)>;

impl RelevanceRanker {
    pub fn new(weights: AffinityWeights, policy: MissingPersonPolicy) -> Self {
        Self { weights, policy }
    }

    pub fn weights(&self) -> &AffinityWeights {
        &self.weights
    }

    pub fn policy(&self) -> MissingPersonPolicy {
        self.policy
    }

    /// Score every candidate and return liked items, then unliked items
    ///
    /// Every like-set is resolved before scoring, so an undefined user or
    /// band member fails the call even when `candidates` is empty. Bands
    /// deeper than the weight table do not contribute.
    pub fn rank(
        &self,
        candidates: &[Candidate],
        bands: &DistanceBands,
        likes: &LikeRelation,
        current_user: &str,
    ) -> Result<Vec<ScoredResult>> {
        let own_likes = self.like_set(likes, current_user)?;

        let resolved = bands
            .iter()
            .take(self.weights.depth())
            .map(|(_, band)| {
                band.iter()
                    .map(|person| self.like_set(likes, person).map(|set| (person, set)))
                    .collect::<Result<ResolvedBand<'_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let (mut liked, mut unliked): (Vec<_>, Vec<_>) = candidates
            .iter()
            .map(|candidate| self.score(candidate, own_likes, &resolved))
            .partition(ScoredResult::is_liked);

        liked.sort_by(|a, b| descending(a.affinity, b.affinity));
        unliked.sort_by(|a, b| descending(a.popularity, b.popularity));

        debug!(
            user = %current_user,
            liked = liked.len(),
            unliked = unliked.len(),
            "Ranked candidates"
        );

        liked.extend(unliked);
        Ok(liked)
    }

    fn score(
        &self,
        candidate: &Candidate,
        own_likes: Option<&HashSet<ItemId>>,
        resolved: &[ResolvedBand<'_>],
    ) -> ScoredResult {
        let id = candidate.id.as_str();

        let mut affinity = if own_likes.is_some_and(|set| set.contains(id)) {
            self.weights.self_weight()
        } else {
            0.0
        };
        let mut liked_by = Vec::new();

        for (level, (band, weight)) in resolved.iter().zip(self.weights.degree_weights()).enumerate() {
            let mut likers = 0usize;
            for (person, set) in band {
                if set.is_some_and(|s| s.contains(id)) {
                    likers += 1;
                    if level == 0 {
                        liked_by.push((*person).clone());
                    }
                }
            }
            affinity += weight * likers as f64;
        }

        ScoredResult {
            title: candidate.title.clone(),
            id: candidate.id.clone(),
            popularity: candidate.popularity,
            affinity,
            liked_by,
        }
    }

    fn like_set<'a>(&self, likes: &'a LikeRelation, person: &str) -> Result<Option<&'a HashSet<ItemId>>> {
        match (likes.likes_of(person), self.policy) {
            (Some(set), _) => Ok(Some(set)),
            (None, MissingPersonPolicy::TreatAsEmpty) => Ok(None),
            (None, MissingPersonPolicy::FailFast) => Err(AppError::unknown_liker(person)),
        }
    }
}

/// Descending total order for scores; NaN sorts ahead of every number
fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::social::{expand, sample_snapshot, FriendshipGraph};

    fn graph(edges: &[(&str, &[&str])]) -> FriendshipGraph {
        edges.iter().map(|(p, fs)| (*p, fs.iter().copied())).collect()
    }

    fn likes(entries: &[(&str, &[&str])]) -> LikeRelation {
        entries.iter().map(|(p, items)| (*p, items.iter().copied())).collect()
    }

    fn ids(results: &[ScoredResult]) -> Vec<&str> {
        results.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_small_network_example() {
        let g = graph(&[("A", &["B"]), ("B", &["A", "C"]), ("C", &["B"])]);
        let l = likes(&[("A", &["x"]), ("B", &[]), ("C", &["x"])]);
        let bands = expand(&g, "A").unwrap();

        let results = rank(&[Candidate::new("X", "x", 3.0)], &bands, &l, "A").unwrap();

        // 2 for A's own like, 0.5 for C at degree 2
        assert_eq!(
            results,
            vec![ScoredResult {
                title: "X".into(),
                id: "x".into(),
                popularity: 3.0,
                affinity: 2.5,
                liked_by: vec![],
            }]
        );
    }

    #[test]
    fn test_empty_candidates() {
        let g = graph(&[("A", &[])]);
        let l = likes(&[("A", &[])]);
        let bands = expand(&g, "A").unwrap();

        assert!(rank(&[], &bands, &l, "A").unwrap().is_empty());
    }

    #[test]
    fn test_no_friends_orders_by_popularity() {
        let g = graph(&[("A", &[])]);
        let l = likes(&[("A", &[])]);
        let bands = expand(&g, "A").unwrap();
        let candidates = vec![
            Candidate::new("Low", "low", 1.0),
            Candidate::new("High", "high", 4.5),
            Candidate::new("Mid", "mid", 2.5),
        ];

        let results = rank(&candidates, &bands, &l, "A").unwrap();

        assert_eq!(ids(&results), vec!["high", "mid", "low"]);
        assert!(results.iter().all(|r| r.affinity == 0.0 && r.liked_by.is_empty()));
    }

    #[test]
    fn test_liked_items_outrank_popular_ones() {
        let g = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &["D"]), ("D", &["E"]), ("E", &["F"])]);
        let l = likes(&[
            ("A", &[]),
            ("B", &[]),
            ("C", &[]),
            ("D", &[]),
            ("E", &[]),
            ("F", &["obscure"]),
        ]);
        let bands = expand(&g, "A").unwrap();
        let candidates = vec![
            Candidate::new("Blockbuster", "hit", 5.0),
            Candidate::new("Obscure", "obscure", 0.1),
        ];

        let results = rank(&candidates, &bands, &l, "A").unwrap();

        assert_eq!(ids(&results), vec!["obscure", "hit"]);
        assert_eq!(results[0].affinity, 0.0625);
        assert_eq!(results[1].affinity, 0.0);
    }

    #[test]
    fn test_liked_by_lists_first_degree_only_in_band_order() {
        let g = graph(&[("A", &["C", "B", "D"]), ("B", &["E"]), ("C", &[]), ("D", &[]), ("E", &[])]);
        let l = likes(&[
            ("A", &[]),
            ("B", &["x"]),
            ("C", &["x"]),
            ("D", &[]),
            ("E", &["x"]),
        ]);
        let bands = expand(&g, "A").unwrap();

        let results = rank(&[Candidate::new("X", "x", 1.0)], &bands, &l, "A").unwrap();

        assert_eq!(results[0].liked_by, vec!["C", "B"]);
        assert_eq!(results[0].affinity, 2.5);
    }

    #[test]
    fn test_each_degree_adds_its_weight() {
        // A -> B1 -> B2 -> B3 -> B4 -> B5, one new liker at a time
        let g = graph(&[
            ("A", &["B1"]),
            ("B1", &["B2"]),
            ("B2", &["B3"]),
            ("B3", &["B4"]),
            ("B4", &["B5"]),
        ]);
        let bands = expand(&g, "A").unwrap();
        let people = ["A", "B1", "B2", "B3", "B4", "B5"];
        let expected_steps = [2.0, 1.0, 0.5, 0.25, 0.125, 0.0625];
        let candidates = [Candidate::new("X", "x", 1.0)];

        let mut l: LikeRelation = people.iter().map(|p| (*p, Vec::<&str>::new())).collect();
        let mut previous = rank(&candidates, &bands, &l, "A").unwrap()[0].affinity;
        assert_eq!(previous, 0.0);

        for (person, step) in people.iter().zip(expected_steps) {
            l.add_like(*person, "x");
            let current = rank(&candidates, &bands, &l, "A").unwrap()[0].affinity;
            assert_eq!(current - previous, step, "liker {}", person);
            previous = current;
        }
        assert_eq!(previous, 3.9375);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let g = graph(&[("A", &["B"]), ("B", &[])]);
        let l = likes(&[("A", &[]), ("B", &["l1", "l2"])]);
        let bands = expand(&g, "A").unwrap();
        let candidates = vec![
            Candidate::new("U1", "u1", 3.0),
            Candidate::new("L1", "l1", 1.0),
            Candidate::new("U2", "u2", 3.0),
            Candidate::new("L2", "l2", 5.0),
        ];

        let results = rank(&candidates, &bands, &l, "A").unwrap();

        assert_eq!(ids(&results), vec!["l1", "l2", "u1", "u2"]);
    }

    #[test]
    fn test_groups_are_sorted() {
        let snapshot = sample_snapshot();
        let bands = expand(&snapshot.friendships, "Laura").unwrap();
        let candidates: Vec<Candidate> = snapshot
            .catalog
            .iter()
            .filter_map(|raw| raw.clone().normalize(2.5))
            .collect();

        let results = rank(&candidates, &bands, &snapshot.likes, "Laura").unwrap();
        let split = results.iter().position(|r| !r.is_liked()).unwrap_or(results.len());

        assert!(results[..split].windows(2).all(|w| w[0].affinity >= w[1].affinity));
        assert!(results[split..].iter().all(|r| !r.is_liked()));
        assert!(results[split..].windows(2).all(|w| w[0].popularity >= w[1].popularity));
    }

    #[test]
    fn test_nan_popularity_keeps_unliked_order() {
        let g = graph(&[("A", &[])]);
        let l = likes(&[("A", &[])]);
        let bands = expand(&g, "A").unwrap();
        let candidates: Vec<Candidate> = (0..200)
            .map(|i| {
                let popularity = if i % 7 == 0 { f64::NAN } else { ((i * 37) % 101) as f64 / 10.0 };
                Candidate::new(format!("Item {}", i), format!("item-{}", i), popularity)
            })
            .collect();

        let results = rank(&candidates, &bands, &l, "A").unwrap();
        let numeric: Vec<f64> = results
            .iter()
            .map(|r| r.popularity)
            .filter(|p| !p.is_nan())
            .collect();

        assert_eq!(results.len(), 200);
        assert!(numeric.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_rank_is_idempotent() {
        let snapshot = sample_snapshot();
        let bands = expand(&snapshot.friendships, "Chuck").unwrap();
        let candidates: Vec<Candidate> = snapshot
            .catalog
            .iter()
            .filter_map(|raw| raw.clone().normalize(2.5))
            .collect();

        let first = rank(&candidates, &bands, &snapshot.likes, "Chuck").unwrap();
        let second = rank(&candidates, &bands, &snapshot.likes, "Chuck").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_user_likes_fails_fast() {
        let g = graph(&[("A", &[])]);
        let l = likes(&[]);
        let bands = expand(&g, "A").unwrap();

        let err = rank(&[], &bands, &l, "A").unwrap_err();
        assert!(matches!(err, AppError::PersonNotFound { ref id, relation } if id == "A" && relation == "likes"));
    }

    #[test]
    fn test_missing_band_member_likes_fails_fast() {
        let g = graph(&[("A", &["B"]), ("B", &[])]);
        let l = likes(&[("A", &[])]);
        let bands = expand(&g, "A").unwrap();

        let err = rank(&[Candidate::new("X", "x", 1.0)], &bands, &l, "A").unwrap_err();
        assert!(matches!(err, AppError::PersonNotFound { ref id, .. } if id == "B"));
    }

    #[test]
    fn test_missing_likes_treated_as_empty() {
        let g = graph(&[("A", &["B", "C"]), ("B", &[]), ("C", &[])]);
        let l = likes(&[("C", &["x"])]);
        let bands = expand(&g, "A").unwrap();
        let ranker = RelevanceRanker::new(AffinityWeights::default(), MissingPersonPolicy::TreatAsEmpty);

        let results = ranker
            .rank(&[Candidate::new("X", "x", 1.0)], &bands, &l, "A")
            .unwrap();

        assert_eq!(results[0].affinity, 1.0);
        assert_eq!(results[0].liked_by, vec!["C"]);
    }

    #[test]
    fn test_bands_beyond_weight_table_ignored() {
        let g = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &[])]);
        let l = likes(&[("A", &[]), ("B", &[]), ("C", &["x"])]);
        let bands = expand(&g, "A").unwrap();
        let config = friendly_common::RankingConfig {
            max_depth: 1,
            ..Default::default()
        };
        let ranker = RelevanceRanker::new(AffinityWeights::from_config(&config), MissingPersonPolicy::FailFast);

        let results = ranker
            .rank(&[Candidate::new("X", "x", 1.0)], &bands, &l, "A")
            .unwrap();
        assert!(!results[0].is_liked());
    }
}

//! Friendly search: provider lookup, band expansion and ranking in one call

use crate::provider::SearchProvider;
use crate::ranking::{AffinityWeights, Candidate, RelevanceRanker, ScoredResult};
use crate::social::{DistanceBands, SocialSnapshot};
use friendly_common::errors::{AppError, ErrorCode, Result};
use friendly_common::{metrics, MissingPersonPolicy, RankingConfig};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// End-to-end personalized search
pub struct FriendlySearch {
    provider: Arc<dyn SearchProvider>,
    ranker: RelevanceRanker,
    max_depth: usize,
    policy: MissingPersonPolicy,
}

impl FriendlySearch {
    /// Create a service from validated ranking settings
    pub fn new(provider: Arc<dyn SearchProvider>, config: &RankingConfig) -> Result<Self> {
        let weights = AffinityWeights::try_from_config(config)?;
        Ok(Self {
            provider,
            ranker: RelevanceRanker::new(weights, config.missing_person),
            max_depth: config.max_depth,
            policy: config.missing_person,
        })
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Search the provider and rank its results for `current_user`
    pub async fn search(
        &self,
        query: &str,
        snapshot: &SocialSnapshot,
        current_user: &str,
    ) -> Result<Vec<ScoredResult>> {
        let candidates = self.provider.search(query).await.map_err(|e| {
            if e.is_client_error() {
                e
            } else {
                warn!(provider = %self.provider.name(), error = %e, "Provider search failed");
                metrics::record_ranking_error(ErrorCode::SearchProviderError.as_str());
                AppError::provider(self.provider.name(), e.to_string())
            }
        })?;
        metrics::record_search(self.provider.name(), candidates.len());

        info!(
            query = %query,
            provider = %self.provider.name(),
            candidates = candidates.len(),
            "Provider search completed"
        );

        self.rank_candidates(&candidates, snapshot, current_user)
    }

    /// Rank caller-supplied candidates for `current_user`
    pub fn rank_candidates(
        &self,
        candidates: &[Candidate],
        snapshot: &SocialSnapshot,
        current_user: &str,
    ) -> Result<Vec<ScoredResult>> {
        let start = Instant::now();

        let ranked = DistanceBands::expand_with(
            &snapshot.friendships,
            current_user,
            self.max_depth,
            self.policy,
        )
        .and_then(|bands| {
            self.ranker
                .rank(candidates, &bands, &snapshot.likes, current_user)
                .map(|results| (bands.len(), results))
        });

        let (reach, results) = match ranked {
            Ok(ranked) => ranked,
            Err(e) => {
                warn!(user = %current_user, error = %e, "Ranking failed");
                metrics::record_ranking_error(e.code().as_str());
                return Err(e);
            }
        };

        let liked = results.iter().filter(|r| r.is_liked()).count();
        metrics::record_ranking(
            start.elapsed().as_secs_f64(),
            liked,
            results.len() - liked,
            reach,
        );

        info!(
            user = %current_user,
            reach,
            liked,
            total = results.len(),
            latency_us = start.elapsed().as_micros() as u64,
            "Ranking completed"
        );

        Ok(results)
    }
}

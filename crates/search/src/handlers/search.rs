//! Search and rank handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use super::AppState;
use crate::provider::RawResult;
use crate::ranking::{Candidate, ScoredResult};
use friendly_common::errors::{AppError, Result};

/// Search request: query the provider, rank for `current_user`
#[derive(Debug, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1, max = 1000))]
    pub query: String,

    #[validate(length(min = 1, max = 256))]
    pub current_user: String,
}

/// Rank request: rank caller-supplied candidates for `current_user`
#[derive(Debug, Deserialize, Validate)]
pub struct RankRequest {
    #[validate(length(min = 1, max = 256))]
    pub current_user: String,

    #[validate(length(max = 1000))]
    pub candidates: Vec<CandidateInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateInput {
    pub title: String,
    pub id: String,
    #[serde(default)]
    pub popularity: Option<f64>,
}

/// Ranked results response
#[derive(Debug, Serialize)]
pub struct RankingResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub current_user: String,
    pub total_results: usize,
    pub liked_results: usize,
    pub results: Vec<ScoredResult>,
    pub processing_time_ms: u64,
}

impl RankingResponse {
    fn new(query: Option<String>, current_user: String, results: Vec<ScoredResult>, start: Instant) -> Self {
        Self {
            query,
            current_user,
            total_results: results.len(),
            liked_results: results.iter().filter(|r| r.is_liked()).count(),
            results,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

fn validate(request: &impl Validate) -> Result<()> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })
}

/// Search the configured provider and rank the matches
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<RankingResponse>> {
    let start = Instant::now();
    validate(&request)?;

    let results = state
        .search
        .search(&request.query, &state.snapshot, &request.current_user)
        .await?;

    Ok(Json(RankingResponse::new(
        Some(request.query),
        request.current_user,
        results,
        start,
    )))
}

/// Rank a caller-supplied candidate list
pub async fn rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankingResponse>> {
    let start = Instant::now();
    validate(&request)?;

    let default_popularity = state.config.ranking.default_popularity;
    let candidates: Vec<Candidate> = request
        .candidates
        .into_iter()
        .filter_map(|c| {
            RawResult {
                title: Some(c.title),
                id: Some(c.id),
                popularity: c.popularity,
            }
            .normalize(default_popularity)
        })
        .collect();

    let results = state
        .search
        .rank_candidates(&candidates, &state.snapshot, &request.current_user)?;

    Ok(Json(RankingResponse::new(None, request.current_user, results, start)))
}

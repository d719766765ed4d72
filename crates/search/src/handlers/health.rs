//! Health check handlers

use super::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub snapshot: SnapshotStats,
}

#[derive(Serialize)]
pub struct SnapshotStats {
    pub people: usize,
    pub like_sets: usize,
    pub catalog_items: usize,
    pub provider: String,
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Readiness probe - ready once a non-empty snapshot is loaded
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let people = state.snapshot.person_count();

    Json(ReadyResponse {
        status: if people > 0 { "ready" } else { "not_ready" }.to_string(),
        snapshot: SnapshotStats {
            people,
            like_sets: state.snapshot.likes.person_count(),
            catalog_items: state.snapshot.catalog.len(),
            provider: state.search.provider_name().to_string(),
        },
    })
}

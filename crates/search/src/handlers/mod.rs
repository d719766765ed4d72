//! HTTP handlers and router

pub mod health;
pub mod search;

use crate::service::FriendlySearch;
use crate::social::SocialSnapshot;
use axum::{
    routing::{get, post},
    Router,
};
use friendly_common::AppConfig;
use std::sync::Arc;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub snapshot: Arc<SocialSnapshot>,
    pub search: Arc<FriendlySearch>,
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    let api_routes = Router::new()
        .route("/search", post(search::search))
        .route("/rank", post(search::rank));

    Router::new()
        // Health endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .nest("/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_id)
        .layer(request_id)
        .with_state(state)
}

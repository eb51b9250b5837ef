//! Router configuration

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};

/// Build the API router
pub fn build_router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/api/v1/vin/normalize", post(handlers::normalize_vin))
        .route("/api/v1/valuation", post(handlers::valuation))
        .route("/api/v1/fairness/classify", post(handlers::classify))
        .route("/api/v1/fairness/score", post(handlers::score))
        .route("/api/v1/negotiation/greeting", post(handlers::negotiation_greeting))
        .route("/api/v1/negotiation/tips", post(handlers::negotiation_tips))
        .route("/api/v1/negotiation/context", post(handlers::negotiation_context))
        .route("/api/v1/negotiation/chat", post(handlers::negotiation_chat))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit_bytes)),
        )
        .with_state(state)
}

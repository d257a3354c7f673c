use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/recommend", post(handlers::recommend))
        // Wardrobe
        .route(
            "/wardrobe/:user_id",
            get(handlers::get_wardrobe).post(handlers::add_wardrobe_item),
        )
        // Personalization
        .route("/profile/:user_id", get(handlers::get_profile))
        .route("/feedback", post(handlers::feedback))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

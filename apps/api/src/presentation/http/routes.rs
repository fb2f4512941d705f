use super::{
    handlers::{about, docs, health, projects, social},
    middleware::rate_limit::rate_limit_middleware,
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

/// Largest accepted request body. Submissions are small JSON documents.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let submit_routes = Router::new()
        .route("/api/v1/projects", post(projects::submit_project))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Projects
        .route("/api/v1/projects", get(projects::list_projects))
        .route("/api/v1/projects/{id}", get(projects::get_project))
        // Likes & views
        .route(
            "/api/v1/projects/{id}/like",
            get(social::like_status).post(social::toggle_like),
        )
        .route("/api/v1/projects/{id}/views", post(social::record_view))
        // Static content
        .route("/api/v1/categories", get(about::list_categories))
        .route("/api/v1/about", get(about::about))
        .route("/api/v1/docs", get(docs::api_docs))
        .merge(submit_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

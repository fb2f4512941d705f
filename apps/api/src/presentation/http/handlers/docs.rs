use axum::Json;

pub async fn api_docs() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Vibe Index API",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/health": { "get": { "summary": "Health check" } },
            "/api/v1/projects": {
                "get": { "summary": "List projects (q, sort, time, category, limit, offset)" },
                "post": { "summary": "Submit a project (rate-limited per IP per day)" }
            },
            "/api/v1/projects/{id}": { "get": { "summary": "Get project by id" } },
            "/api/v1/projects/{id}/like": {
                "get": { "summary": "Like status for the calling IP" },
                "post": { "summary": "Toggle like for the calling IP" }
            },
            "/api/v1/projects/{id}/views": {
                "post": { "summary": "Record a card view, once per session (x-session-id)" }
            },
            "/api/v1/categories": { "get": { "summary": "List submission categories" } },
            "/api/v1/about": { "get": { "summary": "About page content" } }
        }
    }))
}

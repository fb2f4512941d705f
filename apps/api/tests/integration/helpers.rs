use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use vibe_index_api::{
    config::Config,
    infrastructure::{cache::memory_store::MemoryStore, repositories::in_memory::InMemoryRepository},
    presentation::http::{routes::create_router, state::AppState},
};

pub struct TestApp {
    pub app: Router,
}

fn build_config() -> Config {
    Config {
        database_url: None,
        database_max_connections: 1,
        redis_url: None,
        host: "127.0.0.1".to_string(),
        port: 0,
        allowed_origins: vec![],
        rate_limit_submissions_per_ip: 1000,
        view_session_ttl_seconds: 1800,
        listing_cache_ttl_seconds: 30,
        seed_demo_projects: false,
        ignore_missing_migrations: true,
    }
}

/// An app on empty in-memory backends with default test settings.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(tweak: impl FnOnce(&mut Config)) -> TestApp {
    let mut config = build_config();
    tweak(&mut config);

    let repo = Arc::new(if config.seed_demo_projects {
        InMemoryRepository::with_demo_projects(chrono::Utc::now())
    } else {
        InMemoryRepository::new()
    });
    let state = AppState::new(
        config,
        None,
        repo.clone(),
        repo,
        Arc::new(MemoryStore::new()),
    );

    TestApp {
        app: create_router(state),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();
    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

/// POST from a given client address, with an optional JSON body.
pub fn post_from(uri: &str, ip: &str, body: Option<&Value>) -> Request<Body> {
    let builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-forwarded-for", ip);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request")
}

pub fn submission(title: &str, category: &str) -> Value {
    serde_json::json!({
        "title": title,
        "description": format!("{} makes the web glow", title),
        "category": category,
        "url": format!("https://github.com/example/{}", title.to_lowercase()),
        "image_url": "https://images.example.com/preview.png"
    })
}

/// Submits a project and returns its JSON representation.
pub async fn create_project(app: &Router, title: &str, category: &str) -> Value {
    let res = send(
        app,
        post_from("/api/v1/projects", "198.51.100.1", Some(&submission(title, category))),
    )
    .await;
    read_json(expect_status(res, StatusCode::CREATED).await).await
}

pub fn titles(page: &Value) -> Vec<String> {
    page["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|p| p["title"].as_str().expect("title").to_string())
        .collect()
}

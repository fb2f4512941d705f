use super::helpers::{
    create_project, expect_status, get, post_from, read_json, send, spawn_app, spawn_app_with,
    submission,
};
use axum::http::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_reports_in_memory_backends() {
    let app = spawn_app().await;
    let res = expect_status(send(&app.app, get("/health")).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "memory");
    assert_eq!(body["cache"], "up");
}

#[tokio::test]
async fn about_and_categories_are_served() {
    let app = spawn_app().await;

    let about: Value = read_json(
        expect_status(send(&app.app, get("/api/v1/about")).await, StatusCode::OK).await,
    )
    .await;
    assert_eq!(about["name"], "The Vibe Index");
    assert!(!about["submission_guidelines"].as_array().unwrap().is_empty());

    let categories: Vec<String> = read_json(
        expect_status(send(&app.app, get("/api/v1/categories")).await, StatusCode::OK).await,
    )
    .await;
    assert_eq!(categories.len(), 9);
    assert_eq!(categories[0], "UI Library");
    assert!(categories.contains(&"Audio Visualization".to_string()));

    let docs: Value = read_json(send(&app.app, get("/api/v1/docs")).await).await;
    assert!(docs["paths"]["/api/v1/projects"].is_object());
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = spawn_app().await;
    let res = send(&app.app, get("/health")).await;
    let id = res
        .headers()
        .get("x-request-id")
        .expect("missing x-request-id")
        .to_str()
        .unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn submissions_are_rate_limited_per_ip() {
    let app = spawn_app_with(|config| config.rate_limit_submissions_per_ip = 2).await;
    let body = submission("Spam", "Other");

    for _ in 0..2 {
        let res = send(&app.app, post_from("/api/v1/projects", "203.0.113.50", Some(&body))).await;
        expect_status(res, StatusCode::CREATED).await;
    }
    let limited = send(&app.app, post_from("/api/v1/projects", "203.0.113.50", Some(&body))).await;
    let err: Value = read_json(expect_status(limited, StatusCode::TOO_MANY_REQUESTS).await).await;
    assert!(err["error"].is_string());

    // Another address still gets through, and reads are never limited
    let other = send(&app.app, post_from("/api/v1/projects", "203.0.113.51", Some(&body))).await;
    expect_status(other, StatusCode::CREATED).await;
    let listing = send(&app.app, get("/api/v1/projects")).await;
    expect_status(listing, StatusCode::OK).await;
}

#[tokio::test]
async fn browse_like_and_view_flow() {
    let app = spawn_app_with(|config| config.seed_demo_projects = true).await;
    let created = create_project(&app.app, "SmokeProject", "UI Effects").await;
    let id = created["id"].as_str().expect("missing id");

    let found: Value =
        read_json(send(&app.app, get("/api/v1/projects?q=smokeproject")).await).await;
    assert_eq!(found["total"], 1);

    send(
        &app.app,
        post_from(&format!("/api/v1/projects/{}/like", id), "203.0.113.60", None),
    )
    .await;
    let top: Value =
        read_json(send(&app.app, get("/api/v1/projects?sort=most-liked&limit=1")).await).await;
    assert_eq!(top["items"][0]["title"], "SmokeProject");
    assert_eq!(top["total"], 9);
}

#[tokio::test]
async fn forwarded_request_id_is_echoed() {
    let app = spawn_app().await;
    let req = axum::http::Request::builder()
        .uri("/api/v1/categories")
        .header("x-request-id", "edge-7f3a")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = send(&app.app, req).await;
    assert_eq!(res.headers()["x-request-id"], "edge-7f3a");
}

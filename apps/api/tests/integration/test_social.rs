use super::helpers::{create_project, expect_status, get, post_from, read_json, send, spawn_app, titles};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;

fn like_uri(id: &str) -> String {
    format!("/api/v1/projects/{}/like", id)
}

fn view_request(id: &str, session: Option<&str>, ip: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(format!("/api/v1/projects/{}/views", id))
        .header("x-forwarded-for", ip);
    if let Some(session) = session {
        builder = builder.header("x-session-id", session);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

fn like_status_from(id: &str, ip: &str) -> Request<Body> {
    Request::builder()
        .uri(like_uri(id))
        .header("x-forwarded-for", ip)
        .body(Body::empty())
        .expect("failed to build request")
}

#[tokio::test]
async fn like_toggles_per_client_ip() {
    let app = spawn_app().await;
    let project = create_project(&app.app, "GradientFlow", "CSS Framework").await;
    let id = project["id"].as_str().expect("missing id");

    let first: Value = read_json(
        expect_status(
            send(&app.app, post_from(&like_uri(id), "203.0.113.10", None)).await,
            StatusCode::OK,
        )
        .await,
    )
    .await;
    assert_eq!(first["liked"], true);
    assert_eq!(first["likes_count"], 1);

    let other_ip: Value =
        read_json(send(&app.app, post_from(&like_uri(id), "203.0.113.11", None)).await).await;
    assert_eq!(other_ip["likes_count"], 2);

    let unlike: Value =
        read_json(send(&app.app, post_from(&like_uri(id), "203.0.113.10", None)).await).await;
    assert_eq!(unlike["liked"], false);
    assert_eq!(unlike["likes_count"], 1);

    let status: Value =
        read_json(send(&app.app, like_status_from(id, "203.0.113.11")).await).await;
    assert_eq!(status["liked"], true);
    assert_eq!(status["likes_count"], 1);

    let stranger: Value =
        read_json(send(&app.app, like_status_from(id, "203.0.113.99")).await).await;
    assert_eq!(stranger["liked"], false);
}

#[tokio::test]
async fn forwarded_chain_uses_first_hop() {
    let app = spawn_app().await;
    let project = create_project(&app.app, "VibeKit", "Design System").await;
    let id = project["id"].as_str().expect("missing id");

    send(&app.app, post_from(&like_uri(id), "203.0.113.20, 10.0.0.1", None)).await;
    let status: Value =
        read_json(send(&app.app, like_status_from(id, "203.0.113.20")).await).await;
    assert_eq!(status["liked"], true);
}

#[tokio::test]
async fn liking_unknown_project_is_404() {
    let app = spawn_app().await;
    let res = send(
        &app.app,
        post_from(
            &like_uri("0194f123-4567-7abc-8def-0123456789ab"),
            "203.0.113.10",
            None,
        ),
    )
    .await;
    expect_status(res, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn malformed_id_on_like_and_view_is_json_400() {
    let app = spawn_app().await;
    for req in [
        post_from("/api/v1/projects/abc/like", "203.0.113.10", None),
        view_request("abc", Some("tab-1"), "203.0.113.10"),
    ] {
        let res = send(&app.app, req).await;
        let body: Value = read_json(expect_status(res, StatusCode::BAD_REQUEST).await).await;
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn garbage_client_address_is_rejected() {
    let app = spawn_app().await;
    let project = create_project(&app.app, "NeonShadow", "UI Effects").await;
    let id = project["id"].as_str().expect("missing id");

    let res = send(&app.app, post_from(&like_uri(id), "not-an-ip", None)).await;
    expect_status(res, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn likes_reorder_cached_most_liked_listing() {
    let app = spawn_app().await;
    create_project(&app.app, "Alpha", "Other").await;
    let beta = create_project(&app.app, "Beta", "Other").await;
    create_project(&app.app, "Gamma", "Other").await;

    let before: Value =
        read_json(send(&app.app, get("/api/v1/projects?sort=most-liked")).await).await;
    assert_eq!(titles(&before), vec!["Gamma", "Beta", "Alpha"]);

    let beta_id = beta["id"].as_str().expect("missing id");
    send(&app.app, post_from(&like_uri(beta_id), "203.0.113.30", None)).await;

    let after: Value =
        read_json(send(&app.app, get("/api/v1/projects?sort=most-liked")).await).await;
    assert_eq!(titles(&after), vec!["Beta", "Gamma", "Alpha"]);
    assert_eq!(after["items"][0]["likes_count"], 1);
}

#[tokio::test]
async fn views_count_once_per_session() {
    let app = spawn_app().await;
    let project = create_project(&app.app, "EchoRipple", "Audio Visualization").await;
    let id = project["id"].as_str().expect("missing id");

    let first: Value = read_json(
        expect_status(
            send(&app.app, view_request(id, Some("tab-1"), "203.0.113.40")).await,
            StatusCode::OK,
        )
        .await,
    )
    .await;
    assert_eq!(first["counted"], true);
    assert_eq!(first["views"], 1);

    let repeat: Value =
        read_json(send(&app.app, view_request(id, Some("tab-1"), "203.0.113.40")).await).await;
    assert_eq!(repeat["counted"], false);
    assert_eq!(repeat["views"], 1);

    // Same address, new session
    let second_session: Value =
        read_json(send(&app.app, view_request(id, Some("tab-2"), "203.0.113.40")).await).await;
    assert_eq!(second_session["views"], 2);

    // No session header falls back to the client address
    let by_ip: Value =
        read_json(send(&app.app, view_request(id, None, "203.0.113.41")).await).await;
    assert_eq!(by_ip["counted"], true);
    let by_ip_again: Value =
        read_json(send(&app.app, view_request(id, None, "203.0.113.41")).await).await;
    assert_eq!(by_ip_again["counted"], false);
    assert_eq!(by_ip_again["views"], 3);

    let fetched: Value =
        read_json(send(&app.app, get(&format!("/api/v1/projects/{}", id))).await).await;
    assert_eq!(fetched["views"], 3);
}

#[tokio::test]
async fn viewing_unknown_project_is_404() {
    let app = spawn_app().await;
    let res = send(
        &app.app,
        view_request("0194f123-4567-7abc-8def-0123456789ab", Some("tab-1"), "203.0.113.40"),
    )
    .await;
    expect_status(res, StatusCode::NOT_FOUND).await;
}

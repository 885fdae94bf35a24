mod common;

use axum_test::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_stats_aggregate_clicks() {
    let (app, _db, _mailer) = common::create_test_app();
    let server = TestServer::new(app).unwrap();
    let token = common::register_and_login(&server, "alice").await;

    server
        .post("/api/links")
        .authorization_bearer(&token)
        .json(&json!({ "url": "https://example.com", "slug": "my-link" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    for _ in 0..3 {
        server
            .get("/alice/my-link")
            .add_header(axum::http::header::REFERER, "https://news.ycombinator.com/")
            .await
            .assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);
    }
    server
        .get("/alice/my-link")
        .await
        .assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);

    let response = server
        .get("/api/links/my-link/stats")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["slug"], "my-link");
    assert_eq!(body["total_clicks"], 4);

    let referrers = body["top_referrers"].as_array().unwrap();
    assert_eq!(referrers.len(), 1);
    assert_eq!(referrers[0]["referrer"], "https://news.ycombinator.com/");
    assert_eq!(referrers[0]["count"], 3);

    assert_eq!(body["recent_clicks"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_stats_empty_for_unclicked_link() {
    let (app, _db, _mailer) = common::create_test_app();
    let server = TestServer::new(app).unwrap();
    let token = common::register_and_login(&server, "alice").await;

    server
        .post("/api/links")
        .authorization_bearer(&token)
        .json(&json!({ "url": "https://example.com", "slug": "quiet" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .get("/api/links/quiet/stats")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["total_clicks"], 0);
    assert!(body["top_referrers"].as_array().unwrap().is_empty());
    assert!(body["recent_clicks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_stats_for_another_users_link_not_found() {
    let (app, _db, _mailer) = common::create_test_app();
    let server = TestServer::new(app).unwrap();
    let alice = common::register_and_login(&server, "alice").await;
    let bob = common::register_and_login(&server, "bob").await;

    server
        .post("/api/links")
        .authorization_bearer(&alice)
        .json(&json!({ "url": "https://example.com", "slug": "private" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    server
        .get("/api/links/private/stats")
        .authorization_bearer(&bob)
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_stats_require_authentication() {
    let (app, _db, _mailer) = common::create_test_app();
    let server = TestServer::new(app).unwrap();

    server
        .get("/api/links/any/stats")
        .await
        .assert_status_unauthorized();
}

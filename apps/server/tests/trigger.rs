use axum::{body::Body, http::Request};
use tempfile::tempdir;
use tower::ServiceExt;

use tickerbrief_server::{api::app_router, build_state, config::Config};

fn test_config(db_path: String, admin_token: Option<String>) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path,
        symbol: "IBM".to_string(),
        alpha_vantage_api_key: String::new(),
        groq_api_key: None,
        admin_token,
        schedule_enabled: false,
        request_timeout: std::time::Duration::from_millis(30000),
    }
}

#[tokio::test]
async fn run_without_token_is_rejected() {
    let tmp = tempdir().unwrap();
    let config = test_config(
        tmp.path().join("test.db").to_string_lossy().to_string(),
        Some("s3cret".to_string()),
    );
    let state = build_state(&config).unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/run")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn run_with_header_token_is_accepted() {
    let tmp = tempdir().unwrap();
    let config = test_config(
        tmp.path().join("test.db").to_string_lossy().to_string(),
        Some("s3cret".to_string()),
    );
    let state = build_state(&config).unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/run")
                .header("X-Admin-Token", "s3cret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 202);
}

#[tokio::test]
async fn run_with_query_token_is_accepted() {
    let tmp = tempdir().unwrap();
    let config = test_config(
        tmp.path().join("test.db").to_string_lossy().to_string(),
        Some("s3cret".to_string()),
    );
    let state = build_state(&config).unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/run?token=s3cret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 202);
}

#[tokio::test]
async fn run_without_configured_secret_is_open() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path().join("test.db").to_string_lossy().to_string(), None);
    let state = build_state(&config).unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/run")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 202);
}

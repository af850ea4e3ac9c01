//! End-to-end tests against the real router and a migrated temporary
//! database (seeded with the reference dataset).

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use pricebook_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn build_test_router() -> (tempfile::TempDir, axum::Router) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
    };
    let state = build_state(&config).await.unwrap();
    (tmp, app_router(state, &config))
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn reference_queries_resolve_the_expected_tariffs() {
    let (_tmp, app) = build_test_router().await;

    // (instant, expected price list, expected final price)
    let cases = [
        ("2020-06-14T10:00:00", 1, "35.50"),
        ("2020-06-14T16:00:00", 2, "25.45"),
        ("2020-06-14T21:00:00", 1, "35.50"),
        ("2020-06-15T10:00:00", 3, "30.50"),
        ("2020-06-16T21:00:00", 4, "38.95"),
    ];

    for (instant, price_list, final_price) in cases {
        let uri = format!(
            "/api/v1/prices?applicationDate={instant}&productId=35455&brandId=1"
        );
        let (status, body) = get_json(&app, &uri).await;
        assert_eq!(status, StatusCode::OK, "query at {instant}");
        assert_eq!(body["priceList"], json!(price_list), "query at {instant}");
        assert_eq!(body["finalPrice"], json!(final_price), "query at {instant}");
        assert_eq!(body["productId"], json!(35455));
        assert_eq!(body["brandId"], json!(1));
    }
}

#[tokio::test]
async fn response_exposes_only_the_contract_fields() {
    let (_tmp, app) = build_test_router().await;

    let (status, body) = get_json(
        &app,
        "/api/v1/prices?applicationDate=2020-06-14T16:00:00&productId=35455&brandId=1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let keys: Vec<&str> = body.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    assert_eq!(
        keys.len(),
        6,
        "unexpected response fields: {keys:?}"
    );
    for key in ["productId", "brandId", "priceList", "startDate", "endDate", "finalPrice"] {
        assert!(keys.contains(&key), "missing {key}");
    }
}

#[tokio::test]
async fn missing_parameter_is_a_bad_request_naming_it() {
    let (_tmp, app) = build_test_router().await;

    let (status, body) = get_json(
        &app,
        "/api/v1/prices?applicationDate=2020-06-14T10:00:00&brandId=1",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("productId"));

    let (status, body) = get_json(&app, "/api/v1/prices?productId=35455&brandId=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("applicationDate"));
}

#[tokio::test]
async fn malformed_parameter_is_a_bad_request() {
    let (_tmp, app) = build_test_router().await;

    let (status, body) = get_json(
        &app,
        "/api/v1/prices?applicationDate=not-a-date&productId=35455&brandId=1",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("applicationDate"));

    let (status, body) = get_json(
        &app,
        "/api/v1/prices?applicationDate=2020-06-14T10:00:00&productId=abc&brandId=1",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("productId"));
}

#[tokio::test]
async fn no_applicable_price_is_a_not_found_with_diagnostics() {
    let (_tmp, app) = build_test_router().await;

    let (status, body) = get_json(
        &app,
        "/api/v1/prices?applicationDate=2019-01-01T10:00:00&productId=35455&brandId=1",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!(404));
    assert_eq!(
        body["message"],
        json!("No price found for product 35455, brand 1 at 2019-01-01 10:00:00")
    );
}

#[tokio::test]
async fn created_price_is_resolvable() {
    let (_tmp, app) = build_test_router().await;

    let payload = json!({
        "brandId": 2,
        "productId": 11111,
        "priceList": 1,
        "startDate": "2021-01-01T00:00:00",
        "endDate": "2021-12-31T23:59:59",
        "priority": 0,
        "amount": "19.99",
        "currency": "EUR"
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/prices")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, body) = get_json(
        &app,
        "/api/v1/prices?applicationDate=2021-06-01T12:00:00&productId=11111&brandId=2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["finalPrice"], json!("19.99"));
}

#[tokio::test]
async fn invalid_new_price_is_rejected() {
    let (_tmp, app) = build_test_router().await;

    // Window inverted: start after end.
    let payload = json!({
        "brandId": 2,
        "productId": 11111,
        "priceList": 1,
        "startDate": "2021-12-31T23:59:59",
        "endDate": "2021-01-01T00:00:00",
        "priority": 0,
        "amount": "19.99",
        "currency": "EUR"
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/prices")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn healthz_responds() {
    let (_tmp, app) = build_test_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

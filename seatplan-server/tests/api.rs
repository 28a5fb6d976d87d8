use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use seatplan_server::api::routes::create_router;
use seatplan_server::config::Settings;

fn app() -> axum::Router {
    create_router(&Settings::default())
}

fn post_optimize(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/optimize")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_returns_ok_and_version() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn optimize_solves_a_small_instance() {
    let payload = json!({
        "tables": [{"id": "t1", "capacity": 2}],
        "guests": [{"id": "g1", "name": "Alice"}]
    });
    let response = app().oneshot(post_optimize(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "OPTIMAL");
    assert_eq!(body["objective_value"], 0);
    assert_eq!(body["tables"][0]["table_id"], "t1");
    assert_eq!(body["tables"][0]["seats"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn float_capacity_is_rejected() {
    let payload = json!({
        "tables": [{"id": "t1", "capacity": 6.0}],
        "guests": [{"id": "g1", "name": "Alice"}]
    });
    let response = app().oneshot(post_optimize(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn string_capacity_is_rejected() {
    let payload = json!({
        "tables": [{"id": "t1", "capacity": "6"}],
        "guests": [{"id": "g1", "name": "Alice"}]
    });
    let response = app().oneshot(post_optimize(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_group_member_is_rejected() {
    let payload = json!({
        "tables": [{"id": "t1", "capacity": 4}],
        "guests": [{"id": "g1", "name": "Alice"}],
        "groups": [{"id": "grp", "guest_ids": ["g1", "ghost"]}]
    });
    let response = app().oneshot(post_optimize(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn unknown_fields_are_rejected() {
    let payload = json!({
        "tables": [{"id": "t1", "capacity": 4, "shape": "round"}],
        "guests": [{"id": "g1", "name": "Alice"}]
    });
    let response = app().oneshot(post_optimize(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

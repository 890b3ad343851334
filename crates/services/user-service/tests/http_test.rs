//! HTTP tests for the user routes, served from the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

use user_service_lib::build_app;
use user_service_lib::config::UserServiceConfig;
use user_service_lib::repository::InMemoryUserStore;

fn app() -> Router {
    let config = UserServiceConfig::from_lookup(|key| {
        (key == "PAGINATOR_LIMIT_DEFAULT").then(|| "10".to_string())
    })
    .unwrap();

    build_app(Arc::new(InMemoryUserStore::new()), None, &config)
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create_user(app: &Router, first_name: &str, last_name: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            json!({"first_name": first_name, "last_name": last_name}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    json_body(response.into_body()).await["data"].clone()
}

#[tokio::test]
async fn test_create_returns_201_with_envelope() {
    let app = app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/users",
            json!({"first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["first_name"], "Ada");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert!(!body["data"]["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_without_names_is_400() {
    let response = app()
        .oneshot(json_request("POST", "/users", json!({"email": "x@example.com"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "first name is required");
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_unknown_user_is_404() {
    let response = app()
        .oneshot(empty_request("GET", "/users/does-not-exist"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "user 'does-not-exist' doesn't exist");
}

#[tokio::test]
async fn test_patch_then_get_reflects_changes() {
    let app = app();
    let user = create_user(&app, "Ada", "Lovelace").await;
    let id = user["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/users/{id}"),
            json!({"phone": "555-0100", "email": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["message"], "user updated successfully");

    let response = app
        .oneshot(empty_request("GET", &format!("/users/{id}")))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["first_name"], "Ada");
    assert_eq!(body["data"]["phone"], "555-0100");
    assert_eq!(body["data"]["email"], "");
}

#[tokio::test]
async fn test_patch_null_fields_are_left_unchanged() {
    let app = app();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            json!({"first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com"}),
        ))
        .await
        .unwrap();
    let created = json_body(response.into_body()).await;
    let id = created["data"]["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/users/{id}"),
            json!({"first_name": null, "email": null, "phone": "1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(empty_request("GET", &format!("/users/{id}")))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["first_name"], "Ada");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["phone"], "1");
}

#[tokio::test]
async fn test_created_user_without_contact_fields_has_null_keys() {
    let app = app();
    let user = create_user(&app, "Ada", "Lovelace").await;

    let fields = user.as_object().unwrap();
    assert!(fields["email"].is_null());
    assert!(fields["phone"].is_null());
}

#[tokio::test]
async fn test_patch_clearing_last_name_is_400() {
    let app = app();
    let user = create_user(&app, "Ada", "Lovelace").await;
    let id = user["id"].as_str().unwrap();

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/users/{id}"),
            json!({"last_name": ""}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"]["message"], "last name is required");
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = app();
    let user = create_user(&app, "Ada", "Lovelace").await;
    let id = user["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/users/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(empty_request("GET", &format!("/users/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_and_paginates() {
    let app = app();
    for (first, last) in [("John", "Smith"), ("Johnny", "Cash"), ("Mary", "Jones")] {
        create_user(&app, first, last).await;
    }

    let response = app
        .oneshot(empty_request("GET", "/users?first_name=JOHN&page=1&limit=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["first_name"], "Johnny");
    assert_eq!(body["meta"]["total_count"], 2);
    assert_eq!(body["meta"]["page_count"], 2);
    assert_eq!(body["meta"]["per_page"], 1);
}

#[tokio::test]
async fn test_list_non_numeric_paging_uses_defaults() {
    let app = app();
    create_user(&app, "Ada", "Lovelace").await;

    let response = app
        .oneshot(empty_request("GET", "/users?page=first&limit=lots"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["per_page"], 10);
}

#[tokio::test]
async fn test_list_negative_limit_is_400() {
    let response = app()
        .oneshot(empty_request("GET", "/users?limit=-1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_without_database() {
    let response = app()
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["backend"], "memory");
}

#[tokio::test]
async fn test_openapi_document_lists_user_routes() {
    let response = app()
        .oneshot(empty_request("GET", "/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert!(body["paths"]["/users"].is_object());
    assert!(body["paths"]["/users/{id}"]["patch"].is_object());
}

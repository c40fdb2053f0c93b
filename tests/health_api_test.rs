mod common;

use axum::http::Method;

use common::{response_json, TestApp};

#[tokio::test]
async fn liveness_and_readiness_respond_without_auth() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["status"], "up");
    assert_eq!(body["environment"], "test");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let response = app.request(Method::GET, "/health/ready", None, None).await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"]["status"], "up");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/api-docs/openapi.json", None, None)
        .await;
    assert_eq!(response.status(), 200);
    let document = response_json(response).await;
    assert_eq!(document["info"]["title"], "Workshop API");
    assert!(document["paths"]["/api/v1/parts"].is_object());
    assert!(document["paths"]["/api/v1/invoices/{id}"].is_object());
    assert!(document["components"]["securitySchemes"]["Bearer"].is_object());
}

#[tokio::test]
async fn unknown_routes_return_404() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/widgets", None)
        .await;
    assert_eq!(response.status(), 404);
}

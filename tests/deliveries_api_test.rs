mod common;

use axum::http::Method;
use serde_json::json;
use uuid::Uuid;

use common::{response_json, TestApp};

#[tokio::test]
async fn delivery_numbers_are_sequential_and_never_reissued() {
    let app = TestApp::new().await;
    let customer = app.seed_customer("Numbering Customer").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/deliveries",
            Some(json!({ "customer_id": customer.id })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let first = response_json(response).await;
    assert_eq!(first["delivery_number"], "DEL-000001");
    assert_eq!(first["status"], "pending");

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/deliveries",
            Some(json!({ "customer_id": customer.id })),
        )
        .await;
    let second = response_json(response).await;
    assert_eq!(second["delivery_number"], "DEL-000002");

    // Deleting the latest delivery does not free its number
    let second_id = second["id"].as_str().expect("delivery id");
    let response = app
        .request_authenticated(
            Method::DELETE,
            &format!("/api/v1/deliveries/{}", second_id),
            None,
        )
        .await;
    assert_eq!(response.status(), 204);

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/deliveries",
            Some(json!({ "customer_id": customer.id })),
        )
        .await;
    let third = response_json(response).await;
    assert_eq!(third["delivery_number"], "DEL-000003");
}

#[tokio::test]
async fn delivery_requires_live_customer_and_build() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/deliveries",
            Some(json!({ "customer_id": Uuid::new_v4() })),
        )
        .await;
    assert_eq!(response.status(), 404);

    let customer = app.seed_customer("Build Checker").await;
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/deliveries",
            Some(json!({ "customer_id": customer.id, "build_id": Uuid::new_v4() })),
        )
        .await;
    assert_eq!(response.status(), 404);

    // A soft-deleted customer is no longer a valid reference
    let doomed = app.seed_customer("Leaving Soon").await;
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/deliveries",
            Some(json!({ "customer_id": doomed.id })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let existing = response_json(response).await;
    let existing_id = existing["id"].as_str().expect("delivery id").to_string();

    app.request_authenticated(
        Method::DELETE,
        &format!("/api/v1/customers/{}", doomed.id),
        None,
    )
    .await;
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/deliveries",
            Some(json!({ "customer_id": doomed.id })),
        )
        .await;
    assert_eq!(response.status(), 404);

    // The delivery created before the soft delete is untouched
    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/deliveries/{}", existing_id),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    let kept = response_json(response).await;
    assert_eq!(kept["customer_id"], doomed.id.to_string().as_str());
}

#[tokio::test]
async fn delivery_sign_off_flow() {
    let app = TestApp::new().await;
    let customer = app.seed_customer("Sign Off").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/deliveries",
            Some(json!({
                "customer_id": customer.id,
                "carrier": "DHL",
                "tracking_number": "JD014600003RF",
                "shipping_city": "Utrecht",
                "requires_signature": true,
                "shipping_cost": "12.50"
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let created = response_json(response).await;
    assert_eq!(created["requires_signature"], true);
    assert!(created["delivery_date"].is_null());
    let delivery_id = created["id"].as_str().expect("delivery id").to_string();

    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/deliveries/{}", delivery_id),
            Some(json!({ "status": "in_transit" })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    assert_eq!(updated["status"], "in_transit");

    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/deliveries/{}", delivery_id),
            Some(json!({
                "status": "delivered",
                "delivery_date": "2026-08-21T14:05:00Z",
                "signed_by": "J. Visser",
                "signature_date": "2026-08-21T14:05:00Z"
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let delivered = response_json(response).await;
    assert_eq!(delivered["status"], "delivered");
    assert_eq!(delivered["signed_by"], "J. Visser");
    assert!(!delivered["delivery_date"].is_null());
}

#[tokio::test]
async fn delivery_filters() {
    let app = TestApp::new().await;
    let alice = app.seed_customer("Alice").await;
    let bob = app.seed_customer("Bob").await;

    app.request_authenticated(
        Method::POST,
        "/api/v1/deliveries",
        Some(json!({ "customer_id": alice.id, "status": "in_transit" })),
    )
    .await;
    app.request_authenticated(
        Method::POST,
        "/api/v1/deliveries",
        Some(json!({ "customer_id": alice.id })),
    )
    .await;
    app.request_authenticated(
        Method::POST,
        "/api/v1/deliveries",
        Some(json!({ "customer_id": bob.id })),
    )
    .await;

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/deliveries?customer_id={}", alice.id),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 2);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/deliveries?status=in_transit", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/deliveries?status=pending&customer_id={}", bob.id),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn delivery_search_matches_tracking_number() {
    let app = TestApp::new().await;
    let customer = app.seed_customer("Tracking").await;

    app.request_authenticated(
        Method::POST,
        "/api/v1/deliveries",
        Some(json!({ "customer_id": customer.id, "tracking_number": "TRACK-ABC-123" })),
    )
    .await;
    app.request_authenticated(
        Method::POST,
        "/api/v1/deliveries",
        Some(json!({ "customer_id": customer.id })),
    )
    .await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/deliveries?search=track-abc", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["tracking_number"], "TRACK-ABC-123");

    // Delivery numbers are searchable too
    let response = app
        .request_authenticated(Method::GET, "/api/v1/deliveries?search=del-000002", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);
}

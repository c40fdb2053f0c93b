mod common;

use axum::http::Method;
use rust_decimal_macros::dec;
use serde_json::json;
use uuid::Uuid;

use common::{decimal_field, response_json, TestApp};

#[tokio::test]
async fn build_with_bill_of_materials() {
    let app = TestApp::new().await;

    let gear = app.seed_part("GEAR-01", "Drive gear", 100).await;
    let axle = app.seed_part("AXLE-01", "Main axle", 100).await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/builds",
            Some(json!({
                "name": "Workbench 2000",
                "model_number": "WB-2000",
                "base_price": "499.00",
                "build_time_hours": "6.5",
                "parts": [
                    { "part_id": gear.id, "quantity": 4 },
                    { "part_id": axle.id, "quantity": 2 }
                ]
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let created = response_json(response).await;
    assert_eq!(created["name"], "Workbench 2000");
    assert_eq!(created["status"], "draft");
    assert_eq!(decimal_field(&created, "base_price"), dec!(499.00));
    let parts = created["parts"].as_array().expect("bom lines");
    assert_eq!(parts.len(), 2);
    let gear_line = parts
        .iter()
        .find(|line| line["part_sku"] == "GEAR-01")
        .expect("gear line");
    assert_eq!(gear_line["part_name"], "Drive gear");
    assert_eq!(gear_line["quantity"], 4);
    let build_id = created["id"].as_str().expect("build id").to_string();

    // Reads include the same assembled parts list
    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/builds/{}", build_id), None)
        .await;
    assert_eq!(response.status(), 200);
    let fetched = response_json(response).await;
    assert_eq!(fetched["parts"].as_array().expect("bom lines").len(), 2);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/builds", None)
        .await;
    let listed = response_json(response).await;
    assert_eq!(listed["total"], 1);
    assert_eq!(
        listed["items"][0]["parts"].as_array().expect("lines").len(),
        2
    );
}

#[tokio::test]
async fn updating_parts_replaces_the_whole_list() {
    let app = TestApp::new().await;

    let first = app.seed_part("P-1", "First part", 10).await;
    let second = app.seed_part("P-2", "Second part", 10).await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/builds",
            Some(json!({
                "name": "Cart",
                "parts": [
                    { "part_id": first.id, "quantity": 3 },
                    { "part_id": second.id, "quantity": 1 }
                ]
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let created = response_json(response).await;
    let build_id = created["id"].as_str().expect("build id").to_string();

    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/builds/{}", build_id),
            Some(json!({
                "parts": [ { "part_id": second.id, "quantity": 5 } ]
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    let parts = updated["parts"].as_array().expect("bom lines");
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0]["part_sku"], "P-2");
    assert_eq!(parts[0]["quantity"], 5);

    // An update without a parts field leaves the list untouched
    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/builds/{}", build_id),
            Some(json!({ "name": "Cart Mk2" })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    assert_eq!(updated["name"], "Cart Mk2");
    assert_eq!(updated["parts"].as_array().expect("bom lines").len(), 1);

    // An explicit empty list clears the bill of materials
    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/builds/{}", build_id),
            Some(json!({ "parts": [] })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    assert_eq!(updated["parts"].as_array().expect("bom lines").len(), 0);
}

#[tokio::test]
async fn bom_referencing_unknown_part_fails() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/builds",
            Some(json!({
                "name": "Ghost build",
                "parts": [ { "part_id": Uuid::new_v4(), "quantity": 1 } ]
            })),
        )
        .await;
    assert_eq!(response.status(), 404);

    // Soft-deleted parts cannot be referenced either
    let part = app.seed_part("GONE-1", "Vanishing part", 1).await;
    let response = app
        .request_authenticated(Method::DELETE, &format!("/api/v1/parts/{}", part.id), None)
        .await;
    assert_eq!(response.status(), 204);

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/builds",
            Some(json!({
                "name": "Stale build",
                "parts": [ { "part_id": part.id, "quantity": 1 } ]
            })),
        )
        .await;
    assert_eq!(response.status(), 404);

    // Nothing was half-created along the way
    let response = app
        .request_authenticated(Method::GET, "/api/v1/builds", None)
        .await;
    let listed = response_json(response).await;
    assert_eq!(listed["total"], 0);

    // The same check guards updates, and the failed replace rolls back
    let live = app.seed_part("LIVE-1", "Live part", 5).await;
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/builds",
            Some(json!({
                "name": "Rollback probe",
                "parts": [ { "part_id": live.id, "quantity": 2 } ]
            })),
        )
        .await;
    let build = response_json(response).await;
    let build_id = build["id"].as_str().expect("build id").to_string();

    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/builds/{}", build_id),
            Some(json!({
                "parts": [ { "part_id": Uuid::new_v4(), "quantity": 1 } ]
            })),
        )
        .await;
    assert_eq!(response.status(), 404);

    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/builds/{}", build_id), None)
        .await;
    let fetched = response_json(response).await;
    let parts = fetched["parts"].as_array().expect("bom lines");
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0]["part_sku"], "LIVE-1");
}

#[tokio::test]
async fn bom_rejects_duplicates_and_non_positive_quantities() {
    let app = TestApp::new().await;
    let part = app.seed_part("DUP-1", "Duplicated part", 10).await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/builds",
            Some(json!({
                "name": "Doubled",
                "parts": [
                    { "part_id": part.id, "quantity": 1 },
                    { "part_id": part.id, "quantity": 2 }
                ]
            })),
        )
        .await;
    assert_eq!(response.status(), 400);

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/builds",
            Some(json!({
                "name": "Zero quantity",
                "parts": [ { "part_id": part.id, "quantity": 0 } ]
            })),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn duplicate_model_number_conflicts() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/builds",
            Some(json!({ "name": "Original", "model_number": "MX-1" })),
        )
        .await;
    assert_eq!(response.status(), 201);

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/builds",
            Some(json!({ "name": "Copycat", "model_number": "MX-1" })),
        )
        .await;
    assert_eq!(response.status(), 409);

    // Builds without a model number never collide
    for name in ["Unnamed A", "Unnamed B"] {
        let response = app
            .request_authenticated(Method::POST, "/api/v1/builds", Some(json!({ "name": name })))
            .await;
        assert_eq!(response.status(), 201);
    }
}

#[tokio::test]
async fn status_filter_and_soft_delete() {
    let app = TestApp::new().await;

    app.request_authenticated(
        Method::POST,
        "/api/v1/builds",
        Some(json!({ "name": "In the works", "status": "in_production" })),
    )
    .await;
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/builds",
            Some(json!({ "name": "Just an idea" })),
        )
        .await;
    let draft = response_json(response).await;
    let draft_id = draft["id"].as_str().expect("build id").to_string();

    let response = app
        .request_authenticated(Method::GET, "/api/v1/builds?status=in_production", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["name"], "In the works");

    let response = app
        .request_authenticated(Method::DELETE, &format!("/api/v1/builds/{}", draft_id), None)
        .await;
    assert_eq!(response.status(), 204);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/builds", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);
}

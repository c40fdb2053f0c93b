mod common;

use axum::http::Method;
use rust_decimal_macros::dec;
use serde_json::json;

use common::{decimal_field, response_json, TestApp};

#[tokio::test]
async fn part_lifecycle() {
    let app = TestApp::new().await;

    let create_payload = json!({
        "sku": "GEAR-M8-STL",
        "name": "M8 steel gear",
        "description": "Hardened steel gear, module 8",
        "category": "gears",
        "current_stock": 25,
        "minimum_stock": 10,
        "unit_price": "2.50",
        "specifications": { "material": "steel", "module": 8 }
    });

    let response = app
        .request_authenticated(Method::POST, "/api/v1/parts", Some(create_payload))
        .await;
    assert_eq!(response.status(), 201);
    let created = response_json(response).await;
    assert_eq!(created["sku"], "GEAR-M8-STL");
    assert_eq!(created["current_stock"], 25);
    assert_eq!(created["is_low_stock"], false);
    assert_eq!(created["stock_status"], "in_stock");
    assert_eq!(decimal_field(&created, "unit_price"), dec!(2.50));
    assert_eq!(created["specifications"]["material"], "steel");
    assert!(created["deleted_at"].is_null());
    let part_id = created["id"].as_str().expect("part id").to_string();

    // Fetch it back
    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/parts/{}", part_id), None)
        .await;
    assert_eq!(response.status(), 200);
    let fetched = response_json(response).await;
    assert_eq!(fetched["name"], "M8 steel gear");

    // Partial update leaves untouched fields alone
    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/parts/{}", part_id),
            Some(json!({ "name": "M8 steel gear (rev B)", "unit_price": "2.75" })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    assert_eq!(updated["name"], "M8 steel gear (rev B)");
    assert_eq!(updated["sku"], "GEAR-M8-STL");
    assert_eq!(decimal_field(&updated, "unit_price"), dec!(2.75));

    // Soft delete, then the part is gone from reads
    let response = app
        .request_authenticated(Method::DELETE, &format!("/api/v1/parts/{}", part_id), None)
        .await;
    assert_eq!(response.status(), 204);

    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/parts/{}", part_id), None)
        .await;
    assert_eq!(response.status(), 404);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts", None)
        .await;
    let listed = response_json(response).await;
    assert_eq!(listed["total"], 0);
    assert_eq!(listed["items"].as_array().expect("items").len(), 0);
}

#[tokio::test]
async fn duplicate_sku_is_rejected_even_after_soft_delete() {
    let app = TestApp::new().await;

    let part = app.seed_part("BRKT-01", "Mounting bracket", 5).await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/parts",
            Some(json!({ "sku": "BRKT-01", "name": "Other bracket" })),
        )
        .await;
    assert_eq!(response.status(), 409);
    let body = response_json(response).await;
    assert!(body["message"]
        .as_str()
        .expect("conflict message")
        .contains("BRKT-01"));

    // Soft-deleted rows still hold their SKU
    let response = app
        .request_authenticated(Method::DELETE, &format!("/api/v1/parts/{}", part.id), None)
        .await;
    assert_eq!(response.status(), 204);

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/parts",
            Some(json!({ "sku": "BRKT-01", "name": "Other bracket" })),
        )
        .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn renaming_sku_onto_existing_part_conflicts() {
    let app = TestApp::new().await;

    app.seed_part("AX-100", "Axle 100mm", 5).await;
    let other = app.seed_part("AX-200", "Axle 200mm", 5).await;

    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/parts/{}", other.id),
            Some(json!({ "sku": "AX-100" })),
        )
        .await;
    assert_eq!(response.status(), 409);

    // Writing its own SKU back is not a conflict
    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/parts/{}", other.id),
            Some(json!({ "sku": "AX-200" })),
        )
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn stock_adjustment_respects_floor_at_zero() {
    let app = TestApp::new().await;
    let part = app.seed_part("SCREW-M4", "M4 screw", 5).await;

    // Overdraw fails and leaves stock untouched
    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/parts/{}/stock", part.id),
            Some(json!({ "quantity": -10, "reason": "damaged batch" })),
        )
        .await;
    assert_eq!(response.status(), 400);

    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/parts/{}", part.id), None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["current_stock"], 5);

    // Draining to exactly zero is allowed
    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/parts/{}/stock", part.id),
            Some(json!({ "quantity": -5 })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["current_stock"], 0);
    assert_eq!(body["stock_status"], "out_of_stock");

    // Receive stock back in
    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/parts/{}/stock", part.id),
            Some(json!({ "quantity": 40, "reason": "goods receipt" })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["current_stock"], 40);
    assert_eq!(body["stock_status"], "in_stock");
}

#[tokio::test]
async fn low_stock_filter_and_status() {
    let app = TestApp::new().await;

    app.state
        .services
        .parts
        .create_part(workshop_api::services::parts::CreatePartInput {
            sku: "LOW-1".to_string(),
            name: "Nearly out".to_string(),
            description: None,
            category: None,
            specifications: None,
            current_stock: 2,
            minimum_stock: 10,
            unit_price: None,
        })
        .await
        .expect("seed low stock part");
    app.seed_part("FULL-1", "Well stocked", 50).await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts?low_stock_only=true", None)
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["sku"], "LOW-1");
    assert_eq!(body["items"][0]["is_low_stock"], true);
    assert_eq!(body["items"][0]["stock_status"], "low_stock");
}

#[tokio::test]
async fn search_matches_sku_name_and_description_case_insensitively() {
    let app = TestApp::new().await;

    app.request_authenticated(
        Method::POST,
        "/api/v1/parts",
        Some(json!({
            "sku": "PLT-STEEL-3",
            "name": "Base plate",
            "description": "3mm laser-cut steel plate"
        })),
    )
    .await;
    app.seed_part("WHL-RBR-6", "Rubber wheel", 10).await;

    // Hits on name
    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts?search=BASE", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["sku"], "PLT-STEEL-3");

    // Hits on description
    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts?search=laser-cut", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);

    // Hits on SKU, different casing
    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts?search=whl-rbr", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["sku"], "WHL-RBR-6");

    // No match
    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts?search=turbine", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn category_filter_and_category_listing() {
    let app = TestApp::new().await;

    for (sku, category) in [
        ("G-1", "gears"),
        ("G-2", "gears"),
        ("F-1", "fasteners"),
        ("U-1", ""),
    ] {
        let mut payload = json!({ "sku": sku, "name": format!("Part {}", sku) });
        if !category.is_empty() {
            payload["category"] = json!(category);
        }
        let response = app
            .request_authenticated(Method::POST, "/api/v1/parts", Some(payload))
            .await;
        assert_eq!(response.status(), 201);
    }

    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts?category=gears", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 2);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/parts/categories/list", None)
        .await;
    assert_eq!(response.status(), 200);
    let categories = response_json(response).await;
    let categories = categories.as_array().expect("category array");
    assert_eq!(categories.len(), 2);
    assert!(categories.contains(&json!("fasteners")));
    assert!(categories.contains(&json!("gears")));
}

#[tokio::test]
async fn create_rejects_bad_input() {
    let app = TestApp::new().await;

    // Empty SKU
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/parts",
            Some(json!({ "sku": "", "name": "No sku" })),
        )
        .await;
    assert_eq!(response.status(), 400);

    // Negative price
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/parts",
            Some(json!({ "sku": "NEG-1", "name": "Negative", "unit_price": "-1.00" })),
        )
        .await;
    assert_eq!(response.status(), 400);

    // Negative starting stock
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/parts",
            Some(json!({ "sku": "NEG-2", "name": "Negative stock", "current_stock": -3 })),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn requests_without_token_are_rejected() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/v1/parts", None, None).await;
    assert_eq!(response.status(), 401);

    let response = app
        .request(
            Method::POST,
            "/api/v1/parts",
            Some(json!({ "sku": "X", "name": "X" })),
            Some("not-a-real-token"),
        )
        .await;
    assert_eq!(response.status(), 401);
}

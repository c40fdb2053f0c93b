mod common;

use axum::http::Method;
use rust_decimal_macros::dec;
use serde_json::json;
use uuid::Uuid;

use common::{decimal_field, response_json, TestApp};

#[tokio::test]
async fn invoice_amounts_derive_from_subtotal() {
    let app = TestApp::new().await;
    let customer = app.seed_customer("Invoice Customer").await;

    // Default tax rate, no discount
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/invoices",
            Some(json!({
                "customer_id": customer.id,
                "due_date": "2026-09-30T00:00:00Z",
                "subtotal": "100.00"
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let created = response_json(response).await;
    assert_eq!(created["invoice_number"], "INV-000001");
    assert_eq!(created["status"], "draft");
    assert_eq!(decimal_field(&created, "subtotal"), dec!(100.00));
    assert_eq!(decimal_field(&created, "tax_rate"), dec!(19.0));
    assert_eq!(decimal_field(&created, "tax_amount"), dec!(19.00));
    assert_eq!(decimal_field(&created, "discount_amount"), dec!(0));
    assert_eq!(decimal_field(&created, "total_amount"), dec!(119.00));
    assert_eq!(created["reminder_sent"], false);
    assert_eq!(created["reminder_count"], 0);

    // Explicit rate and discount
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/invoices",
            Some(json!({
                "customer_id": customer.id,
                "due_date": "2026-09-30T00:00:00Z",
                "subtotal": "200.00",
                "tax_rate": "21.0",
                "discount_amount": "10.00"
            })),
        )
        .await;
    let second = response_json(response).await;
    assert_eq!(second["invoice_number"], "INV-000002");
    assert_eq!(decimal_field(&second, "tax_amount"), dec!(42.00));
    assert_eq!(decimal_field(&second, "total_amount"), dec!(232.00));

    // Tax rounds half away from zero at the third decimal
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/invoices",
            Some(json!({
                "customer_id": customer.id,
                "due_date": "2026-09-30T00:00:00Z",
                "subtotal": "12.50"
            })),
        )
        .await;
    let third = response_json(response).await;
    assert_eq!(decimal_field(&third, "tax_amount"), dec!(2.38));
    assert_eq!(decimal_field(&third, "total_amount"), dec!(14.88));
}

#[tokio::test]
async fn updating_financial_inputs_recomputes_amounts() {
    let app = TestApp::new().await;
    let customer = app.seed_customer("Recompute").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/invoices",
            Some(json!({
                "customer_id": customer.id,
                "due_date": "2026-10-15T00:00:00Z",
                "subtotal": "100.00"
            })),
        )
        .await;
    let created = response_json(response).await;
    let invoice_id = created["id"].as_str().expect("invoice id").to_string();

    // New subtotal, stored rate sticks
    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/invoices/{}", invoice_id),
            Some(json!({ "subtotal": "50.00" })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let updated = response_json(response).await;
    assert_eq!(decimal_field(&updated, "tax_amount"), dec!(9.50));
    assert_eq!(decimal_field(&updated, "total_amount"), dec!(59.50));

    // Discount alone also recomputes
    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/invoices/{}", invoice_id),
            Some(json!({ "discount_amount": "5.00" })),
        )
        .await;
    let updated = response_json(response).await;
    assert_eq!(decimal_field(&updated, "subtotal"), dec!(50.00));
    assert_eq!(decimal_field(&updated, "total_amount"), dec!(54.50));

    // Touching a non-financial field leaves the amounts alone
    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/invoices/{}", invoice_id),
            Some(json!({ "notes": "net 30" })),
        )
        .await;
    let updated = response_json(response).await;
    assert_eq!(updated["notes"], "net 30");
    assert_eq!(decimal_field(&updated, "tax_amount"), dec!(9.50));
    assert_eq!(decimal_field(&updated, "total_amount"), dec!(54.50));
}

#[tokio::test]
async fn invoice_payment_flow() {
    let app = TestApp::new().await;
    let customer = app.seed_customer("Payer").await;

    let delivery = app
        .request_authenticated(
            Method::POST,
            "/api/v1/deliveries",
            Some(json!({ "customer_id": customer.id })),
        )
        .await;
    let delivery = response_json(delivery).await;
    let delivery_id = delivery["id"].as_str().expect("delivery id").to_string();

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/invoices",
            Some(json!({
                "customer_id": customer.id,
                "delivery_id": delivery_id,
                "due_date": "2026-09-20T00:00:00Z",
                "subtotal": "480.00",
                "payment_method": "bank_transfer"
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let created = response_json(response).await;
    let invoice_id = created["id"].as_str().expect("invoice id").to_string();
    assert_eq!(created["delivery_id"], delivery_id.as_str());

    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/invoices/{}", invoice_id),
            Some(json!({ "status": "sent" })),
        )
        .await;
    assert_eq!(response_json(response).await["status"], "sent");

    let response = app
        .request_authenticated(
            Method::PATCH,
            &format!("/api/v1/invoices/{}", invoice_id),
            Some(json!({
                "status": "paid",
                "paid_date": "2026-09-18T09:00:00Z",
                "payment_reference": "SEPA-2026-0042"
            })),
        )
        .await;
    let paid = response_json(response).await;
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["payment_reference"], "SEPA-2026-0042");
    assert!(!paid["paid_date"].is_null());
}

#[tokio::test]
async fn invoice_reference_and_input_validation() {
    let app = TestApp::new().await;
    let customer = app.seed_customer("Validation").await;

    // Unknown customer
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/invoices",
            Some(json!({
                "customer_id": Uuid::new_v4(),
                "due_date": "2026-09-30T00:00:00Z",
                "subtotal": "10.00"
            })),
        )
        .await;
    assert_eq!(response.status(), 404);

    // Unknown delivery
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/invoices",
            Some(json!({
                "customer_id": customer.id,
                "delivery_id": Uuid::new_v4(),
                "due_date": "2026-09-30T00:00:00Z",
                "subtotal": "10.00"
            })),
        )
        .await;
    assert_eq!(response.status(), 404);

    // Negative subtotal
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/invoices",
            Some(json!({
                "customer_id": customer.id,
                "due_date": "2026-09-30T00:00:00Z",
                "subtotal": "-1.00"
            })),
        )
        .await;
    assert_eq!(response.status(), 400);

    // Tax rate beyond 100 percent
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/invoices",
            Some(json!({
                "customer_id": customer.id,
                "due_date": "2026-09-30T00:00:00Z",
                "subtotal": "10.00",
                "tax_rate": "150"
            })),
        )
        .await;
    assert_eq!(response.status(), 400);

    // Negative discount
    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/invoices",
            Some(json!({
                "customer_id": customer.id,
                "due_date": "2026-09-30T00:00:00Z",
                "subtotal": "10.00",
                "discount_amount": "-2.00"
            })),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn invoice_filters_and_search() {
    let app = TestApp::new().await;
    let alice = app.seed_customer("Alice Invoices").await;
    let bob = app.seed_customer("Bob Invoices").await;

    for customer_id in [alice.id, alice.id, bob.id] {
        let response = app
            .request_authenticated(
                Method::POST,
                "/api/v1/invoices",
                Some(json!({
                    "customer_id": customer_id,
                    "due_date": "2026-09-30T00:00:00Z",
                    "subtotal": "10.00"
                })),
            )
            .await;
        assert_eq!(response.status(), 201);
    }

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/invoices?customer_id={}", alice.id),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 2);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/invoices?status=draft", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 3);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/invoices?search=inv-000003", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["invoice_number"], "INV-000003");

    // Soft delete hides the invoice from lists but keeps its number taken
    let target = body["items"][0]["id"].as_str().expect("invoice id");
    let response = app
        .request_authenticated(Method::DELETE, &format!("/api/v1/invoices/{}", target), None)
        .await;
    assert_eq!(response.status(), 204);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/invoices", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 2);

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/invoices",
            Some(json!({
                "customer_id": bob.id,
                "due_date": "2026-09-30T00:00:00Z",
                "subtotal": "10.00"
            })),
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["invoice_number"], "INV-000004");
}

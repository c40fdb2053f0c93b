#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;
use uuid::Uuid;
use workshop_api::{
    auth::AuthService,
    config::AppConfig,
    db,
    entities::{customer, part},
    events::{self, EventSender},
    services::{
        customers::CreateCustomerInput,
        factory::{AppServices, ServiceFactory},
        parts::CreatePartInput,
    },
    AppState,
};

/// Harness that spins up the full router against a fresh in-memory SQLite
/// database. Each instance owns its own database, so tests can run in
/// parallel without stepping on each other.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    token: String,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "test_secret_key_for_testing_purposes_only_32chars".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // A single connection keeps the in-memory database alive for the
        // lifetime of the pool.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");
        let db_arc = Arc::new(pool);

        let (event_tx, event_rx) = mpsc::channel(cfg.event_channel_capacity);
        let event_sender = Arc::new(EventSender::new(event_tx));
        let event_task = tokio::spawn(events::process_events(event_rx));

        let auth = AuthService::new(cfg.jwt_secret.clone(), cfg.jwt_expiration);
        let token = auth
            .issue_token("test-user")
            .expect("issue token for tests");

        let factory = ServiceFactory::new(
            db_arc.clone(),
            event_sender.clone(),
            cfg.default_tax_rate_decimal(),
        );
        let services = AppServices::new(&factory);

        let state = AppState {
            db: db_arc,
            config: Arc::new(cfg),
            auth,
            event_sender,
            services,
        };
        let router = workshop_api::app_router(state.clone());

        Self {
            router,
            state,
            token,
            _event_task: event_task,
        }
    }

    /// Access the bearer token for the default test user.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Convenience helper for authenticated JSON requests.
    pub async fn request_authenticated(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Response {
        self.request(method, uri, body, Some(self.token())).await
    }

    /// Insert a part directly through the service layer.
    pub async fn seed_part(&self, sku: &str, name: &str, current_stock: i32) -> part::Model {
        self.state
            .services
            .parts
            .create_part(CreatePartInput {
                sku: sku.to_string(),
                name: name.to_string(),
                description: None,
                category: None,
                specifications: None,
                current_stock,
                minimum_stock: 0,
                unit_price: None,
            })
            .await
            .expect("seed part for tests")
    }

    /// Insert a customer directly through the service layer.
    pub async fn seed_customer(&self, name: &str) -> customer::Model {
        self.state
            .services
            .customers
            .create_customer(CreateCustomerInput {
                name: name.to_string(),
                contact_person: None,
                email: Some(format!(
                    "{}@example.com",
                    name.to_lowercase().replace(' ', ".")
                )),
                phone: None,
                company_name: None,
                tax_id: None,
                address_line1: None,
                address_line2: None,
                city: None,
                state: None,
                postal_code: None,
                country: None,
                website: None,
                notes: None,
                customer_type: None,
                is_active: true,
            })
            .await
            .expect("seed customer for tests")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}

/// Collect a response body into JSON.
pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

/// Parse a decimal field that the API serializes as a string.
pub fn decimal_field(value: &Value, key: &str) -> Decimal {
    value[key]
        .as_str()
        .unwrap_or_else(|| panic!("expected string decimal at `{}`, got {}", key, value[key]))
        .parse()
        .expect("parse decimal field")
}

/// Parse the `id` field of a JSON payload as a UUID.
pub fn id_field(value: &Value) -> Uuid {
    value["id"]
        .as_str()
        .expect("expected id field")
        .parse()
        .expect("parse id as uuid")
}

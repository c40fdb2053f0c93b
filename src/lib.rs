//! Workshop API Library
//!
//! This crate provides the core functionality for the workshop API:
//! parts inventory, suppliers, customers, product builds with bills of
//! materials, deliveries and invoicing.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod sequence;
pub mod services;

use axum::Router;
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<db::DbPool>,
    pub config: Arc<config::AppConfig>,
    pub auth: auth::AuthService,
    pub event_sender: Arc<events::EventSender>,
    pub services: services::factory::AppServices,
}

/// All resource routers, to be nested under the configured API prefix
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/parts", handlers::parts::part_routes())
        .nest("/suppliers", handlers::suppliers::supplier_routes())
        .nest("/customers", handlers::customers::customer_routes())
        .nest("/builds", handlers::builds::build_routes())
        .nest("/deliveries", handlers::deliveries::delivery_routes())
        .nest("/invoices", handlers::invoices::invoice_routes())
}

/// Assembles the full application router: versioned API, health probes
/// and the served OpenAPI document.
pub fn app_router(state: AppState) -> Router {
    let api_prefix = state.config.api_prefix.clone();

    Router::new()
        .nest(&api_prefix, api_v1_routes())
        .nest("/health", handlers::health::health_routes())
        .merge(openapi::swagger_ui())
        .with_state(state)
}

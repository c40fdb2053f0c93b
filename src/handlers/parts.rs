use super::common::{resolve_pagination, validate_input, validate_non_negative, Paginated};
use crate::{
    auth::AuthUser,
    entities::{part, StockStatus},
    errors::ServiceError,
    handlers::AppState,
    services::parts::{CreatePartInput, PartListQuery, StockAdjustmentInput, UpdatePartInput},
};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Creates the router for part endpoints
pub fn part_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_parts).post(create_part))
        .route("/categories/list", get(list_categories))
        .route("/:id", get(get_part).patch(update_part).delete(delete_part))
        .route("/:id/stock", patch(adjust_stock))
}

/// List parts with pagination and filtering
#[utoipa::path(
    get,
    path = "/api/v1/parts",
    params(PartListParams),
    responses(
        (status = 200, description = "Parts retrieved", body = Paginated<PartResponse>),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Parts"
)]
pub async fn list_parts(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PartListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (page, per_page) = resolve_pagination(params.page, params.per_page, &state.config)?;

    let (parts, total) = state
        .services
        .parts
        .list_parts(PartListQuery {
            search: params.search,
            category: params.category,
            low_stock_only: params.low_stock_only.unwrap_or(false),
            page,
            per_page,
        })
        .await?;

    let items: Vec<PartResponse> = parts.into_iter().map(PartResponse::from).collect();

    Ok(Json(Paginated::new(items, total, page, per_page)))
}

/// Create a new part
#[utoipa::path(
    post,
    path = "/api/v1/parts",
    request_body = CreatePartRequest,
    responses(
        (status = 201, description = "Part created", body = PartResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 409, description = "SKU already in use", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Parts"
)]
pub async fn create_part(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreatePartRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let part = state
        .services
        .parts
        .create_part(CreatePartInput {
            sku: payload.sku,
            name: payload.name,
            description: payload.description,
            category: payload.category,
            specifications: payload.specifications,
            current_stock: payload.current_stock.unwrap_or(0),
            minimum_stock: payload.minimum_stock.unwrap_or(0),
            unit_price: payload.unit_price,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PartResponse::from(part))))
}

/// Get a part by ID
#[utoipa::path(
    get,
    path = "/api/v1/parts/{id}",
    params(
        ("id" = Uuid, Path, description = "Part ID")
    ),
    responses(
        (status = 200, description = "Part retrieved", body = PartResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Part not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Parts"
)]
pub async fn get_part(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let part = state.services.parts.get_part(id).await?;

    Ok(Json(PartResponse::from(part)))
}

/// Update a part
#[utoipa::path(
    patch,
    path = "/api/v1/parts/{id}",
    params(
        ("id" = Uuid, Path, description = "Part ID")
    ),
    request_body = UpdatePartRequest,
    responses(
        (status = 200, description = "Part updated", body = PartResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Part not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "SKU already in use", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Parts"
)]
pub async fn update_part(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePartRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let part = state
        .services
        .parts
        .update_part(
            id,
            UpdatePartInput {
                sku: payload.sku,
                name: payload.name,
                description: payload.description,
                category: payload.category,
                specifications: payload.specifications,
                minimum_stock: payload.minimum_stock,
                unit_price: payload.unit_price,
            },
        )
        .await?;

    Ok(Json(PartResponse::from(part)))
}

/// Soft delete a part
#[utoipa::path(
    delete,
    path = "/api/v1/parts/{id}",
    params(
        ("id" = Uuid, Path, description = "Part ID")
    ),
    responses(
        (status = 204, description = "Part deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Part not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Parts"
)]
pub async fn delete_part(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.parts.delete_part(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Adjust part stock by a signed delta
#[utoipa::path(
    patch,
    path = "/api/v1/parts/{id}/stock",
    params(
        ("id" = Uuid, Path, description = "Part ID")
    ),
    request_body = StockAdjustmentRequest,
    responses(
        (status = 200, description = "Stock adjusted", body = PartResponse),
        (status = 400, description = "Adjustment would drive stock negative", body = crate::errors::ErrorResponse),
        (status = 404, description = "Part not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Parts"
)]
pub async fn adjust_stock(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StockAdjustmentRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let part = state
        .services
        .parts
        .adjust_stock(
            id,
            StockAdjustmentInput {
                quantity: payload.quantity,
                reason: payload.reason,
            },
        )
        .await?;

    Ok(Json(PartResponse::from(part)))
}

/// List the distinct categories in use
#[utoipa::path(
    get,
    path = "/api/v1/parts/categories/list",
    responses(
        (status = 200, description = "Categories retrieved", body = Vec<String>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Parts"
)]
pub async fn list_categories(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let categories = state.services.parts.list_categories().await?;

    Ok(Json(categories))
}

// Request/Response DTOs

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PartListParams {
    /// Page number, starting at 1
    #[serde(default)]
    pub page: Option<u64>,
    /// Items per page
    #[serde(default)]
    pub per_page: Option<u64>,
    /// Case-insensitive match against SKU, name or description
    #[serde(default)]
    pub search: Option<String>,
    /// Filter by exact category
    #[serde(default)]
    pub category: Option<String>,
    /// Only return parts below their minimum stock
    #[serde(default)]
    pub low_stock_only: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePartRequest {
    /// Stock keeping unit, unique among live parts
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "GEAR-M8-STL")]
    pub sku: String,
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "M8 steel gear")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub category: Option<String>,
    /// Open-ended key-value details (material, dimensions, ...)
    #[serde(default)]
    pub specifications: Option<Value>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub current_stock: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub minimum_stock: Option<i32>,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    #[schema(example = "2.50")]
    pub unit_price: Option<Decimal>,
}

/// Stock is deliberately absent here; it only moves through the stock
/// adjustment endpoint.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePartRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub sku: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[serde(default)]
    pub specifications: Option<Value>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub minimum_stock: Option<i32>,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StockAdjustmentRequest {
    /// Positive to add, negative to remove
    #[schema(example = -5)]
    pub quantity: i32,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PartResponse {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub specifications: Option<Value>,
    pub current_stock: i32,
    pub minimum_stock: i32,
    pub unit_price: Option<Decimal>,
    /// current_stock strictly below minimum_stock
    pub is_low_stock: bool,
    pub stock_status: StockStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<part::Model> for PartResponse {
    fn from(model: part::Model) -> Self {
        let is_low_stock = model.is_low_stock();
        let stock_status = model.stock_status();

        Self {
            id: model.id,
            sku: model.sku,
            name: model.name,
            description: model.description,
            category: model.category,
            specifications: model.specifications,
            current_stock: model.current_stock,
            minimum_stock: model.minimum_stock,
            unit_price: model.unit_price,
            is_low_stock,
            stock_status,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}

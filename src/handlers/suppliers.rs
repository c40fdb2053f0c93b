use super::common::{resolve_pagination, validate_input, Paginated};
use crate::{
    auth::AuthUser,
    entities::supplier,
    errors::ServiceError,
    handlers::AppState,
    services::suppliers::{CreateSupplierInput, SupplierListQuery, UpdateSupplierInput},
};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Creates the router for supplier endpoints
pub fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_suppliers).post(create_supplier))
        .route(
            "/:id",
            get(get_supplier).patch(update_supplier).delete(delete_supplier),
        )
}

/// List suppliers with pagination and filtering
#[utoipa::path(
    get,
    path = "/api/v1/suppliers",
    params(SupplierListParams),
    responses(
        (status = 200, description = "Suppliers retrieved", body = Paginated<SupplierResponse>),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Suppliers"
)]
pub async fn list_suppliers(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SupplierListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (page, per_page) = resolve_pagination(params.page, params.per_page, &state.config)?;

    let (suppliers, total) = state
        .services
        .suppliers
        .list_suppliers(SupplierListQuery {
            search: params.search,
            active_only: params.active_only.unwrap_or(false),
            page,
            per_page,
        })
        .await?;

    let items: Vec<SupplierResponse> = suppliers.into_iter().map(SupplierResponse::from).collect();

    Ok(Json(Paginated::new(items, total, page, per_page)))
}

/// Create a new supplier
#[utoipa::path(
    post,
    path = "/api/v1/suppliers",
    request_body = CreateSupplierRequest,
    responses(
        (status = 201, description = "Supplier created", body = SupplierResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Suppliers"
)]
pub async fn create_supplier(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateSupplierRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let supplier = state
        .services
        .suppliers
        .create_supplier(CreateSupplierInput {
            name: payload.name,
            contact_person: payload.contact_person,
            email: payload.email,
            phone: payload.phone,
            address_line1: payload.address_line1,
            address_line2: payload.address_line2,
            city: payload.city,
            state: payload.state,
            postal_code: payload.postal_code,
            country: payload.country,
            website: payload.website,
            notes: payload.notes,
            rating: payload.rating,
            is_active: payload.is_active.unwrap_or(true),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(SupplierResponse::from(supplier))))
}

/// Get a supplier by ID
#[utoipa::path(
    get,
    path = "/api/v1/suppliers/{id}",
    params(
        ("id" = Uuid, Path, description = "Supplier ID")
    ),
    responses(
        (status = 200, description = "Supplier retrieved", body = SupplierResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Suppliers"
)]
pub async fn get_supplier(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let supplier = state.services.suppliers.get_supplier(id).await?;

    Ok(Json(SupplierResponse::from(supplier)))
}

/// Update a supplier
#[utoipa::path(
    patch,
    path = "/api/v1/suppliers/{id}",
    params(
        ("id" = Uuid, Path, description = "Supplier ID")
    ),
    request_body = UpdateSupplierRequest,
    responses(
        (status = 200, description = "Supplier updated", body = SupplierResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already in use", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Suppliers"
)]
pub async fn update_supplier(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSupplierRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let supplier = state
        .services
        .suppliers
        .update_supplier(
            id,
            UpdateSupplierInput {
                name: payload.name,
                contact_person: payload.contact_person,
                email: payload.email,
                phone: payload.phone,
                address_line1: payload.address_line1,
                address_line2: payload.address_line2,
                city: payload.city,
                state: payload.state,
                postal_code: payload.postal_code,
                country: payload.country,
                website: payload.website,
                notes: payload.notes,
                rating: payload.rating,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok(Json(SupplierResponse::from(supplier)))
}

/// Soft delete a supplier
#[utoipa::path(
    delete,
    path = "/api/v1/suppliers/{id}",
    params(
        ("id" = Uuid, Path, description = "Supplier ID")
    ),
    responses(
        (status = 204, description = "Supplier deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Suppliers"
)]
pub async fn delete_supplier(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.suppliers.delete_supplier(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// Request/Response DTOs

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SupplierListParams {
    /// Page number, starting at 1
    #[serde(default)]
    pub page: Option<u64>,
    /// Items per page
    #[serde(default)]
    pub per_page: Option<u64>,
    /// Case-insensitive match against name, contact person or email
    #[serde(default)]
    pub search: Option<String>,
    /// Only return active suppliers
    #[serde(default)]
    pub active_only: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSupplierRequest {
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Precision Castings Ltd")]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub contact_person: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub address_line1: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub address_line2: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub website: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// 1 (worst) to 5 (best)
    #[serde(default)]
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSupplierRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub contact_person: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub address_line1: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub address_line2: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub website: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierResponse {
    pub id: Uuid,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub rating: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<supplier::Model> for SupplierResponse {
    fn from(model: supplier::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            contact_person: model.contact_person,
            email: model.email,
            phone: model.phone,
            address_line1: model.address_line1,
            address_line2: model.address_line2,
            city: model.city,
            state: model.state,
            postal_code: model.postal_code,
            country: model.country,
            website: model.website,
            notes: model.notes,
            rating: model.rating,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}

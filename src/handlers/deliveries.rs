use super::common::{resolve_pagination, validate_input, validate_non_negative, Paginated};
use crate::{
    auth::AuthUser,
    entities::{delivery, DeliveryStatus},
    errors::ServiceError,
    handlers::AppState,
    services::deliveries::{CreateDeliveryInput, DeliveryListQuery, UpdateDeliveryInput},
};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Creates the router for delivery endpoints
pub fn delivery_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_deliveries).post(create_delivery))
        .route(
            "/:id",
            get(get_delivery).patch(update_delivery).delete(delete_delivery),
        )
}

/// List deliveries with pagination and filtering
#[utoipa::path(
    get,
    path = "/api/v1/deliveries",
    params(DeliveryListParams),
    responses(
        (status = 200, description = "Deliveries retrieved", body = Paginated<DeliveryResponse>),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Deliveries"
)]
pub async fn list_deliveries(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<DeliveryListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (page, per_page) = resolve_pagination(params.page, params.per_page, &state.config)?;

    let (deliveries, total) = state
        .services
        .deliveries
        .list_deliveries(DeliveryListQuery {
            search: params.search,
            status: params.status,
            customer_id: params.customer_id,
            page,
            per_page,
        })
        .await?;

    let items: Vec<DeliveryResponse> = deliveries
        .into_iter()
        .map(DeliveryResponse::from)
        .collect();

    Ok(Json(Paginated::new(items, total, page, per_page)))
}

/// Create a new delivery; the delivery number is assigned by the server
#[utoipa::path(
    post,
    path = "/api/v1/deliveries",
    request_body = CreateDeliveryRequest,
    responses(
        (status = 201, description = "Delivery created", body = DeliveryResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Referenced customer or build not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Delivery number collision, retry", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Deliveries"
)]
pub async fn create_delivery(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateDeliveryRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let delivery = state
        .services
        .deliveries
        .create_delivery(CreateDeliveryInput {
            customer_id: payload.customer_id,
            build_id: payload.build_id,
            expected_delivery_date: payload.expected_delivery_date,
            shipping_address_line1: payload.shipping_address_line1,
            shipping_address_line2: payload.shipping_address_line2,
            shipping_city: payload.shipping_city,
            shipping_state: payload.shipping_state,
            shipping_postal_code: payload.shipping_postal_code,
            shipping_country: payload.shipping_country,
            tracking_number: payload.tracking_number,
            carrier: payload.carrier,
            status: payload.status.unwrap_or_default(),
            shipping_cost: payload.shipping_cost,
            notes: payload.notes,
            requires_signature: payload.requires_signature.unwrap_or(false),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DeliveryResponse::from(delivery))))
}

/// Get a delivery by ID
#[utoipa::path(
    get,
    path = "/api/v1/deliveries/{id}",
    params(
        ("id" = Uuid, Path, description = "Delivery ID")
    ),
    responses(
        (status = 200, description = "Delivery retrieved", body = DeliveryResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Delivery not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Deliveries"
)]
pub async fn get_delivery(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let delivery = state.services.deliveries.get_delivery(id).await?;

    Ok(Json(DeliveryResponse::from(delivery)))
}

/// Update a delivery
#[utoipa::path(
    patch,
    path = "/api/v1/deliveries/{id}",
    params(
        ("id" = Uuid, Path, description = "Delivery ID")
    ),
    request_body = UpdateDeliveryRequest,
    responses(
        (status = 200, description = "Delivery updated", body = DeliveryResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Delivery not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Deliveries"
)]
pub async fn update_delivery(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDeliveryRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let delivery = state
        .services
        .deliveries
        .update_delivery(
            id,
            UpdateDeliveryInput {
                customer_id: payload.customer_id,
                build_id: payload.build_id,
                delivery_date: payload.delivery_date,
                expected_delivery_date: payload.expected_delivery_date,
                shipping_address_line1: payload.shipping_address_line1,
                shipping_address_line2: payload.shipping_address_line2,
                shipping_city: payload.shipping_city,
                shipping_state: payload.shipping_state,
                shipping_postal_code: payload.shipping_postal_code,
                shipping_country: payload.shipping_country,
                tracking_number: payload.tracking_number,
                carrier: payload.carrier,
                status: payload.status,
                shipping_cost: payload.shipping_cost,
                notes: payload.notes,
                requires_signature: payload.requires_signature,
                signed_by: payload.signed_by,
                signature_date: payload.signature_date,
            },
        )
        .await?;

    Ok(Json(DeliveryResponse::from(delivery)))
}

/// Soft delete a delivery
#[utoipa::path(
    delete,
    path = "/api/v1/deliveries/{id}",
    params(
        ("id" = Uuid, Path, description = "Delivery ID")
    ),
    responses(
        (status = 204, description = "Delivery deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Delivery not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Deliveries"
)]
pub async fn delete_delivery(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.deliveries.delete_delivery(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// Request/Response DTOs

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeliveryListParams {
    /// Page number, starting at 1
    #[serde(default)]
    pub page: Option<u64>,
    /// Items per page
    #[serde(default)]
    pub per_page: Option<u64>,
    /// Case-insensitive match against delivery number or tracking number
    #[serde(default)]
    pub search: Option<String>,
    /// Filter by exact status
    #[serde(default)]
    pub status: Option<DeliveryStatus>,
    /// Filter by customer
    #[serde(default)]
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDeliveryRequest {
    pub customer_id: Uuid,
    #[serde(default)]
    pub build_id: Option<Uuid>,
    #[serde(default)]
    pub expected_delivery_date: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub shipping_address_line1: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub shipping_address_line2: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub shipping_city: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub shipping_state: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub shipping_postal_code: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub shipping_country: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub tracking_number: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub carrier: Option<String>,
    #[serde(default)]
    pub status: Option<DeliveryStatus>,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub shipping_cost: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub requires_signature: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDeliveryRequest {
    #[serde(default)]
    pub customer_id: Option<Uuid>,
    #[serde(default)]
    pub build_id: Option<Uuid>,
    #[serde(default)]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expected_delivery_date: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub shipping_address_line1: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub shipping_address_line2: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub shipping_city: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub shipping_state: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub shipping_postal_code: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub shipping_country: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub tracking_number: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub carrier: Option<String>,
    #[serde(default)]
    pub status: Option<DeliveryStatus>,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub shipping_cost: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub requires_signature: Option<bool>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub signed_by: Option<String>,
    #[serde(default)]
    pub signature_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryResponse {
    pub id: Uuid,
    /// Server-issued, shaped like DEL-000001
    pub delivery_number: String,
    pub customer_id: Uuid,
    pub build_id: Option<Uuid>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub expected_delivery_date: Option<DateTime<Utc>>,
    pub shipping_address_line1: Option<String>,
    pub shipping_address_line2: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_state: Option<String>,
    pub shipping_postal_code: Option<String>,
    pub shipping_country: Option<String>,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub status: DeliveryStatus,
    pub shipping_cost: Option<Decimal>,
    pub notes: Option<String>,
    pub requires_signature: bool,
    pub signed_by: Option<String>,
    pub signature_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<delivery::Model> for DeliveryResponse {
    fn from(model: delivery::Model) -> Self {
        Self {
            id: model.id,
            delivery_number: model.delivery_number,
            customer_id: model.customer_id,
            build_id: model.build_id,
            delivery_date: model.delivery_date,
            expected_delivery_date: model.expected_delivery_date,
            shipping_address_line1: model.shipping_address_line1,
            shipping_address_line2: model.shipping_address_line2,
            shipping_city: model.shipping_city,
            shipping_state: model.shipping_state,
            shipping_postal_code: model.shipping_postal_code,
            shipping_country: model.shipping_country,
            tracking_number: model.tracking_number,
            carrier: model.carrier,
            status: model.status,
            shipping_cost: model.shipping_cost,
            notes: model.notes,
            requires_signature: model.requires_signature,
            signed_by: model.signed_by,
            signature_date: model.signature_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}

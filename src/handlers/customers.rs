use super::common::{resolve_pagination, validate_input, Paginated};
use crate::{
    auth::AuthUser,
    entities::customer,
    errors::ServiceError,
    handlers::AppState,
    services::customers::{CreateCustomerInput, CustomerListQuery, UpdateCustomerInput},
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

/// Creates the router for customer endpoints
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).patch(update_customer).delete(delete_customer),
        )
}

/// List customers with pagination and filtering
#[utoipa::path(
    get,
    path = "/api/v1/customers",
    params(CustomerListParams),
    responses(
        (status = 200, description = "Customers retrieved", body = Paginated<CustomerResponse>),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Customers"
)]
pub async fn list_customers(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (page, per_page) = resolve_pagination(params.page, params.per_page, &state.config)?;

    let (customers, total) = state
        .services
        .customers
        .list_customers(CustomerListQuery {
            search: params.search,
            customer_type: params.customer_type,
            active_only: params.active_only.unwrap_or(false),
            page,
            per_page,
        })
        .await?;

    let items: Vec<CustomerResponse> = customers.into_iter().map(CustomerResponse::from).collect();

    Ok(Json(Paginated::new(items, total, page, per_page)))
}

/// Create a new customer
#[utoipa::path(
    post,
    path = "/api/v1/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 409, description = "Email already in use", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Customers"
)]
pub async fn create_customer(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let customer = state
        .services
        .customers
        .create_customer(CreateCustomerInput {
            name: payload.name,
            contact_person: payload.contact_person,
            email: payload.email,
            phone: payload.phone,
            company_name: payload.company_name,
            tax_id: payload.tax_id,
            address_line1: payload.address_line1,
            address_line2: payload.address_line2,
            city: payload.city,
            state: payload.state,
            postal_code: payload.postal_code,
            country: payload.country,
            website: payload.website,
            notes: payload.notes,
            customer_type: payload.customer_type,
            is_active: payload.is_active.unwrap_or(true),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

/// Get a customer by ID
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    params(
        ("id" = Uuid, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer retrieved", body = CustomerResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Customers"
)]
pub async fn get_customer(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.services.customers.get_customer(id).await?;

    Ok(Json(CustomerResponse::from(customer)))
}

/// Update a customer
#[utoipa::path(
    patch,
    path = "/api/v1/customers/{id}",
    params(
        ("id" = Uuid, Path, description = "Customer ID")
    ),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Email already in use", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Customers"
)]
pub async fn update_customer(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let customer = state
        .services
        .customers
        .update_customer(
            id,
            UpdateCustomerInput {
                name: payload.name,
                contact_person: payload.contact_person,
                email: payload.email,
                phone: payload.phone,
                company_name: payload.company_name,
                tax_id: payload.tax_id,
                address_line1: payload.address_line1,
                address_line2: payload.address_line2,
                city: payload.city,
                state: payload.state,
                postal_code: payload.postal_code,
                country: payload.country,
                website: payload.website,
                notes: payload.notes,
                customer_type: payload.customer_type,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok(Json(CustomerResponse::from(customer)))
}

/// Soft delete a customer
#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}",
    params(
        ("id" = Uuid, Path, description = "Customer ID")
    ),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Customers"
)]
pub async fn delete_customer(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.customers.delete_customer(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// Request/Response DTOs

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomerListParams {
    /// Page number, starting at 1
    #[serde(default)]
    pub page: Option<u64>,
    /// Items per page
    #[serde(default)]
    pub per_page: Option<u64>,
    /// Case-insensitive match against name, contact person, email or company
    #[serde(default)]
    pub search: Option<String>,
    /// Filter by exact customer type
    #[serde(default)]
    pub customer_type: Option<String>,
    /// Only return active customers
    #[serde(default)]
    pub active_only: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Jansen Machinery BV")]
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
    pub company_name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub tax_id: Option<String>,
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
    /// Free-form label such as "business" or "individual"
    #[serde(default)]
    #[validate(length(max = 50))]
    pub customer_type: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerRequest {
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
    pub company_name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub tax_id: Option<String>,
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
    #[validate(length(max = 50))]
    pub customer_type: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub tax_id: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub customer_type: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<customer::Model> for CustomerResponse {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            contact_person: model.contact_person,
            email: model.email,
            phone: model.phone,
            company_name: model.company_name,
            tax_id: model.tax_id,
            address_line1: model.address_line1,
            address_line2: model.address_line2,
            city: model.city,
            state: model.state,
            postal_code: model.postal_code,
            country: model.country,
            website: model.website,
            notes: model.notes,
            customer_type: model.customer_type,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}

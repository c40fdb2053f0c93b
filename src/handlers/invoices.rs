use super::common::{
    resolve_pagination, validate_input, validate_non_negative, validate_percentage, Paginated,
};
use crate::{
    auth::AuthUser,
    entities::{invoice, InvoiceStatus},
    errors::ServiceError,
    handlers::AppState,
    services::invoices::{CreateInvoiceInput, InvoiceListQuery, UpdateInvoiceInput},
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

/// Creates the router for invoice endpoints
pub fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route(
            "/:id",
            get(get_invoice).patch(update_invoice).delete(delete_invoice),
        )
}

/// List invoices with pagination and filtering
#[utoipa::path(
    get,
    path = "/api/v1/invoices",
    params(InvoiceListParams),
    responses(
        (status = 200, description = "Invoices retrieved", body = Paginated<InvoiceResponse>),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Invoices"
)]
pub async fn list_invoices(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<InvoiceListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (page, per_page) = resolve_pagination(params.page, params.per_page, &state.config)?;

    let (invoices, total) = state
        .services
        .invoices
        .list_invoices(InvoiceListQuery {
            search: params.search,
            status: params.status,
            customer_id: params.customer_id,
            page,
            per_page,
        })
        .await?;

    let items: Vec<InvoiceResponse> = invoices.into_iter().map(InvoiceResponse::from).collect();

    Ok(Json(Paginated::new(items, total, page, per_page)))
}

/// Create a new invoice; number, amounts and draft status are assigned by the server
#[utoipa::path(
    post,
    path = "/api/v1/invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice created", body = InvoiceResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Referenced customer or delivery not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Invoice number collision, retry", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Invoices"
)]
pub async fn create_invoice(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let invoice = state
        .services
        .invoices
        .create_invoice(CreateInvoiceInput {
            customer_id: payload.customer_id,
            delivery_id: payload.delivery_id,
            due_date: payload.due_date,
            subtotal: payload.subtotal,
            tax_rate: payload.tax_rate,
            discount_amount: payload.discount_amount.unwrap_or(Decimal::ZERO),
            payment_method: payload.payment_method,
            billing_address_line1: payload.billing_address_line1,
            billing_address_line2: payload.billing_address_line2,
            billing_city: payload.billing_city,
            billing_state: payload.billing_state,
            billing_postal_code: payload.billing_postal_code,
            billing_country: payload.billing_country,
            notes: payload.notes,
            terms_and_conditions: payload.terms_and_conditions,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(InvoiceResponse::from(invoice))))
}

/// Get an invoice by ID
#[utoipa::path(
    get,
    path = "/api/v1/invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Invoice retrieved", body = InvoiceResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Invoice not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Invoices"
)]
pub async fn get_invoice(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let invoice = state.services.invoices.get_invoice(id).await?;

    Ok(Json(InvoiceResponse::from(invoice)))
}

/// Update an invoice; changed financial inputs recompute the derived amounts
#[utoipa::path(
    patch,
    path = "/api/v1/invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    request_body = UpdateInvoiceRequest,
    responses(
        (status = 200, description = "Invoice updated", body = InvoiceResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Invoice not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Invoices"
)]
pub async fn update_invoice(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInvoiceRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let invoice = state
        .services
        .invoices
        .update_invoice(
            id,
            UpdateInvoiceInput {
                customer_id: payload.customer_id,
                delivery_id: payload.delivery_id,
                invoice_date: payload.invoice_date,
                due_date: payload.due_date,
                paid_date: payload.paid_date,
                subtotal: payload.subtotal,
                tax_rate: payload.tax_rate,
                discount_amount: payload.discount_amount,
                status: payload.status,
                payment_method: payload.payment_method,
                payment_reference: payload.payment_reference,
                billing_address_line1: payload.billing_address_line1,
                billing_address_line2: payload.billing_address_line2,
                billing_city: payload.billing_city,
                billing_state: payload.billing_state,
                billing_postal_code: payload.billing_postal_code,
                billing_country: payload.billing_country,
                notes: payload.notes,
                terms_and_conditions: payload.terms_and_conditions,
            },
        )
        .await?;

    Ok(Json(InvoiceResponse::from(invoice)))
}

/// Soft delete an invoice
#[utoipa::path(
    delete,
    path = "/api/v1/invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    responses(
        (status = 204, description = "Invoice deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Invoice not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Invoices"
)]
pub async fn delete_invoice(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.invoices.delete_invoice(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// Request/Response DTOs

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InvoiceListParams {
    /// Page number, starting at 1
    #[serde(default)]
    pub page: Option<u64>,
    /// Items per page
    #[serde(default)]
    pub per_page: Option<u64>,
    /// Case-insensitive match against the invoice number
    #[serde(default)]
    pub search: Option<String>,
    /// Filter by exact status
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
    /// Filter by customer
    #[serde(default)]
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInvoiceRequest {
    pub customer_id: Uuid,
    #[serde(default)]
    pub delivery_id: Option<Uuid>,
    pub due_date: DateTime<Utc>,
    /// Pre-tax amount; tax_amount and total_amount are derived from it
    #[validate(custom = "validate_non_negative")]
    #[schema(example = "100.00")]
    pub subtotal: Decimal,
    /// Percentage, 0 to 100; omitted means the configured default
    #[serde(default)]
    #[validate(custom = "validate_percentage")]
    #[schema(example = "19.0")]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub discount_amount: Option<Decimal>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub payment_method: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub billing_address_line1: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub billing_address_line2: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub billing_city: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub billing_state: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub billing_postal_code: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub billing_country: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub terms_and_conditions: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateInvoiceRequest {
    #[serde(default)]
    pub customer_id: Option<Uuid>,
    #[serde(default)]
    pub delivery_id: Option<Uuid>,
    #[serde(default)]
    pub invoice_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub paid_date: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    #[validate(custom = "validate_percentage")]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub discount_amount: Option<Decimal>,
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub payment_method: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub payment_reference: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub billing_address_line1: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub billing_address_line2: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub billing_city: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub billing_state: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub billing_postal_code: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub billing_country: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub terms_and_conditions: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceResponse {
    pub id: Uuid,
    /// Server-issued, shaped like INV-000001
    pub invoice_number: String,
    pub customer_id: Uuid,
    pub delivery_id: Option<Uuid>,
    pub invoice_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub status: InvoiceStatus,
    pub payment_method: Option<String>,
    pub payment_reference: Option<String>,
    pub billing_address_line1: Option<String>,
    pub billing_address_line2: Option<String>,
    pub billing_city: Option<String>,
    pub billing_state: Option<String>,
    pub billing_postal_code: Option<String>,
    pub billing_country: Option<String>,
    pub notes: Option<String>,
    pub terms_and_conditions: Option<String>,
    pub reminder_sent: bool,
    pub reminder_count: i32,
    pub last_reminder_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<invoice::Model> for InvoiceResponse {
    fn from(model: invoice::Model) -> Self {
        Self {
            id: model.id,
            invoice_number: model.invoice_number,
            customer_id: model.customer_id,
            delivery_id: model.delivery_id,
            invoice_date: model.invoice_date,
            due_date: model.due_date,
            paid_date: model.paid_date,
            subtotal: model.subtotal,
            tax_rate: model.tax_rate,
            tax_amount: model.tax_amount,
            discount_amount: model.discount_amount,
            total_amount: model.total_amount,
            status: model.status,
            payment_method: model.payment_method,
            payment_reference: model.payment_reference,
            billing_address_line1: model.billing_address_line1,
            billing_address_line2: model.billing_address_line2,
            billing_city: model.billing_city,
            billing_state: model.billing_state,
            billing_postal_code: model.billing_postal_code,
            billing_country: model.billing_country,
            notes: model.notes,
            terms_and_conditions: model.terms_and_conditions,
            reminder_sent: model.reminder_sent,
            reminder_count: model.reminder_count,
            last_reminder_date: model.last_reminder_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}

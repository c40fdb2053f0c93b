use super::common::{resolve_pagination, validate_input, validate_non_negative, Paginated};
use crate::{
    auth::AuthUser,
    entities::{build, BuildStatus},
    errors::ServiceError,
    handlers::AppState,
    services::builds::{BomEntry, BomLine, BuildListQuery, CreateBuildInput, UpdateBuildInput},
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

/// Creates the router for build endpoints
pub fn build_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_builds).post(create_build))
        .route("/:id", get(get_build).patch(update_build).delete(delete_build))
}

/// List builds with pagination and filtering
#[utoipa::path(
    get,
    path = "/api/v1/builds",
    params(BuildListParams),
    responses(
        (status = 200, description = "Builds retrieved", body = Paginated<BuildResponse>),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Builds"
)]
pub async fn list_builds(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<BuildListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (page, per_page) = resolve_pagination(params.page, params.per_page, &state.config)?;

    let (builds, total) = state
        .services
        .builds
        .list_builds(BuildListQuery {
            search: params.search,
            status: params.status,
            active_only: params.active_only.unwrap_or(false),
            page,
            per_page,
        })
        .await?;

    let mut items = Vec::with_capacity(builds.len());
    for model in builds {
        let parts = state.services.builds.list_build_parts(model.id).await?;
        items.push(BuildResponse::assemble(model, parts));
    }

    Ok(Json(Paginated::new(items, total, page, per_page)))
}

/// Create a new build with its initial parts list
#[utoipa::path(
    post,
    path = "/api/v1/builds",
    request_body = CreateBuildRequest,
    responses(
        (status = 201, description = "Build created", body = BuildResponse),
        (status = 400, description = "Invalid payload or parts list", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Referenced part not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Model number already in use", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Builds"
)]
pub async fn create_build(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateBuildRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let build = state
        .services
        .builds
        .create_build(CreateBuildInput {
            name: payload.name,
            model_number: payload.model_number,
            description: payload.description,
            base_price: payload.base_price,
            status: payload.status.unwrap_or_default(),
            build_time_hours: payload.build_time_hours,
            notes: payload.notes,
            is_active: payload.is_active.unwrap_or(true),
            parts: payload
                .parts
                .into_iter()
                .map(|entry| BomEntry {
                    part_id: entry.part_id,
                    quantity: entry.quantity,
                })
                .collect(),
        })
        .await?;

    let parts = state.services.builds.list_build_parts(build.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(BuildResponse::assemble(build, parts)),
    ))
}

/// Get a build by ID
#[utoipa::path(
    get,
    path = "/api/v1/builds/{id}",
    params(
        ("id" = Uuid, Path, description = "Build ID")
    ),
    responses(
        (status = 200, description = "Build retrieved", body = BuildResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Build not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Builds"
)]
pub async fn get_build(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let build = state.services.builds.get_build(id).await?;
    let parts = state.services.builds.list_build_parts(build.id).await?;

    Ok(Json(BuildResponse::assemble(build, parts)))
}

/// Update a build; a supplied parts list replaces the whole BOM
#[utoipa::path(
    patch,
    path = "/api/v1/builds/{id}",
    params(
        ("id" = Uuid, Path, description = "Build ID")
    ),
    request_body = UpdateBuildRequest,
    responses(
        (status = 200, description = "Build updated", body = BuildResponse),
        (status = 400, description = "Invalid payload or parts list", body = crate::errors::ErrorResponse),
        (status = 404, description = "Build or referenced part not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Model number already in use", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Builds"
)]
pub async fn update_build(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBuildRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let build = state
        .services
        .builds
        .update_build(
            id,
            UpdateBuildInput {
                name: payload.name,
                model_number: payload.model_number,
                description: payload.description,
                base_price: payload.base_price,
                status: payload.status,
                build_time_hours: payload.build_time_hours,
                notes: payload.notes,
                is_active: payload.is_active,
                parts: payload.parts.map(|entries| {
                    entries
                        .into_iter()
                        .map(|entry| BomEntry {
                            part_id: entry.part_id,
                            quantity: entry.quantity,
                        })
                        .collect()
                }),
            },
        )
        .await?;

    let parts = state.services.builds.list_build_parts(build.id).await?;

    Ok(Json(BuildResponse::assemble(build, parts)))
}

/// Soft delete a build
#[utoipa::path(
    delete,
    path = "/api/v1/builds/{id}",
    params(
        ("id" = Uuid, Path, description = "Build ID")
    ),
    responses(
        (status = 204, description = "Build deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Build not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Builds"
)]
pub async fn delete_build(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.builds.delete_build(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// Request/Response DTOs

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BuildListParams {
    /// Page number, starting at 1
    #[serde(default)]
    pub page: Option<u64>,
    /// Items per page
    #[serde(default)]
    pub per_page: Option<u64>,
    /// Case-insensitive match against name or model number
    #[serde(default)]
    pub search: Option<String>,
    /// Filter by exact status
    #[serde(default)]
    pub status: Option<BuildStatus>,
    /// Only return active builds
    #[serde(default)]
    pub active_only: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BuildPartEntry {
    pub part_id: Uuid,
    /// Units of the part per assembled build
    #[schema(example = 4)]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBuildRequest {
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Workbench 2000")]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    #[schema(example = "WB-2000")]
    pub model_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub base_price: Option<Decimal>,
    #[serde(default)]
    pub status: Option<BuildStatus>,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub build_time_hours: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Complete bill of materials; an empty list is valid
    #[serde(default)]
    pub parts: Vec<BuildPartEntry>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBuildRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub model_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub base_price: Option<Decimal>,
    #[serde(default)]
    pub status: Option<BuildStatus>,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub build_time_hours: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    /// When present, replaces the entire bill of materials
    #[serde(default)]
    pub parts: Option<Vec<BuildPartEntry>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BuildPartResponse {
    pub part_id: Uuid,
    pub part_name: String,
    pub part_sku: String,
    pub quantity: i32,
}

impl From<BomLine> for BuildPartResponse {
    fn from(line: BomLine) -> Self {
        Self {
            part_id: line.part_id,
            part_name: line.part_name,
            part_sku: line.part_sku,
            quantity: line.quantity,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BuildResponse {
    pub id: Uuid,
    pub name: String,
    pub model_number: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<Decimal>,
    pub status: BuildStatus,
    pub build_time_hours: Option<Decimal>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub parts: Vec<BuildPartResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl BuildResponse {
    fn assemble(model: build::Model, parts: Vec<BomLine>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            model_number: model.model_number,
            description: model.description,
            base_price: model.base_price,
            status: model.status,
            build_time_hours: model.build_time_hours,
            notes: model.notes,
            is_active: model.is_active,
            parts: parts.into_iter().map(BuildPartResponse::from).collect(),
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}

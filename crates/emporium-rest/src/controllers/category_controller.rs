//! Category controller.

use crate::{
    extractors::Caller,
    responses::{created, no_content, ok, ApiResult, AppError, CreatedResult},
    state::AppState,
};
use emporium_core::CategoryId;
use emporium_service::{CategoryRequest, CategoryResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::debug;

/// Creates the category router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

/// List all categories.
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses((status = 200, description = "All categories", body = [CategoryResponse]))
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Caller(ctx): Caller,
) -> ApiResult<Vec<CategoryResponse>> {
    let categories = state.category_service.find_all(&ctx).await?;
    ok(categories)
}

/// Create a category (admin only).
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 403, description = "Administrator role required"),
        (status = 409, description = "Title already in use")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_category(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Json(request): Json<CategoryRequest>,
) -> CreatedResult<CategoryResponse> {
    debug!("Create category request: {}", request.title);

    let category = state.category_service.create(&ctx, request).await?;
    created(category)
}

/// Get a category by ID.
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> ApiResult<CategoryResponse> {
    let category = state.category_service.find_by_id(&ctx, CategoryId(id)).await?;
    ok(category)
}

/// Rename a category (admin only).
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category renamed", body = CategoryResponse),
        (status = 400, description = "Unknown category"),
        (status = 403, description = "Administrator role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_category(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(request): Json<CategoryRequest>,
) -> ApiResult<CategoryResponse> {
    debug!("Update category request: {}", id);

    let category = state
        .category_service
        .update(&ctx, CategoryId(id), request)
        .await?;
    ok(category)
}

/// Delete a category (admin only).
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, description = "Unknown category"),
        (status = 403, description = "Administrator role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("Delete category request: {}", id);

    state.category_service.delete(&ctx, CategoryId(id)).await?;
    no_content()
}

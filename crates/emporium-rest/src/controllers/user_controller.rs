//! Account controller.

use crate::{
    extractors::Caller,
    responses::{no_content, ok, ApiResult, AppError},
    state::AppState,
};
use emporium_core::UserId;
use emporium_service::{UpdateUserRequest, UserResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new().route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Get an account by ID.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> ApiResult<UserResponse> {
    let user = state.user_service.find_by_id(&ctx, UserId(id)).await?;
    ok(user)
}

/// Update the caller's own account.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Account updated", body = UserResponse),
        (status = 400, description = "Unknown user or email already in use"),
        (status = 403, description = "Not the caller's account")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update user request: {}", id);

    let user = state.user_service.update(&ctx, UserId(id), request).await?;
    ok(user)
}

/// Delete the caller's own account.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 403, description = "Not the caller's account")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    state.user_service.delete(&ctx, UserId(id)).await?;
    no_content()
}

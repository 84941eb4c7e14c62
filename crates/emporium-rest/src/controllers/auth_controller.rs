//! Authentication controller.

use crate::{
    extractors::Caller,
    responses::{created, ok, ApiResult, CreatedResult},
    state::AppState,
};
use emporium_service::{AuthResponse, LoginRequest, SignUpRequest, UserResponse};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::debug;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/login", post(login))
        .route("/me", get(current_user))
}

/// Register a customer account.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = AuthResponse),
        (status = 400, description = "Invalid input or email already in use")
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Json(request): Json<SignUpRequest>,
) -> CreatedResult<AuthResponse> {
    debug!("Sign-up request for: {}", request.email);

    let response = state.auth_service.sign_up(&ctx, request).await?;
    created(response)
}

/// Log in with email and password.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Json(request): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    debug!("Login request for: {}", request.email);

    let response = state.auth_service.login(&ctx, request).await?;
    ok(response)
}

/// Get the authenticated caller's account.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn current_user(
    State(state): State<AppState>,
    Caller(ctx): Caller,
) -> ApiResult<UserResponse> {
    let user = state.auth_service.current_user(&ctx).await?;
    ok(user)
}

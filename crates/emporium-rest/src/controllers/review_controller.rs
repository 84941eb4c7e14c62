//! Review controller.

use crate::{
    extractors::Caller,
    responses::{created, no_content, ok, ApiResult, AppError, CreatedResult},
    state::AppState,
};
use emporium_core::ReviewId;
use emporium_service::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::debug;

/// Creates the review router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        .route(
            "/:id",
            get(get_review).put(update_review).delete(delete_review),
        )
}

/// Review a product.
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Unknown product or invalid rating"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_review(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Json(request): Json<CreateReviewRequest>,
) -> CreatedResult<ReviewResponse> {
    debug!("Create review request for product {}", request.product_id);

    let review = state.review_service.create(&ctx, request).await?;
    created(review)
}

/// Get a review by ID.
#[utoipa::path(
    get,
    path = "/reviews/{id}",
    tag = "reviews",
    params(("id" = i64, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review found", body = ReviewResponse),
        (status = 404, description = "Review not found")
    )
)]
pub async fn get_review(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> ApiResult<ReviewResponse> {
    let review = state.review_service.find_by_id(&ctx, ReviewId(id)).await?;
    ok(review)
}

/// Change rating and comment of the caller's review.
#[utoipa::path(
    put,
    path = "/reviews/{id}",
    tag = "reviews",
    params(("id" = i64, Path, description = "Review ID")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 400, description = "Unknown review"),
        (status = 403, description = "Caller is not the author")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_review(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(request): Json<UpdateReviewRequest>,
) -> ApiResult<ReviewResponse> {
    debug!("Update review request: {}", id);

    let review = state
        .review_service
        .update(&ctx, ReviewId(id), request)
        .await?;
    ok(review)
}

/// Delete the caller's review.
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "reviews",
    params(("id" = i64, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 400, description = "Unknown review"),
        (status = 403, description = "Caller is not the author")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("Delete review request: {}", id);

    state.review_service.delete(&ctx, ReviewId(id)).await?;
    no_content()
}

//! Product catalog controller.

use crate::{
    extractors::{Caller, QueryParams},
    responses::{created, no_content, ok, ApiResult, AppError, CreatedResult},
    state::AppState,
};
use emporium_core::{ListingParams, Page, ProductId};
use emporium_service::{CreateProductRequest, ProductResponse, ReviewResponse, UpdateProductRequest};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::debug;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/reviews", get(list_product_reviews))
}

/// List products with optional price and category filters.
///
/// `orderBy` must be one of `id`, `name`, `price`, `stock`, `createdAt`.
/// Without `orderBy`, products in `lastCategories` come first.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(ListingParams),
    responses(
        (status = 200, description = "Page of products", body = [ProductResponse]),
        (status = 400, description = "Invalid sort, price range, or unknown category")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    QueryParams(params): QueryParams<ListingParams>,
) -> ApiResult<Page<ProductResponse>> {
    debug!("List products request: {:?}", params);

    let page = state.product_service.find_all(&ctx, params).await?;
    ok(page)
}

/// Create a product under a company the caller owns.
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Unknown category or company"),
        (status = 401, description = "Caller does not own the company")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Json(request): Json<CreateProductRequest>,
) -> CreatedResult<ProductResponse> {
    debug!("Create product request: {}", request.name);

    let product = state.product_service.create(&ctx, request).await?;
    created(product)
}

/// Get a product by ID.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> ApiResult<ProductResponse> {
    let product = state.product_service.find_by_id(&ctx, ProductId(id)).await?;
    ok(product)
}

/// Replace a product's details.
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Unknown product or category"),
        (status = 401, description = "Caller does not own the product")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(request): Json<UpdateProductRequest>,
) -> ApiResult<ProductResponse> {
    debug!("Update product request: {}", id);

    let product = state
        .product_service
        .update(&ctx, ProductId(id), request)
        .await?;
    ok(product)
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Unknown product"),
        (status = 401, description = "Caller does not own the product")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("Delete product request: {}", id);

    state.product_service.delete(&ctx, ProductId(id)).await?;
    no_content()
}

/// List a product's reviews, newest first.
#[utoipa::path(
    get,
    path = "/products/{id}/reviews",
    tag = "reviews",
    params(("id" = i64, Path, description = "Product ID"), ListingParams),
    responses(
        (status = 200, description = "Page of reviews", body = [ReviewResponse]),
        (status = 400, description = "Unknown product or invalid sort")
    )
)]
pub async fn list_product_reviews(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    QueryParams(params): QueryParams<ListingParams>,
) -> ApiResult<Page<ReviewResponse>> {
    let page = state
        .review_service
        .find_by_product(&ctx, ProductId(id), params)
        .await?;
    ok(page)
}

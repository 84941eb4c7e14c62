//! Company controller.

use crate::{
    extractors::{Caller, PaginationQuery, QueryParams},
    responses::{created, no_content, ok, ApiResult, AppError, CreatedResult},
    state::AppState,
};
use emporium_core::{CompanyId, Page};
use emporium_service::{CompanyRequest, CompanyResponse, ProductResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::debug;

/// Creates the company router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
        .route("/:id/products", get(list_company_products))
}

/// List companies.
#[utoipa::path(
    get,
    path = "/companies",
    tag = "companies",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page"),
        ("size" = Option<u32>, Query, description = "Page size")
    ),
    responses((status = 200, description = "Page of companies", body = [CompanyResponse]))
)]
pub async fn list_companies(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    QueryParams(pagination): QueryParams<PaginationQuery>,
) -> ApiResult<Page<CompanyResponse>> {
    let page = state
        .company_service
        .find_all(&ctx, pagination.into())
        .await?;
    ok(page)
}

/// Create a company owned by the caller.
#[utoipa::path(
    post,
    path = "/companies",
    tag = "companies",
    request_body = CompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_company(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Json(request): Json<CompanyRequest>,
) -> CreatedResult<CompanyResponse> {
    debug!("Create company request: {}", request.name);

    let company = state.company_service.create(&ctx, request).await?;
    created(company)
}

/// Get a company by ID.
#[utoipa::path(
    get,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = i64, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company found", body = CompanyResponse),
        (status = 404, description = "Company not found")
    )
)]
pub async fn get_company(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> ApiResult<CompanyResponse> {
    let company = state.company_service.find_by_id(&ctx, CompanyId(id)).await?;
    ok(company)
}

/// Rename a company the caller owns.
#[utoipa::path(
    put,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = i64, Path, description = "Company ID")),
    request_body = CompanyRequest,
    responses(
        (status = 200, description = "Company renamed", body = CompanyResponse),
        (status = 400, description = "Unknown company"),
        (status = 401, description = "Caller does not own the company")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_company(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(request): Json<CompanyRequest>,
) -> ApiResult<CompanyResponse> {
    debug!("Update company request: {}", id);

    let company = state
        .company_service
        .update(&ctx, CompanyId(id), request)
        .await?;
    ok(company)
}

/// Delete a company the caller owns, with its products.
#[utoipa::path(
    delete,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = i64, Path, description = "Company ID")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 400, description = "Unknown company"),
        (status = 401, description = "Caller does not own the company")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_company(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("Delete company request: {}", id);

    state.company_service.delete(&ctx, CompanyId(id)).await?;
    no_content()
}

/// List the products a company sells.
#[utoipa::path(
    get,
    path = "/companies/{id}/products",
    tag = "companies",
    params(
        ("id" = i64, Path, description = "Company ID"),
        ("page" = Option<u32>, Query, description = "Zero-based page"),
        ("size" = Option<u32>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Page of products", body = [ProductResponse]),
        (status = 404, description = "Company not found")
    )
)]
pub async fn list_company_products(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    QueryParams(pagination): QueryParams<PaginationQuery>,
) -> ApiResult<Page<ProductResponse>> {
    let page = state
        .company_service
        .find_products(&ctx, CompanyId(id), pagination.into())
        .await?;
    ok(page)
}

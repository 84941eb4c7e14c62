//! OpenAPI documentation configuration.

use crate::controllers::{HealthResponse, ReadinessResponse};
use emporium_core::{
    CategoryId, CompanyId, ErrorResponse, FieldError, Locale, ProductId, ReviewId, UserId,
    UserRole,
};
use emporium_service::{
    AuthResponse, CategoryRequest, CategoryResponse, CompanyRequest, CompanyResponse,
    CreateProductRequest, CreateReviewRequest, LoginRequest, ProductResponse, ReviewResponse,
    ReviewedProduct, SignUpRequest, UpdateProductRequest, UpdateReviewRequest, UpdateUserRequest,
    UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Emporium API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Emporium API",
        version = "1.0.0",
        description = "Storefront backend: products, reviews, categories, companies, and accounts",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        crate::controllers::auth_controller::sign_up,
        crate::controllers::auth_controller::login,
        crate::controllers::auth_controller::current_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        crate::controllers::category_controller::list_categories,
        crate::controllers::category_controller::create_category,
        crate::controllers::category_controller::get_category,
        crate::controllers::category_controller::update_category,
        crate::controllers::category_controller::delete_category,
        crate::controllers::company_controller::list_companies,
        crate::controllers::company_controller::create_company,
        crate::controllers::company_controller::get_company,
        crate::controllers::company_controller::update_company,
        crate::controllers::company_controller::delete_company,
        crate::controllers::company_controller::list_company_products,
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::create_product,
        crate::controllers::product_controller::get_product,
        crate::controllers::product_controller::update_product,
        crate::controllers::product_controller::delete_product,
        crate::controllers::product_controller::list_product_reviews,
        crate::controllers::review_controller::create_review,
        crate::controllers::review_controller::get_review,
        crate::controllers::review_controller::update_review,
        crate::controllers::review_controller::delete_review,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            CategoryId,
            CompanyId,
            ProductId,
            ReviewId,
            UserRole,
            Locale,
            ErrorResponse,
            FieldError,
            SignUpRequest,
            LoginRequest,
            AuthResponse,
            UpdateUserRequest,
            UserResponse,
            CategoryRequest,
            CategoryResponse,
            CompanyRequest,
            CompanyResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ProductResponse,
            CreateReviewRequest,
            UpdateReviewRequest,
            ReviewedProduct,
            ReviewResponse,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Sign-up and login"),
        (name = "users", description = "Account management"),
        (name = "categories", description = "Product categories"),
        (name = "companies", description = "Sellers and their products"),
        (name = "products", description = "Product catalog"),
        (name = "reviews", description = "Product reviews"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Security addon for JWT Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token authentication"))
                        .build(),
                ),
            );
        }
    }
}

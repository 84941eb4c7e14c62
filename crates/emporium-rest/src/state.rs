//! Application state for Axum handlers.

use emporium_service::{
    AuthService, CategoryService, CompanyService, ProductService, ReviewService, UserService,
};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub category_service: Arc<dyn CategoryService>,
    pub company_service: Arc<dyn CompanyService>,
    pub product_service: Arc<dyn ProductService>,
    pub review_service: Arc<dyn ReviewService>,
}

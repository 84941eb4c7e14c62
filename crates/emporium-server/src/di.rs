//! Service graph wiring.
//!
//! Every component is built once at startup and shared through `Arc`s:
//! repositories over one connection pool, services over the repositories
//! and the selected cache backend.

use emporium_config::AppConfig;
use emporium_repository::{
    DatabasePoolInterface, MySqlCategoryRepository, MySqlCompanyRepository,
    MySqlProductRepository, MySqlReviewRepository, MySqlUserRepository,
};
use emporium_rest::AppState;
use emporium_security::{PasswordHasher, TokenProvider};
use emporium_service::{
    AuthServiceImpl, CacheInterface, CacheTtl, CategoryServiceImpl, CompanyServiceImpl,
    MessageProvider, ProductServiceImpl, ReviewServiceImpl, StaticMessages, UserServiceImpl,
};
use std::sync::Arc;
use tracing::debug;

/// Fully wired services.
pub struct ServiceContainer {
    pub state: AppState,
    pub token_provider: Arc<TokenProvider>,
}

impl ServiceContainer {
    /// Wires repositories and services over `pool` and `cache`.
    pub fn build(
        config: &AppConfig,
        pool: Arc<dyn DatabasePoolInterface>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        let categories = Arc::new(MySqlCategoryRepository::new(pool.clone()));
        let companies = Arc::new(MySqlCompanyRepository::new(pool.clone()));
        let products = Arc::new(MySqlProductRepository::new(pool.clone()));
        let reviews = Arc::new(MySqlReviewRepository::new(pool.clone()));
        let users = Arc::new(MySqlUserRepository::new(pool));

        let messages: Arc<dyn MessageProvider> = Arc::new(StaticMessages);
        let password_hasher = Arc::new(PasswordHasher::from_config(&config.security));
        let token_provider = Arc::new(TokenProvider::new(Arc::new(config.security.clone())));
        let ttl = CacheTtl::from(&config.cache);

        let state = AppState {
            auth_service: Arc::new(AuthServiceImpl::new(
                users.clone(),
                password_hasher.clone(),
                token_provider.clone(),
                messages.clone(),
            )),
            user_service: Arc::new(UserServiceImpl::new(
                users,
                password_hasher,
                messages.clone(),
            )),
            category_service: Arc::new(CategoryServiceImpl::new(
                categories.clone(),
                cache.clone(),
                messages.clone(),
                ttl,
            )),
            company_service: Arc::new(CompanyServiceImpl::new(
                companies.clone(),
                products.clone(),
                cache.clone(),
                messages.clone(),
            )),
            product_service: Arc::new(ProductServiceImpl::new(
                products.clone(),
                categories,
                companies,
                cache.clone(),
                messages.clone(),
                ttl,
            )),
            review_service: Arc::new(ReviewServiceImpl::new(
                reviews, products, cache, messages, ttl,
            )),
        };

        debug!("Service container built");
        Self {
            state,
            token_provider,
        }
    }
}

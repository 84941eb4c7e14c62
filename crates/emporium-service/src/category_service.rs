//! Category service.

use crate::cache::{cache_keys, CacheExt, CacheInterface, CacheTtl};
use crate::dto::{CategoryRequest, CategoryResponse};
use crate::i18n::{MessageProvider, MessageProviderExt};
use async_trait::async_trait;
use emporium_core::{
    CategoryId, EmporiumError, EmporiumResult, Interface, MessageKey, RequestContext, ValidateExt,
};
use emporium_repository::CategoryRepository;
use emporium_security::require_admin;
use std::sync::Arc;
use tracing::{debug, info};

/// Category service trait.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait CategoryService: Interface + Send + Sync {
    /// Lists every category.
    async fn find_all(&self, ctx: &RequestContext) -> EmporiumResult<Vec<CategoryResponse>>;

    /// Gets a category by ID.
    async fn find_by_id(&self, ctx: &RequestContext, id: CategoryId)
        -> EmporiumResult<CategoryResponse>;

    /// Creates a category (administrators only).
    async fn create(
        &self,
        ctx: &RequestContext,
        request: CategoryRequest,
    ) -> EmporiumResult<CategoryResponse>;

    /// Renames a category (administrators only).
    async fn update(
        &self,
        ctx: &RequestContext,
        id: CategoryId,
        request: CategoryRequest,
    ) -> EmporiumResult<CategoryResponse>;

    /// Deletes a category (administrators only).
    async fn delete(&self, ctx: &RequestContext, id: CategoryId) -> EmporiumResult<()>;
}

/// Category service implementation.
pub struct CategoryServiceImpl {
    categories: Arc<dyn CategoryRepository>,
    cache: Arc<dyn CacheInterface>,
    messages: Arc<dyn MessageProvider>,
    ttl: CacheTtl,
}

impl CategoryServiceImpl {
    /// Creates a new category service.
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        cache: Arc<dyn CacheInterface>,
        messages: Arc<dyn MessageProvider>,
        ttl: CacheTtl,
    ) -> Self {
        Self {
            categories,
            cache,
            messages,
            ttl,
        }
    }

    fn require_admin(&self, ctx: &RequestContext) -> EmporiumResult<()> {
        require_admin(ctx).map_err(|denied| self.messages.denied(denied, ctx.locale))?;
        Ok(())
    }

    fn title_taken(&self, ctx: &RequestContext, err: EmporiumError) -> EmporiumError {
        match err {
            EmporiumError::Conflict(_) => EmporiumError::conflict(
                self.messages.message(MessageKey::CategoryTitleTaken, ctx.locale),
            ),
            other => other,
        }
    }

    fn still_referenced(&self, ctx: &RequestContext, err: EmporiumError) -> EmporiumError {
        match err.message_key() {
            Some(MessageKey::ReferenceViolation) => {
                self.messages.bad_request(MessageKey::CategoryInUse, ctx.locale)
            }
            _ => err,
        }
    }

    async fn require_existing(&self, ctx: &RequestContext, id: CategoryId) -> EmporiumResult<()> {
        if self.categories.exists(id).await? {
            Ok(())
        } else {
            Err(self.messages.bad_request(MessageKey::CategoryNotFound, ctx.locale))
        }
    }
}

#[async_trait]
impl CategoryService for CategoryServiceImpl {
    async fn find_all(&self, _ctx: &RequestContext) -> EmporiumResult<Vec<CategoryResponse>> {
        let key = cache_keys::all_categories();
        if let Some(cached) = self.cache.fetch::<Vec<CategoryResponse>>(&key).await {
            return Ok(cached);
        }

        let categories: Vec<CategoryResponse> = self
            .categories
            .find_all()
            .await?
            .into_iter()
            .map(CategoryResponse::from)
            .collect();

        self.cache.store(&key, &categories, self.ttl.entity).await;
        Ok(categories)
    }

    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: CategoryId,
    ) -> EmporiumResult<CategoryResponse> {
        self.categories
            .find_by_id(id)
            .await?
            .map(CategoryResponse::from)
            .ok_or_else(|| self.messages.not_found(MessageKey::CategoryNotFound, ctx.locale))
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        request: CategoryRequest,
    ) -> EmporiumResult<CategoryResponse> {
        debug!("Creating category: {}", request.title);

        self.require_admin(ctx)?;
        request.validate_request()?;

        let category = self
            .categories
            .save(&request.title)
            .await
            .map_err(|e| self.title_taken(ctx, e))?;
        self.cache.evict(&cache_keys::all_categories()).await;

        info!("Category created: {}", category.id);
        Ok(CategoryResponse::from(category))
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: CategoryId,
        request: CategoryRequest,
    ) -> EmporiumResult<CategoryResponse> {
        debug!("Updating category: {}", id);

        self.require_admin(ctx)?;
        request.validate_request()?;
        self.require_existing(ctx, id).await?;

        let updated = self
            .categories
            .update(id, &request.title)
            .await
            .map_err(|e| self.title_taken(ctx, e))?;
        if !updated {
            return Err(self.messages.no_rows_affected(ctx.locale));
        }
        self.cache.evict(&cache_keys::all_categories()).await;

        info!("Category updated: {}", id);
        Ok(CategoryResponse {
            id,
            title: request.title,
        })
    }

    async fn delete(&self, ctx: &RequestContext, id: CategoryId) -> EmporiumResult<()> {
        debug!("Deleting category: {}", id);

        self.require_admin(ctx)?;
        self.require_existing(ctx, id).await?;

        let deleted = self
            .categories
            .delete(id)
            .await
            .map_err(|e| self.still_referenced(ctx, e))?;
        if !deleted {
            return Err(self.messages.no_rows_affected(ctx.locale));
        }
        self.cache.evict(&cache_keys::all_categories()).await;

        info!("Category deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for CategoryServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::i18n::{MockMessageProvider, StaticMessages};
    use crate::testing::{admin, ctx, FakeDb};
    use emporium_core::{Category, EmporiumResult, Locale, UserId};
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Categories {}

        #[async_trait]
        impl CategoryRepository for Categories {
            async fn find_by_id(&self, id: CategoryId) -> EmporiumResult<Option<Category>>;
            async fn exists(&self, id: CategoryId) -> EmporiumResult<bool>;
            async fn find_all(&self) -> EmporiumResult<Vec<Category>>;
            async fn save(&self, title: &str) -> EmporiumResult<Category>;
            async fn update(&self, id: CategoryId, title: &str) -> EmporiumResult<bool>;
            async fn delete(&self, id: CategoryId) -> EmporiumResult<bool>;
        }
    }

    fn service(db: Arc<FakeDb>) -> CategoryServiceImpl {
        CategoryServiceImpl::new(
            db,
            Arc::new(MemoryCache::new(100)),
            Arc::new(StaticMessages),
            CacheTtl::default(),
        )
    }

    #[tokio::test]
    async fn test_customer_cannot_create() {
        let db = Arc::new(FakeDb::new());
        let err = service(db.clone())
            .create(&ctx(UserId(1)), CategoryRequest { title: "Toys".to_string() })
            .await
            .unwrap_err();

        assert!(matches!(err, EmporiumError::Forbidden { key: MessageKey::AdminRequired, .. }));
    }

    #[tokio::test]
    async fn test_admin_writes_invalidate_cached_list() {
        let db = Arc::new(FakeDb::new());
        let service = service(db.clone());
        let admin = admin(UserId(1));

        assert!(service.find_all(&admin).await.unwrap().is_empty());
        let toys = service
            .create(&admin, CategoryRequest { title: "Toys".to_string() })
            .await
            .unwrap();
        assert_eq!(service.find_all(&admin).await.unwrap(), vec![toys.clone()]);

        service
            .update(&admin, toys.id, CategoryRequest { title: "Games".to_string() })
            .await
            .unwrap();
        assert_eq!(service.find_all(&admin).await.unwrap()[0].title, "Games");

        service.delete(&admin, toys.id).await.unwrap();
        assert!(service.find_all(&admin).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_title_is_localized_conflict() {
        let db = Arc::new(FakeDb::new());
        db.add_category("Toys");
        let pt_admin = RequestContext::authenticated(UserId(1), emporium_core::UserRole::Admin, Locale::PtBr);

        let err = service(db)
            .create(&pt_admin, CategoryRequest { title: "Toys".to_string() })
            .await
            .unwrap_err();
        match err {
            EmporiumError::Conflict(message) => {
                assert_eq!(message, "Já existe uma categoria com este título");
            }
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_missing_category_is_bad_request() {
        let mut categories = MockCategories::new();
        categories.expect_exists().with(eq(CategoryId(9))).return_once(|_| Ok(false));
        categories.expect_update().never();

        let mut messages = MockMessageProvider::new();
        messages
            .expect_message()
            .with(eq(MessageKey::CategoryNotFound), eq(Locale::En))
            .return_const("missing".to_string());

        let service = CategoryServiceImpl::new(
            Arc::new(categories),
            Arc::new(MemoryCache::new(10)),
            Arc::new(messages),
            CacheTtl::default(),
        );

        let err = service
            .update(&admin(UserId(1)), CategoryId(9), CategoryRequest { title: "X".to_string() })
            .await
            .unwrap_err();
        assert!(matches!(err, EmporiumError::BadRequest { key: MessageKey::CategoryNotFound, .. }));
    }

    #[tokio::test]
    async fn test_delete_of_category_with_products_is_localized_bad_request() {
        let mut categories = MockCategories::new();
        categories.expect_exists().return_once(|_| Ok(true));
        categories.expect_delete().return_once(|_| {
            Err(EmporiumError::bad_request(
                MessageKey::ReferenceViolation,
                "Cannot delete or update a parent row: a foreign key constraint fails",
            ))
        });

        let service = CategoryServiceImpl::new(
            Arc::new(categories),
            Arc::new(MemoryCache::new(10)),
            Arc::new(StaticMessages),
            CacheTtl::default(),
        );
        let pt_admin =
            RequestContext::authenticated(UserId(1), emporium_core::UserRole::Admin, Locale::PtBr);

        let err = service.delete(&pt_admin, CategoryId(3)).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        match err {
            EmporiumError::BadRequest { key, message } => {
                assert_eq!(key, MessageKey::CategoryInUse);
                assert_eq!(message, "A categoria ainda possui produtos");
            }
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_zero_rows_on_delete_is_internal() {
        let mut categories = MockCategories::new();
        categories.expect_exists().return_once(|_| Ok(true));
        categories.expect_delete().return_once(|_| Ok(false));

        let service = CategoryServiceImpl::new(
            Arc::new(categories),
            Arc::new(MemoryCache::new(10)),
            Arc::new(StaticMessages),
            CacheTtl::default(),
        );

        let err = service.delete(&admin(UserId(1)), CategoryId(3)).await.unwrap_err();
        assert_eq!(err.message_key(), Some(MessageKey::NoRowsAffected));
    }
}
